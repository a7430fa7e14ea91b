//! Settings Team Form Component
//!
//! Edits the team name and logo. In conversion mode a personal space
//! becomes a team and picks a domain.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::api::{use_api, IconUpload};
use crate::config::CloudConfig;
use crate::error::ApiError;
use crate::models::Team;
use crate::router::use_router;
use crate::settings::{apply_team_update, domain_preview, submit_team_update, update_request, TeamFormLabels};
use crate::store::use_app_store;
use crate::toast::{use_toast, ToastMessage};

async fn read_icon(file: web_sys::File) -> Result<IconUpload, ApiError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ApiError::Encode(format!("{:?}", e)))?;
    Ok(IconUpload {
        file_name: file.name(),
        mime_type: file.type_(),
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    })
}

#[component]
pub fn SettingsTeamForm(
    team: Team,
    #[prop(optional)] team_conversion: bool,
) -> impl IntoView {
    let api = use_api();
    let store = use_app_store();
    let router = use_router();
    let toast = use_toast();
    let config = expect_context::<CloudConfig>();

    let labels = TeamFormLabels::for_mode(team_conversion);
    let name = RwSignal::new(if team_conversion { String::new() } else { team.name.clone() });
    let domain = RwSignal::new(if team_conversion { String::new() } else { team.domain.clone() });
    let sending = RwSignal::new(false);
    let icon_file = RwSignal::new_local(None::<web_sys::File>);
    let file_url = RwSignal::new(team.icon.as_ref().map(|icon| config.build_icon_url(&icon.location)));

    let base_url = config.base_url.clone();
    let preview = move || domain.with(|raw| domain_preview(&base_url, raw));

    let on_file_change = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        match web_sys::Url::create_object_url_with_blob(&file) {
            Ok(url) => file_url.set(Some(url)),
            Err(e) => log::warn!("[settings] no preview for {}: {:?}", file.name(), e),
        }
        icon_file.set(Some(file));
    };

    let team_id = team.id.clone();
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if sending.get_untracked() {
            return;
        }
        sending.set(true);

        let body = update_request(name.get_untracked(), domain.get_untracked(), team_conversion);
        let file = icon_file.get_untracked();
        let api = api.clone();
        let team_id = team_id.clone();

        spawn_local(async move {
            let result = async {
                let icon = match file {
                    Some(file) => Some(read_icon(file).await?),
                    None => None,
                };
                submit_team_update(&api, &team_id, &body, icon).await
            }
            .await;

            match result {
                Ok(updated) => apply_team_update(&store, &router, updated),
                Err(e) => {
                    log::error!("[settings] team update failed: {}", e);
                    toast.push_message(ToastMessage::error(
                        "Error",
                        "Could not update your team information",
                    ));
                }
            }
            // the form may be gone by now
            sending.try_set(false);
        });
    };

    let show_domain = team_conversion && team.personal;

    view! {
        <form class="settings-team-form" on:submit=on_submit>
            <div class="form-row">
                <label>"Logo"</label>
                <div class="logo-picker">
                    {move || match file_url.get() {
                        Some(url) => view! { <img class="team-logo" src=url alt="logo" /> }.into_any(),
                        None => view! { <span class="team-logo placeholder">"🏢"</span> }.into_any(),
                    }}
                    <input type="file" accept="image/*" on:change=on_file_change />
                </div>
            </div>
            <div class="form-row">
                <label>{labels.name}</label>
                <input
                    type="text"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
            </div>
            {show_domain.then(|| view! {
                <div class="form-row">
                    <label>{labels.domain}</label>
                    <input
                        type="text"
                        prop:value=move || domain.get()
                        on:input=move |ev| domain.set(event_target_value(&ev))
                    />
                    <div class="description">
                        "Your team URL will be: "
                        <span class="underlined">{preview}</span>
                    </div>
                    <div class="description">
                        "Changing the domain later breaks shared links."
                    </div>
                </div>
            })}
            <button class="btn primary" type="submit" prop:disabled=move || sending.get()>
                {labels.submit}
            </button>
        </form>
    }
}
