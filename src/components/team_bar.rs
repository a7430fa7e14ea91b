//! Team Bar Component
//!
//! Team switcher and settings entry points above the sidebar.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::config::CloudConfig;
use crate::modal::{use_modal, ModalContent};
use crate::router::use_router;
use crate::session::open_team;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::toast::{use_toast, ToastMessage};

#[component]
pub fn TeamBar() -> impl IntoView {
    let store = use_app_store();
    let modal = use_modal();
    let api = use_api();
    let router = use_router();
    let toast = use_toast();
    let config = expect_context::<CloudConfig>();

    let current = move || store.page().read().team.clone();
    let icon_url = move || {
        current()
            .and_then(|team| team.icon)
            .map(|icon| config.build_icon_url(&icon.location))
    };
    let is_personal = move || current().map(|team| team.personal).unwrap_or(false);

    let switch_team = move |team_id: String| {
        let Some(team) = store.teams().read_untracked().iter().find(|t| t.id == team_id).cloned() else {
            return;
        };
        let api = api.clone();
        spawn_local(async move {
            if let Err(e) = open_team(&api, &store, &router, team).await {
                log::error!("[session] switching team failed: {}", e);
                toast.push_message(ToastMessage::error("Error", "Could not load the team"));
            }
        });
    };

    view! {
        <header class="team-bar">
            {move || icon_url().map(|url| view! { <img class="team-logo" src=url alt="" /> })}
            <select
                class="team-select"
                on:change=move |ev| switch_team(event_target_value(&ev))
            >
                <For
                    each=move || store.teams().get()
                    key=|team| (team.id.clone(), team.name.clone())
                    children=move |team| {
                        let id = team.id.clone();
                        let selected = move || current().map(|t| t.id == id).unwrap_or(false);
                        view! {
                            <option value=team.id.clone() selected=selected>{team.name.clone()}</option>
                        }
                    }
                />
            </select>
            <button
                class="titlebar-btn"
                title="Team settings"
                on:click=move |_| modal.open_modal(ModalContent::TeamSettings { conversion: false })
            >
                "⚙"
            </button>
            <Show when=is_personal>
                <button
                    class="titlebar-btn"
                    title="Convert to a team"
                    on:click=move |_| modal.open_modal(ModalContent::TeamSettings { conversion: true })
                >
                    "＋"
                </button>
            </Show>
        </header>
    }
}
