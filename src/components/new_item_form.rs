//! New Item Form Component
//!
//! Creates a doc or a folder next to what the page currently shows.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{CreateDocRequest, CreateFolderRequest};
use crate::explorer::sort_workspaces;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::updater::{log_rejection, use_cloud_updater};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NewItemKind {
    Doc,
    Folder,
}

const ITEM_KINDS: &[(NewItemKind, &str)] = &[(NewItemKind::Doc, "Doc"), (NewItemKind::Folder, "Folder")];

/// Where a new item lands: (workspace id, parent folder id)
fn target_location(store: &crate::store::AppStore) -> Option<(String, Option<String>)> {
    let page = store.page().read_untracked();
    if let Some(folder) = &page.page_folder {
        return Some((folder.workspace_id.clone(), Some(folder.id.clone())));
    }
    if let Some(doc) = &page.page_doc {
        return Some((doc.workspace_id.clone(), doc.parent_folder_id.clone()));
    }
    let mut workspaces: Vec<_> = store.nav().read_untracked().workspaces_map.values().cloned().collect();
    sort_workspaces(&mut workspaces);
    workspaces.into_iter().next().map(|ws| (ws.id, None))
}

#[component]
pub fn NewItemForm() -> impl IntoView {
    let store = use_app_store();
    let updater = use_cloud_updater();

    let (new_text, set_new_text) = signal(String::new());
    let (kind, set_kind) = signal(NewItemKind::Doc);

    let create_item = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = new_text.get().trim().to_string();
        if text.is_empty() {
            return;
        }
        let Some(team) = store.page().read_untracked().team.clone() else {
            return;
        };
        let Some((workspace_id, parent_folder_id)) = target_location(&store) else {
            log::warn!("[updater] no workspace to create {} in", text);
            return;
        };
        let updater = updater.clone();
        let selected = kind.get();

        spawn_local(async move {
            let clear = move || set_new_text.set(String::new());
            let result = match selected {
                NewItemKind::Doc => {
                    let body = CreateDocRequest {
                        title: text,
                        workspace_id,
                        parent_folder_id,
                        emoji: None,
                    };
                    updater.create_doc(&team, body, clear).await
                }
                NewItemKind::Folder => {
                    let body = CreateFolderRequest {
                        name: text,
                        workspace_id,
                        parent_folder_id,
                    };
                    updater.create_folder(&team, body, clear).await
                }
            };
            log_rejection(result);
        });
    };

    view! {
        <form class="new-item-form" on:submit=create_item>
            <div class="new-item-row">
                <input
                    type="text"
                    placeholder=move || match kind.get() {
                        NewItemKind::Doc => "New doc title...",
                        NewItemKind::Folder => "New folder name...",
                    }
                    prop:value=move || new_text.get()
                    on:input=move |ev| set_new_text.set(event_target_value(&ev))
                />
                <button type="submit">"Add"</button>
            </div>

            <div class="type-selector-row">
                {ITEM_KINDS.iter().map(|(value, label)| {
                    let value = *value;
                    view! {
                        <button
                            type="button"
                            class=move || if kind.get() == value { "type-btn small active" } else { "type-btn small" }
                            on:click=move |_| set_kind.set(value)
                        >
                            {*label}
                        </button>
                    }
                }).collect_view()}
            </div>
        </form>
    }
}
