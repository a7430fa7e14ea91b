//! Move Item Modal Component
//!
//! Destination picker: a workspace, optionally a folder inside it.

use leptos::prelude::*;

use crate::explorer::{flatten_folder_tree, move_destination, sort_folders_by_name, sort_workspaces};
use crate::modal::use_modal;
use crate::models::{Folder, Workspace};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn MoveItemModal(
    /// Receives (workspace id, parent folder id)
    #[prop(into)]
    on_submit: Callback<(String, Option<String>)>,
) -> impl IntoView {
    let store = use_app_store();
    let modal = use_modal();
    let selected_workspace = RwSignal::new(None::<String>);
    let selected_folder = RwSignal::new(None::<String>);

    let workspaces = Memo::new(move |_| {
        let mut workspaces: Vec<Workspace> = store.nav().read().workspaces_map.values().cloned().collect();
        sort_workspaces(&mut workspaces);
        workspaces
    });
    let folders = Memo::new(move |_| {
        let mut folders: Vec<Folder> = store.nav().read().folders_map.values().cloned().collect();
        sort_folders_by_name(&mut folders);
        folders
    });

    let on_submit_form = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if let Some(destination) = move_destination(selected_workspace.get(), selected_folder.get()) {
            on_submit.run(destination);
        }
        modal.close_last_modal();
    };

    view! {
        <div class="modal-container">
            <form class="move-item-form" on:submit=on_submit_form>
                <h3>"Pick your destination"</h3>
                <WorkspaceExplorer
                    workspaces=workspaces
                    folders=folders
                    selected_workspace=selected_workspace
                    selected_folder=selected_folder
                />
                <div class="modal-footer">
                    <button
                        class="btn primary"
                        type="submit"
                        prop:disabled=move || selected_workspace.get().is_none()
                    >
                        "Move"
                    </button>
                </div>
            </form>
        </div>
    }
}

/// Two-pane picker: workspaces on the left, the selected workspace's
/// folder tree on the right
#[component]
pub fn WorkspaceExplorer(
    #[prop(into)] workspaces: Signal<Vec<Workspace>>,
    #[prop(into)] folders: Signal<Vec<Folder>>,
    selected_workspace: RwSignal<Option<String>>,
    selected_folder: RwSignal<Option<String>>,
) -> impl IntoView {
    let tree = Memo::new(move |_| match selected_workspace.get() {
        Some(workspace_id) => folders.with(|folders| flatten_folder_tree(folders, &workspace_id)),
        None => Vec::new(),
    });

    view! {
        <div class="workspace-explorer">
            <ul class="explorer-column workspaces">
                <For
                    each=move || workspaces.get()
                    key=|ws| ws.id.clone()
                    children=move |ws| {
                        let id = ws.id.clone();
                        let is_selected = {
                            let id = id.clone();
                            move || selected_workspace.get().as_deref() == Some(id.as_str())
                        };
                        view! {
                            <li
                                class=move || if is_selected() { "explorer-item active" } else { "explorer-item" }
                                on:click=move |_| {
                                    selected_workspace.set(Some(id.clone()));
                                    selected_folder.set(None);
                                }
                            >
                                {ws.name.clone()}
                                {ws.public.then(|| view! { <span class="workspace-badge">"public"</span> })}
                            </li>
                        }
                    }
                />
            </ul>
            <ul class="explorer-column folders">
                <For
                    each=move || tree.get()
                    key=|(folder, depth)| (folder.id.clone(), *depth)
                    children=move |(folder, depth)| {
                        let id = folder.id.clone();
                        let is_selected = {
                            let id = id.clone();
                            move || selected_folder.get().as_deref() == Some(id.as_str())
                        };
                        view! {
                            <li
                                class=move || if is_selected() { "explorer-item active" } else { "explorer-item" }
                                style=format!("padding-left: {}px", 8 + depth * 14)
                                on:click=move |_| {
                                    // clicking the selected folder moves to the workspace root
                                    selected_folder.update(|current| {
                                        *current = if current.as_deref() == Some(id.as_str()) { None } else { Some(id.clone()) };
                                    });
                                }
                            >
                                {folder.emoji.clone().unwrap_or_else(|| "📁".to_string())}
                                " "
                                {folder.name.clone()}
                            </li>
                        }
                    }
                />
            </ul>
        </div>
    }
}
