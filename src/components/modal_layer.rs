//! Modal Layer Component
//!
//! Renders the modal stack; only the top modal is shown.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{MoveItemModal, SettingsTeamForm};
use crate::modal::{use_modal, ModalContent};
use crate::store::{use_app_store, AppStateStoreFields};
use crate::updater::{log_rejection, use_cloud_updater};

#[component]
pub fn ModalLayer() -> impl IntoView {
    let modal = use_modal();
    let store = use_app_store();
    let updater = use_cloud_updater();
    let modals = modal.modals();

    view! {
        {move || modals.get().last().cloned().map(|content| {
            let updater = updater.clone();
            let body = match content {
                ModalContent::MoveDoc(doc) => {
                    let on_submit = move |(workspace_id, folder_id): (String, Option<String>)| {
                        let updater = updater.clone();
                        let doc = doc.clone();
                        spawn_local(async move {
                            log_rejection(updater.move_doc(&doc, workspace_id, folder_id).await);
                        });
                    };
                    view! { <MoveItemModal on_submit=on_submit /> }.into_any()
                }
                ModalContent::MoveFolder(folder) => {
                    let on_submit = move |(workspace_id, folder_id): (String, Option<String>)| {
                        let updater = updater.clone();
                        let folder = folder.clone();
                        spawn_local(async move {
                            log_rejection(updater.move_folder(&folder, workspace_id, folder_id).await);
                        });
                    };
                    view! { <MoveItemModal on_submit=on_submit /> }.into_any()
                }
                ModalContent::TeamSettings { conversion } => {
                    match store.page().read_untracked().team.clone() {
                        Some(team) => view! { <SettingsTeamForm team=team team_conversion=conversion /> }.into_any(),
                        None => view! { <p>"No team loaded"</p> }.into_any(),
                    }
                }
            };
            view! {
                <div class="modal-backdrop" on:click=move |_| modal.close_last_modal()>
                    <div class="modal-window" on:click=|ev| ev.stop_propagation()>
                        {body}
                    </div>
                </div>
            }
        })}
    }
}
