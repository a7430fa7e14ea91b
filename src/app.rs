//! Cloud Docs App
//!
//! Root component: builds the shared stores, provides them via context and
//! lays out sidebar, page and overlays.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api::{ApiHandle, HttpCloudApi};
use crate::bulk::BulkSender;
use crate::comments::CommentsStore;
use crate::components::{MessageBox, ModalLayer, NewItemForm, PageView, SidebarTree, TeamBar, ToastList};
use crate::config::CloudConfig;
use crate::dialog::DialogStore;
use crate::modal::ModalStore;
use crate::router::Router;
use crate::session::load_session;
use crate::store::AppState;
use crate::toast::{ToastMessage, ToastStore};
use crate::updater::CloudUpdater;

#[component]
pub fn App(config: CloudConfig) -> impl IntoView {
    let api = ApiHandle::new(HttpCloudApi::new(config.clone()));
    let store = Store::new(AppState::default());
    let toast = ToastStore::new(config.toast_duration_ms);
    let dialog = DialogStore::new();
    let modal = ModalStore::new();
    let router = Router::from_location();
    let bulk = BulkSender::new(toast, config.request_timeout_ms);

    provide_context(config);
    provide_context(api.clone());
    provide_context(store);
    provide_context(toast);
    provide_context(dialog);
    provide_context(modal);
    provide_context(router);
    provide_context(bulk);
    provide_context(CommentsStore::new(api.clone()));
    provide_context(CloudUpdater::new(api.clone(), store, bulk, toast, dialog, router));

    // Load teams and the active team's resources on mount
    Effect::new(move |_| {
        let api = api.clone();
        spawn_local(async move {
            if let Err(e) = load_session(&api, &store, &router).await {
                log::error!("[session] initial load failed: {}", e);
                toast.push_message(ToastMessage::error("Error", "Could not load your teams"));
            }
        });
    });

    view! {
        <div class="app-layout">
            <aside class="sidebar">
                <TeamBar />
                <NewItemForm />
                <SidebarTree />
            </aside>
            <PageView />
            <ModalLayer />
            <MessageBox />
            <ToastList />
        </div>
    }
}
