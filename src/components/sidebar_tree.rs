//! Sidebar Tree Component
//!
//! Workspaces of the current team with their folders and docs.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::SidebarContextList;
use crate::explorer::{sidebar_rows, sort_workspaces, SidebarRow};
use crate::models::Workspace;
use crate::store::{store_open_doc, store_open_folder, use_app_store, AppStateStoreFields};
use crate::updater::{log_rejection, use_cloud_updater};

const INDENT_PX: usize = 14;

#[component]
pub fn SidebarTree() -> impl IntoView {
    let store = use_app_store();

    let workspaces = Memo::new(move |_| {
        let mut workspaces: Vec<Workspace> = store.nav().read().workspaces_map.values().cloned().collect();
        sort_workspaces(&mut workspaces);
        workspaces
    });

    view! {
        <nav class="sidebar-tree">
            <SidebarContextList class="sidebar-rows">
                <For
                    each=move || workspaces.get()
                    key=|ws| (ws.id.clone(), ws.name.clone(), ws.public)
                    children=move |ws| view! { <WorkspaceSection workspace=ws /> }
                />
            </SidebarContextList>
        </nav>
    }
}

#[component]
fn WorkspaceSection(workspace: Workspace) -> impl IntoView {
    let store = use_app_store();
    let updater = use_cloud_updater();
    let workspace_id = workspace.id.clone();

    let rows = Memo::new({
        let workspace_id = workspace_id.clone();
        move |_| sidebar_rows(&store.nav().read(), &workspace_id)
    });

    let deletable = !workspace.default;
    let on_delete = {
        let workspace = workspace.clone();
        move |ev: web_sys::MouseEvent| {
            ev.stop_propagation();
            updater.delete_workspace(&workspace);
        }
    };

    view! {
        <section class="sidebar-workspace">
            <div class="sidebar-workspace-header">
                <span class="workspace-name">{workspace.name.clone()}</span>
                {workspace.public.then(|| view! { <span class="workspace-badge">"public"</span> })}
                {deletable.then(|| view! {
                    <button class="delete-btn" title="Delete workspace" on:click=on_delete>"×"</button>
                })}
            </div>
            <For
                each=move || rows.get()
                key=|row| format!("{:?}", row)
                children=move |row| view! { <SidebarRowView row=row /> }
            />
        </section>
    }
}

#[component]
fn SidebarRowView(row: SidebarRow) -> impl IntoView {
    let store = use_app_store();
    let updater = use_cloud_updater();

    match row {
        SidebarRow::Folder(folder, depth) => {
            let folder_id = folder.id.clone();
            let is_active = {
                let folder_id = folder_id.clone();
                move || store.page().read().page_folder.as_ref().map(|f| f.id == folder_id).unwrap_or(false)
            };
            let open = {
                let folder_id = folder_id.clone();
                move |_| store_open_folder(&store, &folder_id)
            };
            let toggle_bookmark = {
                let folder = folder.clone();
                let updater = updater.clone();
                move |ev: web_sys::MouseEvent| {
                    ev.stop_propagation();
                    let folder = folder.clone();
                    let updater = updater.clone();
                    spawn_local(async move {
                        log_rejection(updater.toggle_folder_bookmark(&folder).await);
                    });
                }
            };
            let sending = {
                let updater = updater.clone();
                move || updater.is_sending(&folder_id)
            };
            view! {
                <button
                    class=move || if is_active() { "sidebar-row folder active" } else { "sidebar-row folder" }
                    style=format!("padding-left: {}px", depth * INDENT_PX)
                    on:click=open
                >
                    <span class="row-icon">{folder.emoji.clone().unwrap_or_else(|| "📁".to_string())}</span>
                    <span class="row-label">{folder.name.clone()}</span>
                    <span
                        class=if folder.bookmarked { "bookmark-btn active" } else { "bookmark-btn" }
                        class:disabled=sending
                        on:click=toggle_bookmark
                    >
                        "★"
                    </span>
                </button>
            }
            .into_any()
        }
        SidebarRow::Doc(doc, depth) => {
            let doc_id = doc.id.clone();
            let is_active = {
                let doc_id = doc_id.clone();
                move || store.page().read().page_doc.as_ref().map(|d| d.id == doc_id).unwrap_or(false)
            };
            view! {
                <button
                    class=move || if is_active() { "sidebar-row doc active" } else { "sidebar-row doc" }
                    style=format!("padding-left: {}px", depth * INDENT_PX)
                    on:click=move |_| store_open_doc(&store, &doc_id)
                >
                    <span class="row-icon">{doc.emoji.clone().unwrap_or_else(|| "📄".to_string())}</span>
                    <span class="row-label">{doc.title.clone()}</span>
                    {doc.bookmarked.then(|| view! { <span class="bookmark-mark">"★"</span> })}
                </button>
            }
            .into_any()
        }
    }
}
