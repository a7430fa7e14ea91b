//! Page View Component
//!
//! Main column: the doc or folder the page points at, with its actions.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{UpdateDocRequest, UpdateFolderRequest};
use crate::components::CommentThreads;
use crate::modal::{use_modal, ModalContent};
use crate::models::{Doc, Folder};
use crate::store::{use_app_store, AppStateStoreFields};
use crate::updater::{log_rejection, use_cloud_updater};

#[component]
pub fn PageView() -> impl IntoView {
    let store = use_app_store();

    view! {
        <main class="main-content">
            {move || {
                let page = store.page().get();
                match (page.page_doc, page.page_folder) {
                    (Some(doc), _) => view! { <DocPage doc=doc /> }.into_any(),
                    (None, Some(folder)) => view! { <FolderPage folder=folder /> }.into_any(),
                    (None, None) => view! { <p class="empty-page">"Pick a doc or folder in the sidebar"</p> }.into_any(),
                }
            }}
        </main>
    }
}

/// Inline title/emoji editor shared by doc and folder pages
#[component]
fn TitleEditor(
    #[prop(into)] title: String,
    emoji: Option<String>,
    #[prop(into)] on_rename: Callback<String>,
    #[prop(into)] on_emoji: Callback<Option<String>>,
) -> impl IntoView {
    let (editing, set_editing) = signal(false);
    let (draft, set_draft) = signal(title.clone());
    let (emoji_draft, set_emoji_draft) = signal(emoji.clone().unwrap_or_default());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = draft.get().trim().to_string();
        if !name.is_empty() {
            on_rename.run(name);
        }
        set_editing.set(false);
    };

    let on_emoji_change = move |ev: web_sys::Event| {
        let value = event_target_value(&ev).trim().to_string();
        set_emoji_draft.set(value.clone());
        on_emoji.run(if value.is_empty() { None } else { Some(value) });
    };

    view! {
        <div class="page-title-row">
            <input
                class="emoji-input"
                type="text"
                maxlength="4"
                placeholder="🙂"
                prop:value=move || emoji_draft.get()
                on:change=on_emoji_change
            />
            {move || if editing.get() {
                view! {
                    <form class="title-form" on:submit=on_submit>
                        <input
                            type="text"
                            prop:value=move || draft.get()
                            on:input=move |ev| set_draft.set(event_target_value(&ev))
                        />
                        <button type="submit">"Save"</button>
                        <button type="button" on:click=move |_| set_editing.set(false)>"×"</button>
                    </form>
                }.into_any()
            } else {
                let title = title.clone();
                view! {
                    <h1 class="page-title" on:dblclick=move |_| set_editing.set(true)>{title}</h1>
                }.into_any()
            }}
        </div>
    }
}

#[component]
fn DocPage(doc: Doc) -> impl IntoView {
    let updater = use_cloud_updater();
    let modal = use_modal();
    let doc_id = doc.id.clone();

    // every action works on the doc as the page knows it now
    let run = {
        let updater = updater.clone();
        let doc = doc.clone();
        move |action: DocAction| {
            let updater = updater.clone();
            let doc = doc.clone();
            spawn_local(async move {
                let result = match action {
                    DocAction::Archive => updater.toggle_doc_archive(&doc).await,
                    DocAction::Bookmark => updater.toggle_doc_bookmark(&doc).await,
                    DocAction::Rename(title) => {
                        let body = UpdateDocRequest {
                            title: Some(title),
                            ..Default::default()
                        };
                        updater.update_doc(&doc, body).await
                    }
                    DocAction::Emoji(emoji) => updater.update_doc_emoji(&doc, emoji).await,
                };
                log_rejection(result);
            });
        }
    };

    let sending = {
        let updater = updater.clone();
        let doc_id = doc_id.clone();
        move || updater.is_sending(&doc_id)
    };

    let on_delete = {
        let updater = updater.clone();
        let doc = doc.clone();
        move |_| {
            updater.delete_doc(&doc, Some(&doc.title));
        }
    };
    let on_move = {
        let doc = doc.clone();
        move |_| modal.open_modal(ModalContent::MoveDoc(doc.clone()))
    };

    let run_rename = run.clone();
    let run_emoji = run.clone();
    let run_archive = run.clone();
    let run_bookmark = run;

    view! {
        <article class="page doc-page">
            <TitleEditor
                title=doc.title.clone()
                emoji=doc.emoji.clone()
                on_rename={move |title: String| run_rename(DocAction::Rename(title))}
                on_emoji={move |emoji: Option<String>| run_emoji(DocAction::Emoji(emoji))}
            />
            <div class="page-actions">
                <button prop:disabled=sending.clone() on:click=move |_| run_bookmark(DocAction::Bookmark)>
                    {if doc.bookmarked { "Unbookmark" } else { "Bookmark" }}
                </button>
                <button prop:disabled=sending.clone() on:click=move |_| run_archive(DocAction::Archive)>
                    {if doc.is_archived() { "Unarchive" } else { "Archive" }}
                </button>
                <button prop:disabled=sending.clone() on:click=on_move>"Move"</button>
                <button class="danger" prop:disabled=sending on:click=on_delete>"Delete"</button>
            </div>
            {doc.is_archived().then(|| view! { <p class="archived-note">"This doc is archived"</p> })}
            <CommentThreads doc_id=doc_id />
        </article>
    }
}

#[derive(Clone, Debug)]
enum DocAction {
    Archive,
    Bookmark,
    Rename(String),
    Emoji(Option<String>),
}

#[derive(Clone, Debug)]
enum FolderAction {
    Bookmark,
    Rename(String),
    Emoji(Option<String>),
}

#[component]
fn FolderPage(folder: Folder) -> impl IntoView {
    let updater = use_cloud_updater();
    let modal = use_modal();

    let run = {
        let updater = updater.clone();
        let folder = folder.clone();
        move |action: FolderAction| {
            let updater = updater.clone();
            let folder = folder.clone();
            spawn_local(async move {
                let result = match action {
                    FolderAction::Bookmark => updater.toggle_folder_bookmark(&folder).await,
                    FolderAction::Rename(name) => {
                        let body = UpdateFolderRequest {
                            name: Some(name),
                            ..Default::default()
                        };
                        updater.update_folder(&folder, body).await
                    }
                    FolderAction::Emoji(emoji) => updater.update_folder_emoji(&folder, emoji).await,
                };
                log_rejection(result);
            });
        }
    };

    let sending = {
        let updater = updater.clone();
        let folder_id = folder.id.clone();
        move || updater.is_sending(&folder_id)
    };
    let on_delete = {
        let updater = updater.clone();
        let folder = folder.clone();
        move |_| {
            updater.delete_folder(&folder);
        }
    };
    let on_move = {
        let folder = folder.clone();
        move |_| modal.open_modal(ModalContent::MoveFolder(folder.clone()))
    };

    let run_rename = run.clone();
    let run_emoji = run.clone();
    let run_bookmark = run;

    view! {
        <article class="page folder-page">
            <TitleEditor
                title=folder.name.clone()
                emoji=folder.emoji.clone()
                on_rename={move |name: String| run_rename(FolderAction::Rename(name))}
                on_emoji={move |emoji: Option<String>| run_emoji(FolderAction::Emoji(emoji))}
            />
            <p class="folder-path">{folder.pathname.clone()}</p>
            <div class="page-actions">
                <button prop:disabled=sending.clone() on:click=move |_| run_bookmark(FolderAction::Bookmark)>
                    {if folder.bookmarked { "Unbookmark" } else { "Bookmark" }}
                </button>
                <button prop:disabled=sending.clone() on:click=on_move>"Move"</button>
                <button class="danger" prop:disabled=sending on:click=on_delete>"Delete"</button>
            </div>
            <p class="folder-counts">
                {format!("{} folders, {} docs", folder.child_folders_ids.len(), folder.child_docs_ids.len())}
            </p>
        </article>
    }
}
