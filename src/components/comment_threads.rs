//! Comment Threads Component
//!
//! Threads of the page doc, newest first, each expandable to its comments.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::CreateThreadRequest;
use crate::comments::{use_comments, use_doc_threads, use_thread_comments};
use crate::models::{Comment, Thread, ThreadStatus};
use crate::toast::{use_toast, ToastMessage};

#[component]
pub fn CommentThreads(#[prop(into)] doc_id: String) -> impl IntoView {
    let comments = use_comments();
    let toast = use_toast();
    let threads = use_doc_threads(doc_id.clone());
    let (draft, set_draft) = signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let message = draft.get().trim().to_string();
        if message.is_empty() {
            return;
        }
        let doc_id = doc_id.clone();
        spawn_local(async move {
            let body = CreateThreadRequest {
                selection: None,
                message,
            };
            match comments.create_thread(&doc_id, body).await {
                Ok(_) => set_draft.set(String::new()),
                Err(e) => {
                    log::error!("[comments] create thread failed: {}", e);
                    toast.push_message(ToastMessage::error("Error", "Could not create the thread"));
                }
            }
        });
    };

    view! {
        <section class="comment-threads">
            <h3>"Comments"</h3>
            <form class="new-thread-form" on:submit=on_submit>
                <input
                    type="text"
                    placeholder="Start a thread..."
                    prop:value=move || draft.get()
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                />
                <button type="submit">"Comment"</button>
            </form>
            {move || match threads.get() {
                None => view! { <p class="loading">"Loading threads..."</p> }.into_any(),
                Some(list) if list.is_empty() => view! { <p class="empty">"No comments yet"</p> }.into_any(),
                Some(list) => list
                    .into_iter()
                    .map(|thread| view! { <ThreadView thread=thread /> })
                    .collect_view()
                    .into_any(),
            }}
        </section>
    }
}

#[component]
fn ThreadView(thread: Thread) -> impl IntoView {
    let store = use_comments();
    let toast = use_toast();
    let (expanded, set_expanded) = signal(false);
    let thread_id = thread.id.clone();

    let toggle_status = {
        let thread_id = thread_id.clone();
        let next = match thread.status {
            ThreadStatus::Open => ThreadStatus::Closed,
            ThreadStatus::Closed => ThreadStatus::Open,
        };
        move |_| {
            let thread_id = thread_id.clone();
            spawn_local(async move {
                if let Err(e) = store.set_thread_status(&thread_id, next).await {
                    log::error!("[comments] status change failed: {}", e);
                    toast.push_message(ToastMessage::error("Error", "Could not update the thread"));
                }
            });
        }
    };

    let deleting = RwSignal::new(false);
    let delete_thread = {
        let thread_id = thread_id.clone();
        move |_: ()| {
            let thread_id = thread_id.clone();
            deleting.set(true);
            spawn_local(async move {
                if let Err(e) = store.delete_thread(&thread_id).await {
                    log::error!("[comments] delete thread failed: {}", e);
                    toast.push_message(ToastMessage::error("Error", "Could not delete the thread"));
                }
                // gone on success
                deleting.try_set(false);
            });
        }
    };

    let status_label = match thread.status {
        ThreadStatus::Open => "Resolve",
        ThreadStatus::Closed => "Reopen",
    };
    let thread_for_comments = thread.clone();

    view! {
        <div class=if thread.status == ThreadStatus::Open { "thread open" } else { "thread closed" }>
            <div class="thread-header" on:click=move |_| set_expanded.update(|v| *v = !*v)>
                {thread.selection.clone().map(|selection| view! { <blockquote>{selection}</blockquote> })}
                <span class="thread-count">{format!("{} comments", thread.comment_count)}</span>
                <span class="thread-date">{thread.created_at.format("%Y-%m-%d %H:%M").to_string()}</span>
                <button class="thread-status-btn" on:click=toggle_status>{status_label}</button>
                <ConfirmDelete prompt="Delete thread?" busy=deleting on_confirm=delete_thread />
            </div>
            <Show when=move || expanded.get()>
                <ThreadComments thread=thread_for_comments.clone() />
            </Show>
        </div>
    }
}

#[component]
fn ThreadComments(thread: Thread) -> impl IntoView {
    let store = use_comments();
    let toast = use_toast();
    let comments = use_thread_comments(&thread);
    let (draft, set_draft) = signal(String::new());
    let thread_id = thread.id.clone();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let message = draft.get().trim().to_string();
        if message.is_empty() {
            return;
        }
        let thread_id = thread_id.clone();
        spawn_local(async move {
            match store.create_comment(&thread_id, &message).await {
                Ok(_) => set_draft.set(String::new()),
                Err(e) => {
                    log::error!("[comments] create comment failed: {}", e);
                    toast.push_message(ToastMessage::error("Error", "Could not post the comment"));
                }
            }
        });
    };

    view! {
        <div class="thread-comments">
            {move || match comments.get() {
                None => view! { <p class="loading">"Loading comments..."</p> }.into_any(),
                Some(list) => list
                    .into_iter()
                    .map(|comment| view! { <CommentView comment=comment /> })
                    .collect_view()
                    .into_any(),
            }}
            <form class="reply-form" on:submit=on_submit>
                <input
                    type="text"
                    placeholder="Reply..."
                    prop:value=move || draft.get()
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                />
                <button type="submit">"Reply"</button>
            </form>
        </div>
    }
}

#[component]
fn CommentView(comment: Comment) -> impl IntoView {
    let store = use_comments();
    let toast = use_toast();
    let (editing, set_editing) = signal(false);
    let (draft, set_draft) = signal(comment.message.clone());

    let save = {
        let comment_id = comment.id.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let message = draft.get().trim().to_string();
            let comment_id = comment_id.clone();
            set_editing.set(false);
            if message.is_empty() {
                return;
            }
            spawn_local(async move {
                if let Err(e) = store.update_comment(&comment_id, &message).await {
                    log::error!("[comments] edit failed: {}", e);
                    toast.push_message(ToastMessage::error("Error", "Could not edit the comment"));
                }
            });
        }
    };

    let deleting = RwSignal::new(false);
    let remove = {
        let comment = comment.clone();
        move |_: ()| {
            let comment = comment.clone();
            deleting.set(true);
            spawn_local(async move {
                if let Err(e) = store.delete_comment(&comment).await {
                    log::error!("[comments] delete comment failed: {}", e);
                    toast.push_message(ToastMessage::error("Error", "Could not delete the comment"));
                }
                deleting.try_set(false);
            });
        }
    };

    let author = comment.user_name.clone().unwrap_or_else(|| "Someone".to_string());
    let edited = comment.updated_at.is_some();
    let message = comment.message.clone();

    view! {
        <div class="comment">
            <div class="comment-meta">
                <strong>{author}</strong>
                <span class="comment-date">{comment.created_at.format("%Y-%m-%d %H:%M").to_string()}</span>
                {edited.then(|| view! { <span class="comment-edited">"(edited)"</span> })}
            </div>
            {move || if editing.get() {
                view! {
                    <form class="comment-edit-form" on:submit=save.clone()>
                        <input
                            type="text"
                            prop:value=move || draft.get()
                            on:input=move |ev| set_draft.set(event_target_value(&ev))
                        />
                        <button type="submit">"Save"</button>
                    </form>
                }.into_any()
            } else {
                let message = message.clone();
                view! {
                    <p class="comment-message" on:dblclick=move |_| set_editing.set(true)>{message}</p>
                }.into_any()
            }}
            <ConfirmDelete prompt="Delete comment?" busy=deleting on_confirm=remove />
        </div>
    }
}

/// Inline prompt for comment-sized deletions, which skip the dialog
#[component]
fn ConfirmDelete(
    prompt: &'static str,
    /// Request in flight
    #[prop(into)]
    busy: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let asking = RwSignal::new(false);

    let ask = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        asking.set(true);
    };
    let confirm = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        asking.set(false);
        on_confirm.run(());
    };
    let keep = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        asking.set(false);
    };
    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" {
            asking.set(false);
        }
    };

    view! {
        {move || if busy.get() {
            view! { <span class="delete-pending">"Deleting..."</span> }.into_any()
        } else if asking.get() {
            view! {
                <span class="delete-confirm" on:keydown=on_keydown>
                    <span class="delete-confirm-text">{prompt}</span>
                    <button class="confirm-btn" on:click=confirm>"Delete"</button>
                    <button class="cancel-btn" on:click=keep>"Keep"</button>
                </span>
            }
            .into_any()
        } else {
            view! { <button class="delete-btn" title=prompt on:click=ask>"×"</button> }.into_any()
        }}
    }
}
