//! Toast List Component

use leptos::prelude::*;

use crate::toast::use_toast;

#[component]
pub fn ToastList() -> impl IntoView {
    let toast = use_toast();
    let messages = toast.messages();

    view! {
        <div class="toast-list">
            <For
                each=move || messages.get()
                key=|(id, _)| *id
                children=move |(id, message)| view! {
                    <div class=message.kind.class() on:click=move |_| toast.dismiss(id)>
                        <strong class="toast-title">{message.title}</strong>
                        <span class="toast-description">{message.description}</span>
                    </div>
                }
            />
        </div>
    }
}
