//! Message Box Component
//!
//! Renders the topmost confirmation dialog. Escape acts as the cancel
//! button.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::dialog::{use_dialog, DialogIconType};

fn icon_glyph(icon: DialogIconType) -> &'static str {
    match icon {
        DialogIconType::Info => "ℹ",
        DialogIconType::Warning => "⚠",
        DialogIconType::Question => "?",
    }
}

#[component]
pub fn MessageBox() -> impl IntoView {
    let dialog = use_dialog();
    let current = dialog.current();

    let handle = window_event_listener(leptos::ev::keydown, move |ev| {
        if ev.key() != "Escape" {
            return;
        }
        if let Some((id, _)) = current.get_untracked() {
            ev.prevent_default();
            spawn_local(async move { dialog.cancel(id).await });
        }
    });
    on_cleanup(move || handle.remove());

    view! {
        {move || current.get().map(|(id, options)| {
            let default_index = options.default_index();
            view! {
                <div class="dialog-backdrop">
                    <div class="dialog" role="alertdialog">
                        <div class="dialog-header">
                            {options.icon_type.map(|icon| view! { <span class="dialog-icon">{icon_glyph(icon)}</span> })}
                            <h3>{options.title.clone()}</h3>
                        </div>
                        <p class="dialog-message">{options.message.clone()}</p>
                        <div class="dialog-buttons">
                            {options.buttons.iter().enumerate().map(|(index, button)| {
                                view! {
                                    <button
                                        class=button.variant.class()
                                        autofocus=default_index == Some(index)
                                        on:click=move |_| spawn_local(async move { dialog.press(id, index).await })
                                    >
                                        {button.label.clone()}
                                    </button>
                                }
                            }).collect_view()}
                        </div>
                    </div>
                </div>
            }
        })}
    }
}
