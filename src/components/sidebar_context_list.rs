//! Sidebar Context List Component
//!
//! Keyboard-navigable container for sidebar rows. Focuses itself on mount,
//! answers the global "focus left side" shortcut and moves focus between
//! rows with the arrow keys.

use leptos::html::Div;
use leptos::prelude::*;
use leptos_keynav::{
    focus_first_child_from_element, focus_left_container, is_focus_left_side_shortcut,
    navigate_up_down, prevent_keyboard_event_propagation, use_global_keydown_handler, KeyPress,
};

#[component]
pub fn SidebarContextList(
    #[prop(optional, into)] class: String,
    /// Fired only when focus leaves the whole list
    #[prop(optional, into)]
    on_blur: Option<Callback<()>>,
    children: Children,
) -> impl IntoView {
    let list_ref = NodeRef::<Div>::new();

    Effect::new(move |_| {
        if let Some(el) = list_ref.get() {
            let _ = el.focus();
        }
    });

    use_global_keydown_handler(move |ev: web_sys::KeyboardEvent| {
        if !is_focus_left_side_shortcut(&KeyPress::from_event(&ev)) {
            return;
        }
        prevent_keyboard_event_propagation(&ev);
        if let Some(el) = list_ref.get_untracked() {
            focus_first_child_from_element(Some(AsRef::<web_sys::Element>::as_ref(&el)));
        }
    });

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if let Some(el) = list_ref.get_untracked() {
            navigate_up_down(&el, &ev);
        }
    };

    let on_focusout = move |ev: web_sys::FocusEvent| {
        let Some(on_blur) = on_blur else {
            return;
        };
        let el = list_ref.get_untracked();
        let container: Option<&web_sys::Node> = el
            .as_ref()
            .map(|el| AsRef::<web_sys::Node>::as_ref(el));
        if focus_left_container(container, ev.related_target()) {
            on_blur.run(());
        }
    };

    view! {
        <div
            class=format!("sidebar-context-list {}", class)
            tabindex="0"
            node_ref=list_ref
            on:keydown=on_keydown
            on:focusout=on_focusout
        >
            {children()}
        </div>
    }
}
