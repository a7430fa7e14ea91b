//! Leptos Keyboard Navigation Utilities
//!
//! Focus helpers for keyboard-driven lists: a global shortcut hook,
//! up/down arrow navigation between focusable children and a
//! subtree-aware blur test.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Elements that can take keyboard focus inside a navigable list
pub const FOCUSABLE_SELECTOR: &str =
    "a[href], button:not([disabled]), input:not([disabled]), select:not([disabled]), textarea:not([disabled]), [tabindex]:not([tabindex='-1'])";

/// Snapshot of a key press, detached from the DOM event
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn from_event(ev: &web_sys::KeyboardEvent) -> Self {
        Self {
            key: ev.key(),
            ctrl: ev.ctrl_key(),
            meta: ev.meta_key(),
            alt: ev.alt_key(),
            shift: ev.shift_key(),
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

/// Arrow navigation direction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            _ => None,
        }
    }
}

/// Ctrl (or Cmd) + Left Arrow moves focus back to the left side panel
pub fn is_focus_left_side_shortcut(press: &KeyPress) -> bool {
    (press.ctrl || press.meta) && !press.alt && !press.shift && press.key == "ArrowLeft"
}

/// Index to focus after an arrow press. Clamps at both ends.
/// With nothing focused, Down picks the first entry and Up the last.
pub fn next_focus_index(current: Option<usize>, len: usize, direction: Direction) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let next = match (current, direction) {
        (None, Direction::Down) => 0,
        (None, Direction::Up) => len - 1,
        (Some(i), Direction::Down) => (i + 1).min(len - 1),
        (Some(i), Direction::Up) => i.saturating_sub(1),
    };
    Some(next)
}

pub fn prevent_keyboard_event_propagation(ev: &web_sys::KeyboardEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

/// Focusable descendants of `container` in document order
pub fn focusable_children(container: &web_sys::Element) -> Vec<web_sys::HtmlElement> {
    let Ok(nodes) = container.query_selector_all(FOCUSABLE_SELECTOR) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .collect()
}

/// Focus the first focusable descendant. Returns false when there is none.
pub fn focus_first_child_from_element(container: Option<&web_sys::Element>) -> bool {
    let Some(container) = container else {
        return false;
    };
    match focusable_children(container).first() {
        Some(first) => first.focus().is_ok(),
        None => false,
    }
}

/// Handle ArrowUp/ArrowDown inside `container`.
/// Returns true when the key was consumed.
pub fn navigate_up_down(container: &web_sys::Element, ev: &web_sys::KeyboardEvent) -> bool {
    let Some(direction) = Direction::from_key(&ev.key()) else {
        return false;
    };
    let children = focusable_children(container);
    let active = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.active_element());
    let current = active.and_then(|active| {
        children
            .iter()
            .position(|child| AsRef::<web_sys::Element>::as_ref(child) == &active)
    });

    match next_focus_index(current, children.len(), direction) {
        Some(index) => {
            prevent_keyboard_event_propagation(ev);
            let _ = children[index].focus();
            true
        }
        None => false,
    }
}

/// True when focus moved outside `container`.
/// A missing related target (focus left the page or went to body) counts as leaving.
pub fn focus_left_container(
    container: Option<&web_sys::Node>,
    related_target: Option<web_sys::EventTarget>,
) -> bool {
    let related = related_target.and_then(|target| target.dyn_into::<web_sys::Node>().ok());
    focus_outside(container, related.as_ref(), |container, related| {
        container.contains(Some(related))
    })
}

/// Containment decision behind [`focus_left_container`], over any tree.
/// Only a related target inside the container keeps focus in.
pub fn focus_outside<C, T>(
    container: Option<&C>,
    related: Option<&T>,
    contains: impl Fn(&C, &T) -> bool,
) -> bool {
    match (container, related) {
        (Some(container), Some(related)) => !contains(container, related),
        _ => true,
    }
}

/// Register a window keydown handler for the lifetime of the current owner
pub fn use_global_keydown_handler<F>(handler: F)
where
    F: Fn(web_sys::KeyboardEvent) + 'static,
{
    let handle = window_event_listener(leptos::ev::keydown, handler);
    on_cleanup(move || handle.remove());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_left_side_shortcut() {
        assert!(is_focus_left_side_shortcut(&KeyPress::new("ArrowLeft").with_ctrl()));
        assert!(is_focus_left_side_shortcut(&KeyPress::new("ArrowLeft").with_meta()));
        assert!(!is_focus_left_side_shortcut(&KeyPress::new("ArrowLeft")));
        assert!(!is_focus_left_side_shortcut(&KeyPress::new("ArrowLeft").with_ctrl().with_shift()));
        assert!(!is_focus_left_side_shortcut(&KeyPress::new("ArrowRight").with_ctrl()));
    }

    #[test]
    fn test_next_focus_index_from_nothing() {
        assert_eq!(next_focus_index(None, 3, Direction::Down), Some(0));
        assert_eq!(next_focus_index(None, 3, Direction::Up), Some(2));
        assert_eq!(next_focus_index(None, 0, Direction::Down), None);
    }

    #[test]
    fn test_next_focus_index_clamps() {
        assert_eq!(next_focus_index(Some(0), 3, Direction::Down), Some(1));
        assert_eq!(next_focus_index(Some(2), 3, Direction::Down), Some(2));
        assert_eq!(next_focus_index(Some(0), 3, Direction::Up), Some(0));
        assert_eq!(next_focus_index(Some(2), 3, Direction::Up), Some(1));
    }

    #[test]
    fn test_direction_from_key() {
        assert_eq!(Direction::from_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(Direction::from_key("ArrowDown"), Some(Direction::Down));
        assert_eq!(Direction::from_key("Enter"), None);
    }

    #[test]
    fn test_focus_left_without_related_target() {
        assert!(focus_left_container(None, None));
    }

    // paths stand in for DOM nodes: "list/row2" is inside "list"
    fn path_contains(container: &&str, node: &&str) -> bool {
        *node == *container || node.starts_with(&format!("{}/", container))
    }

    #[test]
    fn test_focus_moving_to_a_row_stays_inside() {
        assert!(!focus_outside(Some(&"list"), Some(&"list/row2"), path_contains));
        assert!(!focus_outside(Some(&"list"), Some(&"list"), path_contains));
    }

    #[test]
    fn test_focus_moving_elsewhere_leaves() {
        assert!(focus_outside(Some(&"list"), Some(&"editor/title"), path_contains));
        assert!(focus_outside(Some(&"list"), Some(&"listing"), path_contains));
        assert!(focus_outside(Some(&"list"), None::<&&str>, path_contains));
        assert!(focus_outside(None::<&&str>, Some(&"list/row2"), path_contains));
    }
}
