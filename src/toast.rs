//! Toast Notifications
//!
//! Fire-and-forget user notifications, auto-dismissed after a delay.

use leptos::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastType {
    #[default]
    Error,
    Success,
    Info,
}

impl ToastType {
    pub fn class(&self) -> &'static str {
        match self {
            ToastType::Error => "toast error",
            ToastType::Success => "toast success",
            ToastType::Info => "toast info",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToastMessage {
    pub title: String,
    pub description: String,
    pub kind: ToastType,
}

impl ToastMessage {
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind: ToastType::Error,
        }
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind: ToastType::Success,
        }
    }
}

#[derive(Clone, Copy)]
pub struct ToastStore {
    messages: RwSignal<Vec<(u64, ToastMessage)>>,
    next_id: StoredValue<u64>,
    duration_ms: u32,
}

impl ToastStore {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            messages: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
            duration_ms,
        }
    }

    pub fn messages(&self) -> Signal<Vec<(u64, ToastMessage)>> {
        self.messages.into()
    }

    pub fn push_message(&self, message: ToastMessage) -> u64 {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.messages.update(|messages| messages.push((id, message)));
        self.schedule_dismiss(id);
        id
    }

    pub fn dismiss(&self, id: u64) {
        // the timer may outlive the owner
        self.messages
            .try_update(|messages| messages.retain(|(toast_id, _)| *toast_id != id));
    }

    #[cfg(target_arch = "wasm32")]
    fn schedule_dismiss(&self, id: u64) {
        let store = *self;
        gloo_timers::callback::Timeout::new(self.duration_ms, move || store.dismiss(id)).forget();
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn schedule_dismiss(&self, _id: u64) {}
}

/// Get the toast store from context
pub fn use_toast() -> ToastStore {
    expect_context::<ToastStore>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let owner = Owner::new();
        owner.set();

        let toast = ToastStore::new(1_000);
        let first = toast.push_message(ToastMessage::error("Error", "boom"));
        let second = toast.push_message(ToastMessage::success("Success", "done"));
        assert_ne!(first, second);
        assert_eq!(toast.messages().get_untracked().len(), 2);

        toast.dismiss(first);
        let remaining = toast.messages().get_untracked();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].1.kind, ToastType::Success);
    }
}
