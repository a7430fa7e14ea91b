//! Confirmation Dialogs
//!
//! Message boxes with role-tagged buttons. Destructive cloud operations
//! only reach the network through a button's `on_click`.

use std::sync::Arc;

use futures::future::LocalBoxFuture;
use leptos::prelude::*;

pub type ClickHandler = Arc<dyn Fn() -> LocalBoxFuture<'static, ()> + Send + Sync>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    #[default]
    Secondary,
    Primary,
    Danger,
}

impl ButtonVariant {
    pub fn class(&self) -> &'static str {
        match self {
            ButtonVariant::Secondary => "btn secondary",
            ButtonVariant::Primary => "btn primary",
            ButtonVariant::Danger => "btn danger",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogIconType {
    Info,
    Warning,
    Question,
}

#[derive(Clone)]
pub struct DialogButton {
    pub variant: ButtonVariant,
    pub label: String,
    /// Pressed on Escape
    pub cancel_button: bool,
    /// Focused when the dialog opens
    pub default_button: bool,
    pub on_click: Option<ClickHandler>,
}

impl DialogButton {
    /// Secondary button that only closes the dialog
    pub fn cancel(label: impl Into<String>) -> Self {
        Self {
            variant: ButtonVariant::Secondary,
            label: label.into(),
            cancel_button: true,
            default_button: true,
            on_click: None,
        }
    }

    pub fn danger<F>(label: impl Into<String>, on_click: F) -> Self
    where
        F: Fn() -> LocalBoxFuture<'static, ()> + Send + Sync + 'static,
    {
        Self {
            variant: ButtonVariant::Danger,
            label: label.into(),
            cancel_button: false,
            default_button: false,
            on_click: Some(Arc::new(on_click)),
        }
    }
}

#[derive(Clone)]
pub struct MessageBoxOptions {
    pub title: String,
    pub message: String,
    pub icon_type: Option<DialogIconType>,
    pub buttons: Vec<DialogButton>,
}

impl MessageBoxOptions {
    pub fn cancel_index(&self) -> Option<usize> {
        self.buttons.iter().position(|button| button.cancel_button)
    }

    pub fn default_index(&self) -> Option<usize> {
        self.buttons.iter().position(|button| button.default_button)
    }
}

#[derive(Clone, Copy)]
pub struct DialogStore {
    dialogs: RwSignal<Vec<(u64, MessageBoxOptions)>>,
    next_id: StoredValue<u64>,
}

impl DialogStore {
    pub fn new() -> Self {
        Self {
            dialogs: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    /// Open a message box on top of the stack
    pub fn message_box(&self, options: MessageBoxOptions) -> u64 {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.dialogs.update(|dialogs| dialogs.push((id, options)));
        id
    }

    /// Topmost open dialog
    pub fn current(&self) -> Signal<Option<(u64, MessageBoxOptions)>> {
        let dialogs = self.dialogs;
        Signal::derive(move || dialogs.with(|dialogs| dialogs.last().cloned()))
    }

    pub fn close(&self, id: u64) {
        self.dialogs.update(|dialogs| dialogs.retain(|(dialog_id, _)| *dialog_id != id));
    }

    /// Close the dialog and run the pressed button's handler
    pub async fn press(&self, id: u64, index: usize) {
        let handler = self.dialogs.with_untracked(|dialogs| {
            dialogs
                .iter()
                .find(|(dialog_id, _)| *dialog_id == id)
                .and_then(|(_, options)| options.buttons.get(index))
                .and_then(|button| button.on_click.clone())
        });
        self.close(id);
        if let Some(handler) = handler {
            handler().await;
        }
    }

    /// Escape key: behave as the cancel button, or just close
    pub async fn cancel(&self, id: u64) {
        let cancel = self.dialogs.with_untracked(|dialogs| {
            dialogs
                .iter()
                .find(|(dialog_id, _)| *dialog_id == id)
                .and_then(|(_, options)| options.cancel_index())
        });
        match cancel {
            Some(index) => self.press(id, index).await,
            None => self.close(id),
        }
    }
}

impl Default for DialogStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the dialog store from context
pub fn use_dialog() -> DialogStore {
    expect_context::<DialogStore>()
}
