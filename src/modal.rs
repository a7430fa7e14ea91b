//! Modal Stack

use leptos::prelude::*;

use crate::models::{Doc, Folder};

/// What a modal layer shows
#[derive(Clone, Debug, PartialEq)]
pub enum ModalContent {
    MoveDoc(Doc),
    MoveFolder(Folder),
    /// Team settings, `conversion` turns a personal space into a team
    TeamSettings { conversion: bool },
}

#[derive(Clone, Copy)]
pub struct ModalStore {
    stack: RwSignal<Vec<ModalContent>>,
}

impl ModalStore {
    pub fn new() -> Self {
        Self {
            stack: RwSignal::new(Vec::new()),
        }
    }

    pub fn open_modal(&self, content: ModalContent) {
        self.stack.update(|stack| stack.push(content));
    }

    pub fn close_last_modal(&self) {
        self.stack.update(|stack| {
            stack.pop();
        });
    }

    pub fn modals(&self) -> Signal<Vec<ModalContent>> {
        self.stack.into()
    }
}

impl Default for ModalStore {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_modal() -> ModalStore {
    expect_context::<ModalStore>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::fixtures::doc;

    #[test]
    fn test_close_last_pops_top_only() {
        let owner = Owner::new();
        owner.set();

        let modal = ModalStore::new();
        modal.open_modal(ModalContent::TeamSettings { conversion: false });
        modal.open_modal(ModalContent::MoveDoc(doc("d1", "w1")));
        modal.close_last_modal();

        assert_eq!(
            modal.modals().get_untracked(),
            vec![ModalContent::TeamSettings { conversion: false }]
        );

        modal.close_last_modal();
        modal.close_last_modal();
        assert!(modal.modals().get_untracked().is_empty());
    }
}
