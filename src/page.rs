//! Page Context
//!
//! What the main view currently shows, and partial patches to it.

use crate::models::{Doc, Folder, Team};

/// Change to one page slot
#[derive(Clone, Debug, PartialEq)]
pub enum Refresh<T> {
    Unchanged,
    Replace(T),
    Cleared,
}

impl<T> Default for Refresh<T> {
    fn default() -> Self {
        Refresh::Unchanged
    }
}

impl<T> Refresh<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Refresh::Unchanged)
    }

    pub fn apply_to(self, slot: &mut Option<T>) {
        match self {
            Refresh::Unchanged => {}
            Refresh::Replace(value) => *slot = Some(value),
            Refresh::Cleared => *slot = None,
        }
    }
}

/// Partial page update, the equivalent of merging a few page fields
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PagePatch {
    pub team: Option<Team>,
    pub page_doc: Refresh<Doc>,
    pub page_folder: Refresh<Folder>,
}

impl PagePatch {
    pub fn is_empty(&self) -> bool {
        self.team.is_none() && self.page_doc.is_unchanged() && self.page_folder.is_unchanged()
    }
}

/// Id-only view of the page, used by reconciliation
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PagePointer {
    pub doc_id: Option<String>,
    pub folder_id: Option<String>,
}

impl PagePointer {
    pub fn is_doc(&self, id: &str) -> bool {
        self.doc_id.as_deref() == Some(id)
    }

    pub fn is_folder(&self, id: &str) -> bool {
        self.folder_id.as_deref() == Some(id)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageData {
    pub team: Option<Team>,
    pub page_doc: Option<Doc>,
    pub page_folder: Option<Folder>,
}

impl PageData {
    pub fn pointer(&self) -> PagePointer {
        PagePointer {
            doc_id: self.page_doc.as_ref().map(|doc| doc.id.clone()),
            folder_id: self.page_folder.as_ref().map(|folder| folder.id.clone()),
        }
    }

    pub fn apply(&mut self, patch: PagePatch) {
        if let Some(team) = patch.team {
            self.team = Some(team);
        }
        patch.page_doc.apply_to(&mut self.page_doc);
        patch.page_folder.apply_to(&mut self.page_folder);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::fixtures::{doc, folder};

    #[test]
    fn test_patch_touches_only_given_slots() {
        let mut page = PageData {
            team: None,
            page_doc: Some(doc("d1", "w1")),
            page_folder: Some(folder("f1", "w1")),
        };
        page.apply(PagePatch {
            page_folder: Refresh::Cleared,
            ..Default::default()
        });

        assert_eq!(page.pointer().doc_id.as_deref(), Some("d1"));
        assert!(page.page_folder.is_none());
    }

    #[test]
    fn test_pointer_matches_by_id() {
        let page = PageData {
            page_doc: Some(doc("d1", "w1")),
            ..Default::default()
        };
        let pointer = page.pointer();
        assert!(pointer.is_doc("d1"));
        assert!(!pointer.is_doc("d2"));
        assert!(!pointer.is_folder("d1"));
    }
}
