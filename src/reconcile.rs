//! Reconciliation
//!
//! Merges a successful server response into the entity store and works out
//! how the page context has to follow. Pure: no signals, no network.

use std::collections::HashSet;

use crate::api::{
    DestroyDocResponse, DestroyFolderResponse, DestroyWorkspaceResponse, UpdateDocResponse,
    UpdateFolderResponse,
};
use crate::models::{Doc, Folder, Workspace};
use crate::nav::NavState;
use crate::page::{PagePatch, PagePointer, Refresh};

/// Successful result of one cloud operation
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    DocCreated(Doc),
    FolderCreated(Folder),
    DocUpdated(UpdateDocResponse),
    FolderUpdated(UpdateFolderResponse),
    DocArchiveToggled(Doc),
    DocBookmarkToggled(Doc),
    DocEmojiUpdated(Doc),
    FolderBookmarkToggled(Folder),
    FolderEmojiUpdated(Folder),
    DocDestroyed {
        id: String,
        response: DestroyDocResponse,
    },
    FolderDestroyed {
        id: String,
        response: DestroyFolderResponse,
    },
    WorkspaceDestroyed {
        id: String,
        response: DestroyWorkspaceResponse,
    },
}

/// Apply `outcome` to `nav`. Returns the page patch to merge afterwards.
///
/// The page doc or folder is refreshed when the outcome names it (merged,
/// removed or reassigned) or when pruning changed it. An entry that is gone
/// from the maps clears its page slot.
pub fn apply(nav: &mut NavState, page: &PagePointer, outcome: Outcome) -> PagePatch {
    let before_doc = page.doc_id.as_ref().and_then(|id| nav.docs_map.get(id).cloned());
    let before_folder = page.folder_id.as_ref().and_then(|id| nav.folders_map.get(id).cloned());

    let mut merge = Merge::new(nav);
    match outcome {
        Outcome::DocCreated(doc) => merge.docs([doc]),
        Outcome::FolderCreated(mut folder) => {
            folder.child_docs_ids.clear();
            folder.child_folders_ids.clear();
            merge.folders([folder]);
        }
        Outcome::DocUpdated(UpdateDocResponse { doc, folders, workspaces }) => {
            merge.folders(folders);
            merge.workspaces(workspaces);
            merge.docs([doc]);
        }
        Outcome::FolderUpdated(UpdateFolderResponse { folders, docs, workspaces }) => {
            merge.folders(folders);
            merge.docs(docs);
            merge.workspaces(workspaces);
        }
        Outcome::DocArchiveToggled(doc)
        | Outcome::DocBookmarkToggled(doc)
        | Outcome::DocEmojiUpdated(doc) => merge.docs([doc]),
        Outcome::FolderBookmarkToggled(folder) | Outcome::FolderEmojiUpdated(folder) => {
            merge.folders([folder])
        }
        Outcome::DocDestroyed { id, response } => merge.destroy_doc(id, response),
        Outcome::FolderDestroyed { id, response } => merge.destroy_folder(id, response),
        Outcome::WorkspaceDestroyed { id, response } => merge.destroy_workspace(id, response),
    }
    merge.settle(page, before_doc, before_folder)
}

/// Map mutations of one outcome, with the ids they touched
struct Merge<'a> {
    nav: &'a mut NavState,
    docs: HashSet<String>,
    folders: HashSet<String>,
    removed_docs: HashSet<String>,
    removed_folders: HashSet<String>,
}

impl<'a> Merge<'a> {
    fn new(nav: &'a mut NavState) -> Self {
        Self {
            nav,
            docs: HashSet::new(),
            folders: HashSet::new(),
            removed_docs: HashSet::new(),
            removed_folders: HashSet::new(),
        }
    }

    fn docs(&mut self, docs: impl IntoIterator<Item = Doc>) {
        for doc in docs {
            self.docs.insert(doc.id.clone());
            self.nav.update_docs_map([doc]);
        }
    }

    fn folders(&mut self, folders: impl IntoIterator<Item = Folder>) {
        for folder in folders {
            self.folders.insert(folder.id.clone());
            self.nav.update_folders_map([folder]);
        }
    }

    fn workspaces(&mut self, workspaces: Option<Vec<Workspace>>) {
        if let Some(workspaces) = workspaces {
            self.nav.update_workspaces_map(workspaces);
        }
    }

    fn remove_docs(&mut self, ids: impl IntoIterator<Item = String>) {
        for id in ids {
            self.nav.remove_from_docs_map([&id]);
            self.docs.insert(id.clone());
            self.removed_docs.insert(id);
        }
    }

    fn remove_folders(&mut self, ids: impl IntoIterator<Item = String>) {
        for id in ids {
            self.nav.remove_from_folders_map([&id]);
            self.folders.insert(id.clone());
            self.removed_folders.insert(id);
        }
    }

    fn destroy_doc(&mut self, id: String, response: DestroyDocResponse) {
        self.remove_docs([id]);
        self.folders(response.parent_folder);
        self.workspaces(response.workspace.map(|w| vec![w]));
        // tombstone replaces the removed entry
        self.docs(response.doc);
    }

    fn destroy_folder(&mut self, id: String, response: DestroyFolderResponse) {
        let DestroyFolderResponse {
            parent_folder,
            workspace,
            docs,
            docs_ids,
            folders_ids,
        } = response;

        self.remove_folders(folders_ids.into_iter().chain([id.clone()]));
        match docs {
            Some(docs) => self.docs(docs),
            None => self.remove_docs(docs_ids),
        }
        if let Some(mut parent) = parent_folder {
            parent.child_folders_ids.retain(|child| *child != id);
            self.folders([parent]);
        }
        self.workspaces(workspace.map(|w| vec![w]));
    }

    fn destroy_workspace(&mut self, id: String, response: DestroyWorkspaceResponse) {
        self.nav.remove_from_workspaces_map([&id]);
        let doc_ids = self.nav.docs_in_workspace(&id);
        let folder_ids = self.nav.folders_in_workspace(&id);

        match response.public_workspace {
            Some(fallback) => {
                for doc_id in doc_ids {
                    if let Some(doc) = self.nav.docs_map.get_mut(&doc_id) {
                        doc.workspace_id = fallback.id.clone();
                    }
                    self.docs.insert(doc_id);
                }
                for folder_id in folder_ids {
                    if let Some(folder) = self.nav.folders_map.get_mut(&folder_id) {
                        folder.workspace_id = fallback.id.clone();
                    }
                    self.folders.insert(folder_id);
                }
                self.nav.update_workspaces_map([fallback]);
            }
            None => {
                self.remove_docs(doc_ids);
                self.remove_folders(folder_ids);
            }
        }
    }

    /// Prune dangling child ids, then follow the page pointer
    fn settle(self, page: &PagePointer, before_doc: Option<Doc>, before_folder: Option<Folder>) -> PagePatch {
        let Merge {
            nav,
            docs,
            folders,
            removed_docs,
            removed_folders,
        } = self;
        nav.prune_children(&removed_docs, &removed_folders);

        let mut patch = PagePatch::default();
        if let Some(folder_id) = &page.folder_id {
            let after = nav.folders_map.get(folder_id).cloned();
            if folders.contains(folder_id) || after != before_folder {
                patch.page_folder = match after {
                    Some(folder) => {
                        nav.current_path = folder.pathname.clone();
                        Refresh::Replace(folder)
                    }
                    None => Refresh::Cleared,
                };
            }
        }
        if let Some(doc_id) = &page.doc_id {
            let after = nav.docs_map.get(doc_id).cloned();
            if docs.contains(doc_id) || after != before_doc {
                patch.page_doc = match after {
                    Some(doc) => {
                        nav.current_path = doc.folder_pathname.clone();
                        Refresh::Replace(doc)
                    }
                    None => Refresh::Cleared,
                };
            }
        }
        patch
    }
}
