//! Navigation Entity Store
//!
//! Keyed maps of the docs, folders and workspaces the client currently
//! knows about. All mutation goes through the methods below.

use std::collections::{HashMap, HashSet};

use crate::api::TeamResources;
use crate::models::{Doc, Folder, Workspace};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavState {
    pub docs_map: HashMap<String, Doc>,
    pub folders_map: HashMap<String, Folder>,
    pub workspaces_map: HashMap<String, Workspace>,
    /// Folder pathname of what the main view shows
    pub current_path: String,
}

impl NavState {
    /// Replace everything with a freshly loaded team snapshot
    pub fn hydrate(&mut self, resources: TeamResources) {
        self.docs_map.clear();
        self.folders_map.clear();
        self.workspaces_map.clear();
        self.update_workspaces_map(resources.workspaces);
        self.update_folders_map(resources.folders);
        self.update_docs_map(resources.docs);
    }

    pub fn update_docs_map(&mut self, docs: impl IntoIterator<Item = Doc>) {
        for doc in docs {
            self.docs_map.insert(doc.id.clone(), doc);
        }
    }

    pub fn update_folders_map(&mut self, folders: impl IntoIterator<Item = Folder>) {
        for mut folder in folders {
            dedupe(&mut folder.child_docs_ids);
            dedupe(&mut folder.child_folders_ids);
            self.folders_map.insert(folder.id.clone(), folder);
        }
    }

    pub fn update_workspaces_map(&mut self, workspaces: impl IntoIterator<Item = Workspace>) {
        for workspace in workspaces {
            self.workspaces_map.insert(workspace.id.clone(), workspace);
        }
    }

    pub fn remove_from_docs_map<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for id in ids {
            self.docs_map.remove(id.as_ref());
        }
    }

    pub fn remove_from_folders_map<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for id in ids {
            self.folders_map.remove(id.as_ref());
        }
    }

    pub fn remove_from_workspaces_map<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for id in ids {
            self.workspaces_map.remove(id.as_ref());
        }
    }

    pub fn docs_in_workspace(&self, workspace_id: &str) -> Vec<String> {
        self.docs_map
            .values()
            .filter(|doc| doc.workspace_id == workspace_id)
            .map(|doc| doc.id.clone())
            .collect()
    }

    pub fn folders_in_workspace(&self, workspace_id: &str) -> Vec<String> {
        self.folders_map
            .values()
            .filter(|folder| folder.workspace_id == workspace_id)
            .map(|folder| folder.id.clone())
            .collect()
    }

    /// Drop child ids that no longer resolve to an entry in the maps.
    /// Only the given candidate ids are considered.
    pub fn prune_children(&mut self, doc_ids: &HashSet<String>, folder_ids: &HashSet<String>) {
        let gone_docs: HashSet<&String> = doc_ids
            .iter()
            .filter(|id| !self.docs_map.contains_key(*id))
            .collect();
        let gone_folders: HashSet<&String> = folder_ids
            .iter()
            .filter(|id| !self.folders_map.contains_key(*id))
            .collect();
        if gone_docs.is_empty() && gone_folders.is_empty() {
            return;
        }
        for folder in self.folders_map.values_mut() {
            folder.child_docs_ids.retain(|id| !gone_docs.contains(id));
            folder.child_folders_ids.retain(|id| !gone_folders.contains(id));
        }
    }
}

/// Keep the first occurrence of every id
fn dedupe(ids: &mut Vec<String>) {
    let mut seen = HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::{Doc, Folder, Workspace};

    pub fn doc(id: &str, workspace_id: &str) -> Doc {
        Doc {
            id: id.to_string(),
            title: format!("Doc {}", id),
            emoji: None,
            team_id: "t1".to_string(),
            workspace_id: workspace_id.to_string(),
            parent_folder_id: None,
            folder_pathname: "/".to_string(),
            archived_at: None,
            bookmarked: false,
        }
    }

    pub fn folder(id: &str, workspace_id: &str) -> Folder {
        Folder {
            id: id.to_string(),
            name: format!("Folder {}", id),
            emoji: None,
            team_id: "t1".to_string(),
            workspace_id: workspace_id.to_string(),
            parent_folder_id: None,
            pathname: format!("/{}", id),
            child_docs_ids: Vec::new(),
            child_folders_ids: Vec::new(),
            bookmarked: false,
        }
    }

    pub fn workspace(id: &str) -> Workspace {
        Workspace {
            id: id.to_string(),
            name: format!("Workspace {}", id),
            team_id: "t1".to_string(),
            public: false,
            default: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_update_replaces_existing_entry() {
        let mut nav = NavState::default();
        nav.update_docs_map([doc("d1", "w1")]);

        let mut renamed = doc("d1", "w1");
        renamed.title = "Renamed".to_string();
        nav.update_docs_map([renamed]);

        assert_eq!(nav.docs_map.len(), 1);
        assert_eq!(nav.docs_map["d1"].title, "Renamed");
    }

    #[test]
    fn test_folder_child_ids_are_deduped_in_order() {
        let mut nav = NavState::default();
        let mut f = folder("f1", "w1");
        f.child_docs_ids = vec!["b".into(), "a".into(), "b".into()];
        nav.update_folders_map([f]);

        assert_eq!(nav.folders_map["f1"].child_docs_ids, vec!["b", "a"]);
    }

    #[test]
    fn test_prune_children_keeps_live_ids() {
        let mut nav = NavState::default();
        let mut parent = folder("f1", "w1");
        parent.child_docs_ids = vec!["d1".into(), "d2".into()];
        parent.child_folders_ids = vec!["f2".into()];
        nav.update_folders_map([parent, folder("f2", "w1")]);
        nav.update_docs_map([doc("d2", "w1")]);

        let docs: HashSet<String> = ["d1".to_string(), "d2".to_string()].into();
        let folders: HashSet<String> = ["f2".to_string()].into();
        nav.prune_children(&docs, &folders);

        // d1 is not in the map, d2 and f2 are
        assert_eq!(nav.folders_map["f1"].child_docs_ids, vec!["d2"]);
        assert_eq!(nav.folders_map["f1"].child_folders_ids, vec!["f2"]);
    }

    #[test]
    fn test_hydrate_resets_maps() {
        let mut nav = NavState::default();
        nav.update_docs_map([doc("stale", "w9")]);
        nav.hydrate(TeamResources {
            workspaces: vec![workspace("w1")],
            folders: vec![folder("f1", "w1")],
            docs: vec![doc("d1", "w1")],
        });

        assert!(!nav.docs_map.contains_key("stale"));
        assert_eq!(nav.docs_in_workspace("w1"), vec!["d1"]);
        assert_eq!(nav.folders_in_workspace("w1"), vec!["f1"]);
    }
}
