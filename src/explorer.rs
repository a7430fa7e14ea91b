//! Workspace Explorer Utilities
//!
//! Ordering and tree flattening for the move-item explorer.

use std::collections::{HashMap, HashSet};

use crate::models::{Doc, Folder, Workspace};
use crate::nav::NavState;

/// Public workspaces first, then private ones, each by name (case-insensitive)
pub fn sort_workspaces(workspaces: &mut [Workspace]) {
    workspaces.sort_by(|a, b| {
        b.public
            .cmp(&a.public)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
}

pub fn sort_folders_by_name(folders: &mut [Folder]) {
    folders.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
}

/// Folders of one workspace as an indented tree using recursive DFS.
/// Returns (Folder, depth) pairs in display order, siblings by name.
pub fn flatten_folder_tree(folders: &[Folder], workspace_id: &str) -> Vec<(Folder, usize)> {
    let in_workspace: Vec<&Folder> = folders
        .iter()
        .filter(|f| f.workspace_id == workspace_id)
        .collect();
    let known: HashSet<&str> =
        in_workspace.iter().map(|f| f.id.as_str()).collect();

    // A parent outside the workspace makes the folder a root
    let mut children_map: HashMap<Option<&str>, Vec<&Folder>> = HashMap::new();
    for folder in in_workspace.iter().copied() {
        let parent = folder
            .parent_folder_id
            .as_deref()
            .filter(|parent| known.contains(parent));
        children_map.entry(parent).or_default().push(folder);
    }
    for children in children_map.values_mut() {
        children.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    }

    fn collect<'a>(
        parent_id: Option<&'a str>,
        depth: usize,
        children_map: &HashMap<Option<&'a str>, Vec<&'a Folder>>,
        result: &mut Vec<(Folder, usize)>,
    ) {
        if let Some(children) = children_map.get(&parent_id) {
            for folder in children {
                result.push(((*folder).clone(), depth));
                collect(Some(folder.id.as_str()), depth + 1, children_map, result);
            }
        }
    }

    let mut result = Vec::new();
    collect(None, 0, &children_map, &mut result);
    result
}

/// Destination picked in the move modal; nothing to move without a workspace
pub fn move_destination(
    workspace_id: Option<String>,
    folder_id: Option<String>,
) -> Option<(String, Option<String>)> {
    workspace_id.map(|workspace_id| (workspace_id, folder_id))
}

/// One row of the sidebar tree
#[derive(Clone, Debug, PartialEq)]
pub enum SidebarRow {
    Folder(Folder, usize),
    Doc(Doc, usize),
}

impl SidebarRow {
    pub fn key(&self) -> String {
        match self {
            SidebarRow::Folder(folder, _) => format!("folder:{}", folder.id),
            SidebarRow::Doc(doc, _) => format!("doc:{}", doc.id),
        }
    }
}

/// Folder tree of a workspace with each folder's docs right below it,
/// then the workspace's root docs. Archived docs are left out.
pub fn sidebar_rows(nav: &NavState, workspace_id: &str) -> Vec<SidebarRow> {
    let folders: Vec<Folder> = nav.folders_map.values().cloned().collect();
    let mut docs_by_parent: HashMap<Option<&str>, Vec<&Doc>> = HashMap::new();
    for doc in nav.docs_map.values() {
        if doc.workspace_id != workspace_id || doc.is_archived() {
            continue;
        }
        let parent = doc
            .parent_folder_id
            .as_deref()
            .filter(|id| nav.folders_map.contains_key(*id));
        docs_by_parent.entry(parent).or_default().push(doc);
    }
    for docs in docs_by_parent.values_mut() {
        docs.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
    }

    let mut rows = Vec::new();
    for (folder, depth) in flatten_folder_tree(&folders, workspace_id) {
        let docs = docs_by_parent.get(&Some(folder.id.as_str())).cloned();
        rows.push(SidebarRow::Folder(folder, depth));
        for doc in docs.unwrap_or_default() {
            rows.push(SidebarRow::Doc(doc.clone(), depth + 1));
        }
    }
    for doc in docs_by_parent.remove(&None).unwrap_or_default() {
        rows.push(SidebarRow::Doc(doc.clone(), 0));
    }
    rows
}
