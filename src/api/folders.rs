//! Folder request and response bodies.

use serde::{Deserialize, Serialize};

use crate::models::{Doc, Folder, Workspace};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    pub name: String,
    pub workspace_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_folder_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFolderRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_folder_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FolderResponse {
    pub folder: Folder,
}

/// Renames and moves touch every folder and doc below the target
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFolderResponse {
    #[serde(default)]
    pub folders: Vec<Folder>,
    #[serde(default)]
    pub docs: Vec<Doc>,
    #[serde(default)]
    pub workspaces: Option<Vec<Workspace>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DestroyFolderResponse {
    pub parent_folder: Option<Folder>,
    pub workspace: Option<Workspace>,
    /// Present when the server keeps the docs (soft delete)
    pub docs: Option<Vec<Doc>>,
    pub docs_ids: Vec<String>,
    pub folders_ids: Vec<String>,
}
