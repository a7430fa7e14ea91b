//! Doc request and response bodies.

use serde::{Deserialize, Serialize};

use crate::models::{Doc, Folder, Workspace};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocRequest {
    pub title: String,
    pub workspace_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_folder_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

/// Partial update; a move sets `workspace_id` and `parent_folder_id`
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_folder_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmojiRequest<'a> {
    pub emoji: Option<&'a str>,
}

/// Create, archive, bookmark and emoji responses
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocResponse {
    pub doc: Doc,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocResponse {
    pub doc: Doc,
    #[serde(default)]
    pub folders: Vec<Folder>,
    #[serde(default)]
    pub workspaces: Option<Vec<Workspace>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DestroyDocResponse {
    /// Soft-deleted replacement of the removed doc
    pub doc: Option<Doc>,
    pub parent_folder: Option<Folder>,
    pub workspace: Option<Workspace>,
}
