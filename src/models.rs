//! Frontend Models
//!
//! Data structures matching the cloud API entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Document (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doc {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub emoji: Option<String>,
    pub team_id: String,
    pub workspace_id: String,
    #[serde(default)]
    pub parent_folder_id: Option<String>,
    #[serde(default)]
    pub folder_pathname: String,
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub bookmarked: bool,
}

impl Doc {
    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }
}

/// Folder with ordered child id sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub emoji: Option<String>,
    pub team_id: String,
    pub workspace_id: String,
    #[serde(default)]
    pub parent_folder_id: Option<String>,
    pub pathname: String,
    #[serde(default)]
    pub child_docs_ids: Vec<String>,
    #[serde(default)]
    pub child_folders_ids: Vec<String>,
    #[serde(default)]
    pub bookmarked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: String,
    pub name: String,
    pub team_id: String,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamIcon {
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    pub domain: String,
    #[serde(default)]
    pub personal: bool,
    #[serde(default)]
    pub icon: Option<TeamIcon>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadStatus {
    Open,
    Closed,
}

/// Comment thread attached to a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    pub id: String,
    pub doc_id: String,
    pub status: ThreadStatus,
    #[serde(default)]
    pub comment_count: u32,
    #[serde(default)]
    pub selection: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub thread_id: String,
    pub message: String,
    #[serde(default)]
    pub user_name: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
