//! Team request and response bodies.

use serde::{Deserialize, Serialize};

use crate::models::{Doc, Folder, Team, TeamIcon, Workspace};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal: Option<bool>,
}

/// Raw image picked in the settings form
#[derive(Debug, Clone)]
pub struct IconUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamResponse {
    pub team: Team,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamsResponse {
    pub teams: Vec<Team>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamIconResponse {
    pub icon: TeamIcon,
}

/// Everything the sidebar needs for one team
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TeamResources {
    pub workspaces: Vec<Workspace>,
    pub folders: Vec<Folder>,
    pub docs: Vec<Doc>,
}
