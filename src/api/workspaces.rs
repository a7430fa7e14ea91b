//! Workspace request and response bodies.

use serde::Deserialize;

use crate::models::Workspace;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DestroyWorkspaceResponse {
    /// Fallback workspace receiving the deleted workspace's content
    pub public_workspace: Option<Workspace>,
}
