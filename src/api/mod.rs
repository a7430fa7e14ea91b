//! Cloud API Bindings
//!
//! Request/response bodies per resource and the `CloudApi` seam used by
//! the updater, the comments store and the settings form.

mod comments;
mod docs;
mod folders;
mod http;
#[cfg(test)]
pub mod mock;
mod teams;
mod workspaces;

use std::ops::Deref;
use std::sync::Arc;

use async_trait::async_trait;
use leptos::prelude::*;

use crate::error::ApiResult;
use crate::models::{Comment, Doc, Folder, Team, TeamIcon, Thread, ThreadStatus};

pub use comments::*;
pub use docs::*;
pub use folders::*;
pub use http::HttpCloudApi;
pub use teams::*;
pub use workspaces::*;

/// Remote operations of the cloud service.
///
/// Futures are not `Send`: the client runs on the browser event loop.
#[async_trait(?Send)]
pub trait CloudApi: Send + Sync {
    // Teams
    async fn list_teams(&self) -> ApiResult<Vec<Team>>;
    async fn get_team_resources(&self, team_id: &str) -> ApiResult<TeamResources>;
    async fn update_team(&self, team_id: &str, body: &UpdateTeamRequest) -> ApiResult<Team>;
    async fn update_team_icon(&self, team_id: &str, upload: IconUpload) -> ApiResult<TeamIcon>;

    // Docs
    async fn create_doc(&self, team_id: &str, body: &CreateDocRequest) -> ApiResult<DocResponse>;
    async fn update_doc(
        &self,
        team_id: &str,
        doc_id: &str,
        body: &UpdateDocRequest,
    ) -> ApiResult<UpdateDocResponse>;
    async fn update_doc_emoji(&self, doc: &Doc, emoji: Option<&str>) -> ApiResult<DocResponse>;
    async fn archive_doc(&self, team_id: &str, doc_id: &str) -> ApiResult<DocResponse>;
    async fn unarchive_doc(&self, team_id: &str, doc_id: &str) -> ApiResult<DocResponse>;
    async fn destroy_doc(&self, team_id: &str, doc_id: &str) -> ApiResult<DestroyDocResponse>;
    async fn create_doc_bookmark(&self, team_id: &str, doc_id: &str) -> ApiResult<DocResponse>;
    async fn destroy_doc_bookmark(&self, team_id: &str, doc_id: &str) -> ApiResult<DocResponse>;

    // Folders
    async fn create_folder(&self, team_id: &str, body: &CreateFolderRequest) -> ApiResult<FolderResponse>;
    async fn update_folder(
        &self,
        team_id: &str,
        folder_id: &str,
        body: &UpdateFolderRequest,
    ) -> ApiResult<UpdateFolderResponse>;
    async fn update_folder_emoji(&self, folder: &Folder, emoji: Option<&str>) -> ApiResult<FolderResponse>;
    async fn destroy_folder(&self, team_id: &str, folder_id: &str) -> ApiResult<DestroyFolderResponse>;
    async fn create_folder_bookmark(&self, team_id: &str, folder_id: &str) -> ApiResult<FolderResponse>;
    async fn destroy_folder_bookmark(&self, team_id: &str, folder_id: &str) -> ApiResult<FolderResponse>;

    // Workspaces
    async fn destroy_workspace(
        &self,
        team_id: &str,
        workspace_id: &str,
        delete_docs: bool,
    ) -> ApiResult<DestroyWorkspaceResponse>;

    // Comments
    async fn list_doc_threads(&self, doc_id: &str) -> ApiResult<Vec<Thread>>;
    async fn create_thread(&self, doc_id: &str, body: &CreateThreadRequest) -> ApiResult<Thread>;
    async fn update_thread_status(&self, thread_id: &str, status: ThreadStatus) -> ApiResult<Thread>;
    async fn delete_thread(&self, thread_id: &str) -> ApiResult<()>;
    async fn list_thread_comments(&self, thread_id: &str) -> ApiResult<Vec<Comment>>;
    async fn create_comment(&self, thread_id: &str, message: &str) -> ApiResult<Comment>;
    async fn update_comment(&self, comment_id: &str, message: &str) -> ApiResult<Comment>;
    async fn delete_comment(&self, comment_id: &str) -> ApiResult<()>;
}

/// Shared handle to the API, provided via context
#[derive(Clone)]
pub struct ApiHandle(Arc<dyn CloudApi>);

impl ApiHandle {
    pub fn new(api: impl CloudApi + 'static) -> Self {
        Self(Arc::new(api))
    }
}

impl Deref for ApiHandle {
    type Target = dyn CloudApi;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Get the API handle from context
pub fn use_api() -> ApiHandle {
    expect_context::<ApiHandle>()
}
