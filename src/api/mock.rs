//! Scripted `CloudApi` for tests: every call is recorded by name and
//! answered from a queue of JSON replies.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::*;
use crate::error::ApiError;

#[derive(Default)]
struct Script {
    calls: Vec<String>,
    replies: HashMap<&'static str, VecDeque<ApiResult<Value>>>,
}

#[derive(Clone, Default)]
pub struct MockApi {
    script: Arc<Mutex<Script>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, call: &'static str, reply: Value) -> &Self {
        self.push(call, Ok(reply))
    }

    pub fn fail(&self, call: &'static str, error: ApiError) -> &Self {
        self.push(call, Err(error))
    }

    fn push(&self, call: &'static str, reply: ApiResult<Value>) -> &Self {
        self.script
            .lock()
            .unwrap()
            .replies
            .entry(call)
            .or_default()
            .push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.script.lock().unwrap().calls.clone()
    }

    fn respond<T: DeserializeOwned>(&self, call: &'static str) -> ApiResult<T> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(call.to_string());
        match script.replies.get_mut(call).and_then(VecDeque::pop_front) {
            Some(Ok(value)) => Ok(serde_json::from_value(value)?),
            Some(Err(e)) => Err(e),
            None => Err(ApiError::Network(format!("no reply scripted for {}", call))),
        }
    }
}

#[async_trait(?Send)]
impl CloudApi for MockApi {
    async fn list_teams(&self) -> ApiResult<Vec<Team>> {
        self.respond("list_teams")
    }

    async fn get_team_resources(&self, _team_id: &str) -> ApiResult<TeamResources> {
        self.respond("get_team_resources")
    }

    async fn update_team(&self, _team_id: &str, _body: &UpdateTeamRequest) -> ApiResult<Team> {
        self.respond("update_team")
    }

    async fn update_team_icon(&self, _team_id: &str, _upload: IconUpload) -> ApiResult<TeamIcon> {
        self.respond("update_team_icon")
    }

    async fn create_doc(&self, _team_id: &str, _body: &CreateDocRequest) -> ApiResult<DocResponse> {
        self.respond("create_doc")
    }

    async fn update_doc(
        &self,
        _team_id: &str,
        _doc_id: &str,
        _body: &UpdateDocRequest,
    ) -> ApiResult<UpdateDocResponse> {
        self.respond("update_doc")
    }

    async fn update_doc_emoji(&self, _doc: &Doc, _emoji: Option<&str>) -> ApiResult<DocResponse> {
        self.respond("update_doc_emoji")
    }

    async fn archive_doc(&self, _team_id: &str, _doc_id: &str) -> ApiResult<DocResponse> {
        self.respond("archive_doc")
    }

    async fn unarchive_doc(&self, _team_id: &str, _doc_id: &str) -> ApiResult<DocResponse> {
        self.respond("unarchive_doc")
    }

    async fn destroy_doc(&self, _team_id: &str, _doc_id: &str) -> ApiResult<DestroyDocResponse> {
        self.respond("destroy_doc")
    }

    async fn create_doc_bookmark(&self, _team_id: &str, _doc_id: &str) -> ApiResult<DocResponse> {
        self.respond("create_doc_bookmark")
    }

    async fn destroy_doc_bookmark(&self, _team_id: &str, _doc_id: &str) -> ApiResult<DocResponse> {
        self.respond("destroy_doc_bookmark")
    }

    async fn create_folder(&self, _team_id: &str, _body: &CreateFolderRequest) -> ApiResult<FolderResponse> {
        self.respond("create_folder")
    }

    async fn update_folder(
        &self,
        _team_id: &str,
        _folder_id: &str,
        _body: &UpdateFolderRequest,
    ) -> ApiResult<UpdateFolderResponse> {
        self.respond("update_folder")
    }

    async fn update_folder_emoji(&self, _folder: &Folder, _emoji: Option<&str>) -> ApiResult<FolderResponse> {
        self.respond("update_folder_emoji")
    }

    async fn destroy_folder(&self, _team_id: &str, _folder_id: &str) -> ApiResult<DestroyFolderResponse> {
        self.respond("destroy_folder")
    }

    async fn create_folder_bookmark(&self, _team_id: &str, _folder_id: &str) -> ApiResult<FolderResponse> {
        self.respond("create_folder_bookmark")
    }

    async fn destroy_folder_bookmark(&self, _team_id: &str, _folder_id: &str) -> ApiResult<FolderResponse> {
        self.respond("destroy_folder_bookmark")
    }

    async fn destroy_workspace(
        &self,
        _team_id: &str,
        _workspace_id: &str,
        _delete_docs: bool,
    ) -> ApiResult<DestroyWorkspaceResponse> {
        self.respond("destroy_workspace")
    }

    async fn list_doc_threads(&self, _doc_id: &str) -> ApiResult<Vec<Thread>> {
        self.respond("list_doc_threads")
    }

    async fn create_thread(&self, _doc_id: &str, _body: &CreateThreadRequest) -> ApiResult<Thread> {
        self.respond("create_thread")
    }

    async fn update_thread_status(&self, _thread_id: &str, _status: ThreadStatus) -> ApiResult<Thread> {
        self.respond("update_thread_status")
    }

    async fn delete_thread(&self, _thread_id: &str) -> ApiResult<()> {
        self.respond("delete_thread")
    }

    async fn list_thread_comments(&self, _thread_id: &str) -> ApiResult<Vec<Comment>> {
        self.respond("list_thread_comments")
    }

    async fn create_comment(&self, _thread_id: &str, _message: &str) -> ApiResult<Comment> {
        self.respond("create_comment")
    }

    async fn update_comment(&self, _comment_id: &str, _message: &str) -> ApiResult<Comment> {
        self.respond("update_comment")
    }

    async fn delete_comment(&self, _comment_id: &str) -> ApiResult<()> {
        self.respond("delete_comment")
    }
}
