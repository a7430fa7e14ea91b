//! HTTP implementation of `CloudApi` on top of reqwest.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use super::*;
use crate::config::CloudConfig;
use crate::error::{ApiError, ApiResult};

/// Unreserved URL characters stay as-is inside a path segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

fn seg(raw: &str) -> String {
    utf8_percent_encode(raw, SEGMENT).to_string()
}

fn team_path(team_id: &str, rest: &str) -> String {
    format!("/api/teams/{}{}", seg(team_id), rest)
}

fn doc_path(team_id: &str, doc_id: &str, rest: &str) -> String {
    team_path(team_id, &format!("/docs/{}{}", seg(doc_id), rest))
}

fn folder_path(team_id: &str, folder_id: &str, rest: &str) -> String {
    team_path(team_id, &format!("/folders/{}{}", seg(folder_id), rest))
}

pub struct HttpCloudApi {
    client: reqwest::Client,
    config: CloudConfig,
}

impl HttpCloudApi {
    pub fn new(config: CloudConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.client.request(method, self.config.api_url(path));
        if let Some(token) = &self.config.api_token {
            builder = builder.bearer_auth(token);
        }
        #[cfg(target_arch = "wasm32")]
        {
            builder = builder.fetch_credentials_include();
        }
        builder
    }

    async fn send(&self, builder: RequestBuilder) -> ApiResult<reqwest::Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        log::warn!("[api] {} {}", status, message);
        Err(ApiError::Http {
            status: status.as_u16(),
            message,
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let response = self.send(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn fetch_empty(&self, builder: RequestBuilder) -> ApiResult<()> {
        self.send(builder).await.map(|_| ())
    }
}

#[async_trait(?Send)]
impl CloudApi for HttpCloudApi {
    async fn list_teams(&self) -> ApiResult<Vec<Team>> {
        let res: TeamsResponse = self.fetch(self.request(Method::GET, "/api/teams")).await?;
        Ok(res.teams)
    }

    async fn get_team_resources(&self, team_id: &str) -> ApiResult<TeamResources> {
        self.fetch(self.request(Method::GET, &team_path(team_id, "/resources")))
            .await
    }

    async fn update_team(&self, team_id: &str, body: &UpdateTeamRequest) -> ApiResult<Team> {
        let res: TeamResponse = self
            .fetch(self.request(Method::PUT, &team_path(team_id, "")).json(body))
            .await?;
        Ok(res.team)
    }

    async fn update_team_icon(&self, team_id: &str, upload: IconUpload) -> ApiResult<TeamIcon> {
        let part = reqwest::multipart::Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.mime_type)
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("icon", part);
        let res: TeamIconResponse = self
            .fetch(
                self.request(Method::POST, &team_path(team_id, "/icon"))
                    .multipart(form),
            )
            .await?;
        Ok(res.icon)
    }

    async fn create_doc(&self, team_id: &str, body: &CreateDocRequest) -> ApiResult<DocResponse> {
        self.fetch(self.request(Method::POST, &team_path(team_id, "/docs")).json(body))
            .await
    }

    async fn update_doc(
        &self,
        team_id: &str,
        doc_id: &str,
        body: &UpdateDocRequest,
    ) -> ApiResult<UpdateDocResponse> {
        self.fetch(self.request(Method::PUT, &doc_path(team_id, doc_id, "")).json(body))
            .await
    }

    async fn update_doc_emoji(&self, doc: &Doc, emoji: Option<&str>) -> ApiResult<DocResponse> {
        self.fetch(
            self.request(Method::PUT, &doc_path(&doc.team_id, &doc.id, "/emoji"))
                .json(&EmojiRequest { emoji }),
        )
        .await
    }

    async fn archive_doc(&self, team_id: &str, doc_id: &str) -> ApiResult<DocResponse> {
        self.fetch(self.request(Method::POST, &doc_path(team_id, doc_id, "/archive")))
            .await
    }

    async fn unarchive_doc(&self, team_id: &str, doc_id: &str) -> ApiResult<DocResponse> {
        self.fetch(self.request(Method::DELETE, &doc_path(team_id, doc_id, "/archive")))
            .await
    }

    async fn destroy_doc(&self, team_id: &str, doc_id: &str) -> ApiResult<DestroyDocResponse> {
        self.fetch(self.request(Method::DELETE, &doc_path(team_id, doc_id, "")))
            .await
    }

    async fn create_doc_bookmark(&self, team_id: &str, doc_id: &str) -> ApiResult<DocResponse> {
        self.fetch(self.request(Method::POST, &doc_path(team_id, doc_id, "/bookmarks")))
            .await
    }

    async fn destroy_doc_bookmark(&self, team_id: &str, doc_id: &str) -> ApiResult<DocResponse> {
        self.fetch(self.request(Method::DELETE, &doc_path(team_id, doc_id, "/bookmarks")))
            .await
    }

    async fn create_folder(&self, team_id: &str, body: &CreateFolderRequest) -> ApiResult<FolderResponse> {
        self.fetch(self.request(Method::POST, &team_path(team_id, "/folders")).json(body))
            .await
    }

    async fn update_folder(
        &self,
        team_id: &str,
        folder_id: &str,
        body: &UpdateFolderRequest,
    ) -> ApiResult<UpdateFolderResponse> {
        self.fetch(
            self.request(Method::PUT, &folder_path(team_id, folder_id, ""))
                .json(body),
        )
        .await
    }

    async fn update_folder_emoji(&self, folder: &Folder, emoji: Option<&str>) -> ApiResult<FolderResponse> {
        self.fetch(
            self.request(Method::PUT, &folder_path(&folder.team_id, &folder.id, "/emoji"))
                .json(&EmojiRequest { emoji }),
        )
        .await
    }

    async fn destroy_folder(&self, team_id: &str, folder_id: &str) -> ApiResult<DestroyFolderResponse> {
        self.fetch(self.request(Method::DELETE, &folder_path(team_id, folder_id, "")))
            .await
    }

    async fn create_folder_bookmark(&self, team_id: &str, folder_id: &str) -> ApiResult<FolderResponse> {
        self.fetch(self.request(Method::POST, &folder_path(team_id, folder_id, "/bookmarks")))
            .await
    }

    async fn destroy_folder_bookmark(&self, team_id: &str, folder_id: &str) -> ApiResult<FolderResponse> {
        self.fetch(self.request(Method::DELETE, &folder_path(team_id, folder_id, "/bookmarks")))
            .await
    }

    async fn destroy_workspace(
        &self,
        team_id: &str,
        workspace_id: &str,
        delete_docs: bool,
    ) -> ApiResult<DestroyWorkspaceResponse> {
        let path = team_path(team_id, &format!("/workspaces/{}", seg(workspace_id)));
        self.fetch(
            self.request(Method::DELETE, &path)
                .query(&[("deleteDocs", delete_docs)]),
        )
        .await
    }

    async fn list_doc_threads(&self, doc_id: &str) -> ApiResult<Vec<Thread>> {
        let path = format!("/api/docs/{}/threads", seg(doc_id));
        let res: ThreadsResponse = self.fetch(self.request(Method::GET, &path)).await?;
        Ok(res.threads)
    }

    async fn create_thread(&self, doc_id: &str, body: &CreateThreadRequest) -> ApiResult<Thread> {
        let path = format!("/api/docs/{}/threads", seg(doc_id));
        let res: ThreadResponse = self.fetch(self.request(Method::POST, &path).json(body)).await?;
        Ok(res.thread)
    }

    async fn update_thread_status(&self, thread_id: &str, status: ThreadStatus) -> ApiResult<Thread> {
        let path = format!("/api/threads/{}/status", seg(thread_id));
        let res: ThreadResponse = self
            .fetch(self.request(Method::PUT, &path).json(&ThreadStatusRequest { status }))
            .await?;
        Ok(res.thread)
    }

    async fn delete_thread(&self, thread_id: &str) -> ApiResult<()> {
        let path = format!("/api/threads/{}", seg(thread_id));
        self.fetch_empty(self.request(Method::DELETE, &path)).await
    }

    async fn list_thread_comments(&self, thread_id: &str) -> ApiResult<Vec<Comment>> {
        let path = format!("/api/threads/{}/comments", seg(thread_id));
        let res: CommentsResponse = self.fetch(self.request(Method::GET, &path)).await?;
        Ok(res.comments)
    }

    async fn create_comment(&self, thread_id: &str, message: &str) -> ApiResult<Comment> {
        let path = format!("/api/threads/{}/comments", seg(thread_id));
        let res: CommentResponse = self
            .fetch(self.request(Method::POST, &path).json(&CommentRequest { message }))
            .await?;
        Ok(res.comment)
    }

    async fn update_comment(&self, comment_id: &str, message: &str) -> ApiResult<Comment> {
        let path = format!("/api/comments/{}", seg(comment_id));
        let res: CommentResponse = self
            .fetch(self.request(Method::PUT, &path).json(&CommentRequest { message }))
            .await?;
        Ok(res.comment)
    }

    async fn delete_comment(&self, comment_id: &str) -> ApiResult<()> {
        let path = format!("/api/comments/{}", seg(comment_id));
        self.fetch_empty(self.request(Method::DELETE, &path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_encode_segments() {
        assert_eq!(team_path("t1", "/docs"), "/api/teams/t1/docs");
        assert_eq!(doc_path("t1", "a b", "/archive"), "/api/teams/t1/docs/a%20b/archive");
        assert_eq!(folder_path("t-1", "f_2", ""), "/api/teams/t-1/folders/f_2");
        assert_eq!(seg("x/y"), "x%2Fy");
    }
}
