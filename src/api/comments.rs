//! Comment thread request and response bodies.

use serde::{Deserialize, Serialize};

use crate::models::{Comment, Thread, ThreadStatus};

#[derive(Debug, Clone, Serialize)]
pub struct CreateThreadRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThreadStatusRequest {
    pub status: ThreadStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentRequest<'a> {
    pub message: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThreadsResponse {
    pub threads: Vec<Thread>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThreadResponse {
    pub thread: Thread,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentsResponse {
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentResponse {
    pub comment: Comment,
}
