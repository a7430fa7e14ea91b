//! Comment Threads
//!
//! Cache of threads per doc and comments per thread. Observers get a
//! signal that is `None` until the first load finishes; mutations patch the
//! cache so every observer follows.

use std::collections::{HashMap, HashSet};

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{use_api, ApiHandle, CreateThreadRequest};
use crate::error::ApiResult;
use crate::models::{Comment, Thread, ThreadStatus};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommentsState {
    /// doc id -> threads, newest first
    threads: HashMap<String, Vec<Thread>>,
    /// thread id -> comments, oldest first
    comments: HashMap<String, Vec<Comment>>,
}

impl CommentsState {
    pub fn doc_threads(&self, doc_id: &str) -> Option<Vec<Thread>> {
        self.threads.get(doc_id).cloned()
    }

    pub fn thread_comments(&self, thread_id: &str) -> Option<Vec<Comment>> {
        self.comments.get(thread_id).cloned()
    }

    pub fn set_doc_threads(&mut self, doc_id: &str, mut threads: Vec<Thread>) {
        sort_threads(&mut threads);
        self.threads.insert(doc_id.to_string(), threads);
    }

    /// Insert or replace; a doc whose threads were never loaded stays unloaded
    pub fn upsert_thread(&mut self, thread: Thread) {
        let Some(threads) = self.threads.get_mut(&thread.doc_id) else {
            return;
        };
        match threads.iter_mut().find(|t| t.id == thread.id) {
            Some(existing) => *existing = thread,
            None => threads.push(thread),
        }
        sort_threads(threads);
    }

    pub fn remove_thread(&mut self, thread_id: &str) {
        for threads in self.threads.values_mut() {
            threads.retain(|t| t.id != thread_id);
        }
        self.comments.remove(thread_id);
    }

    pub fn set_thread_comments(&mut self, thread_id: &str, mut comments: Vec<Comment>) {
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        self.comments.insert(thread_id.to_string(), comments);
    }

    pub fn upsert_comment(&mut self, comment: Comment) {
        let thread_id = comment.thread_id.clone();
        let mut added = false;
        if let Some(comments) = self.comments.get_mut(&thread_id) {
            match comments.iter_mut().find(|c| c.id == comment.id) {
                Some(existing) => *existing = comment,
                None => {
                    comments.push(comment);
                    added = true;
                }
            }
            comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        }
        if added {
            self.adjust_comment_count(&thread_id, 1);
        }
    }

    pub fn remove_comment(&mut self, thread_id: &str, comment_id: &str) {
        let Some(comments) = self.comments.get_mut(thread_id) else {
            return;
        };
        let before = comments.len();
        comments.retain(|c| c.id != comment_id);
        if comments.len() < before {
            self.adjust_comment_count(thread_id, -1);
        }
    }

    fn adjust_comment_count(&mut self, thread_id: &str, delta: i64) {
        let thread = self
            .threads
            .values_mut()
            .flat_map(|threads| threads.iter_mut())
            .find(|t| t.id == thread_id);
        if let Some(thread) = thread {
            thread.comment_count = (thread.comment_count as i64 + delta).max(0) as u32;
        }
    }
}

fn sort_threads(threads: &mut [Thread]) {
    threads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[derive(Clone, Copy)]
pub struct CommentsStore {
    state: RwSignal<CommentsState>,
    /// Keys of loads in progress, so observers never double-fetch
    loading: StoredValue<HashSet<String>>,
    api: StoredValue<ApiHandle>,
}

impl CommentsStore {
    pub fn new(api: ApiHandle) -> Self {
        Self {
            state: RwSignal::new(CommentsState::default()),
            loading: StoredValue::new(HashSet::new()),
            api: StoredValue::new(api),
        }
    }

    fn api(&self) -> ApiHandle {
        self.api.get_value()
    }

    /// Mark `key` as loading; false when it already is
    fn begin_load(&self, key: &str) -> bool {
        let mut started = false;
        self.loading.update_value(|loading| started = loading.insert(key.to_string()));
        started
    }

    fn end_load(&self, key: &str) {
        self.loading.update_value(|loading| {
            loading.remove(key);
        });
    }

    pub fn observe_doc_threads(&self, doc_id: String) -> Signal<Option<Vec<Thread>>> {
        let loaded = self.state.with_untracked(|s| s.threads.contains_key(&doc_id));
        if !loaded {
            let store = *self;
            let doc_id = doc_id.clone();
            spawn_local(async move {
                if let Err(e) = store.load_doc_threads(&doc_id).await {
                    log::error!("[comments] failed to load threads of {}: {}", doc_id, e);
                }
            });
        }
        let state = self.state;
        Signal::derive(move || state.with(|s| s.doc_threads(&doc_id)))
    }

    pub fn observe_thread_comments(&self, thread_id: String) -> Signal<Option<Vec<Comment>>> {
        let loaded = self.state.with_untracked(|s| s.comments.contains_key(&thread_id));
        if !loaded {
            let store = *self;
            let thread_id = thread_id.clone();
            spawn_local(async move {
                if let Err(e) = store.load_thread_comments(&thread_id).await {
                    log::error!("[comments] failed to load comments of {}: {}", thread_id, e);
                }
            });
        }
        let state = self.state;
        Signal::derive(move || state.with(|s| s.thread_comments(&thread_id)))
    }

    pub async fn load_doc_threads(&self, doc_id: &str) -> ApiResult<()> {
        let key = format!("doc:{}", doc_id);
        if !self.begin_load(&key) {
            return Ok(());
        }
        let result = self.api().list_doc_threads(doc_id).await;
        self.end_load(&key);
        let threads = result?;
        log::debug!("[comments] {} threads for {}", threads.len(), doc_id);
        self.state.update(|s| s.set_doc_threads(doc_id, threads));
        Ok(())
    }

    pub async fn load_thread_comments(&self, thread_id: &str) -> ApiResult<()> {
        let key = format!("thread:{}", thread_id);
        if !self.begin_load(&key) {
            return Ok(());
        }
        let result = self.api().list_thread_comments(thread_id).await;
        self.end_load(&key);
        let comments = result?;
        self.state.update(|s| s.set_thread_comments(thread_id, comments));
        Ok(())
    }

    pub async fn create_thread(&self, doc_id: &str, body: CreateThreadRequest) -> ApiResult<Thread> {
        let thread = self.api().create_thread(doc_id, &body).await?;
        self.state.update(|s| s.upsert_thread(thread.clone()));
        Ok(thread)
    }

    pub async fn set_thread_status(&self, thread_id: &str, status: ThreadStatus) -> ApiResult<Thread> {
        let thread = self.api().update_thread_status(thread_id, status).await?;
        self.state.update(|s| s.upsert_thread(thread.clone()));
        Ok(thread)
    }

    pub async fn delete_thread(&self, thread_id: &str) -> ApiResult<()> {
        self.api().delete_thread(thread_id).await?;
        self.state.update(|s| s.remove_thread(thread_id));
        Ok(())
    }

    pub async fn create_comment(&self, thread_id: &str, message: &str) -> ApiResult<Comment> {
        let comment = self.api().create_comment(thread_id, message).await?;
        self.state.update(|s| s.upsert_comment(comment.clone()));
        Ok(comment)
    }

    pub async fn update_comment(&self, comment_id: &str, message: &str) -> ApiResult<Comment> {
        let comment = self.api().update_comment(comment_id, message).await?;
        self.state.update(|s| s.upsert_comment(comment.clone()));
        Ok(comment)
    }

    pub async fn delete_comment(&self, comment: &Comment) -> ApiResult<()> {
        self.api().delete_comment(&comment.id).await?;
        self.state.update(|s| s.remove_comment(&comment.thread_id, &comment.id));
        Ok(())
    }
}

pub fn use_comments() -> CommentsStore {
    match use_context::<CommentsStore>() {
        Some(store) => store,
        None => {
            let store = CommentsStore::new(use_api());
            provide_context(store);
            store
        }
    }
}

/// Threads of a doc, `None` until loaded
pub fn use_doc_threads(doc_id: impl Into<String>) -> Signal<Option<Vec<Thread>>> {
    use_comments().observe_doc_threads(doc_id.into())
}

/// Comments of a thread, `None` until loaded
pub fn use_thread_comments(thread: &Thread) -> Signal<Option<Vec<Comment>>> {
    use_comments().observe_thread_comments(thread.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn thread(id: &str, day: u32) -> Thread {
        Thread {
            id: id.into(),
            doc_id: "d1".into(),
            status: ThreadStatus::Open,
            comment_count: 0,
            selection: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
        }
    }

    fn comment(id: &str, day: u32) -> Comment {
        Comment {
            id: id.into(),
            thread_id: "th1".into(),
            message: format!("message {}", id),
            user_name: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn test_threads_newest_first_comments_oldest_first() {
        let mut state = CommentsState::default();
        state.set_doc_threads("d1", vec![thread("a", 1), thread("b", 3), thread("c", 2)]);
        state.set_thread_comments("th1", vec![comment("x", 5), comment("y", 1)]);

        let threads = state.doc_threads("d1").unwrap();
        let order: Vec<&str> = threads.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
        let comments = state.thread_comments("th1").unwrap();
        let order: Vec<&str> = comments.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, vec!["y", "x"]);
    }

    #[test]
    fn test_unloaded_doc_stays_unloaded() {
        let mut state = CommentsState::default();
        state.upsert_thread(thread("a", 1));
        assert_eq!(state.doc_threads("d1"), None);
    }

    #[test]
    fn test_comment_changes_adjust_thread_count() {
        let mut state = CommentsState::default();
        state.set_doc_threads("d1", vec![thread("th1", 1)]);
        state.set_thread_comments("th1", vec![]);

        state.upsert_comment(comment("x", 1));
        state.upsert_comment(comment("x", 1));
        assert_eq!(state.doc_threads("d1").unwrap()[0].comment_count, 1);

        state.remove_comment("th1", "x");
        state.remove_comment("th1", "x");
        assert_eq!(state.doc_threads("d1").unwrap()[0].comment_count, 0);
    }

    #[test]
    fn test_remove_thread_drops_comments() {
        let mut state = CommentsState::default();
        state.set_doc_threads("d1", vec![thread("th1", 1), thread("th2", 2)]);
        state.set_thread_comments("th1", vec![comment("x", 1)]);

        state.remove_thread("th1");
        assert_eq!(state.doc_threads("d1").unwrap().len(), 1);
        assert_eq!(state.thread_comments("th1"), None);
    }

    #[tokio::test]
    async fn test_load_then_create_thread() {
        let owner = Owner::new();
        owner.set();

        let mock = MockApi::new();
        mock.on(
            "list_doc_threads",
            json!([{ "id": "th1", "docId": "d1", "status": "open", "createdAt": "2024-01-01T00:00:00Z" }]),
        )
        .on(
            "create_thread",
            json!({ "id": "th2", "docId": "d1", "status": "open", "commentCount": 1, "createdAt": "2024-02-01T00:00:00Z" }),
        );
        let store = CommentsStore::new(ApiHandle::new(mock.clone()));

        store.load_doc_threads("d1").await.unwrap();
        store
            .create_thread("d1", CreateThreadRequest { selection: None, message: "hi".into() })
            .await
            .unwrap();

        let threads = store.state.get_untracked().doc_threads("d1").unwrap();
        let order: Vec<&str> = threads.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(order, vec!["th2", "th1"]);
        assert_eq!(mock.calls(), vec!["list_doc_threads", "create_thread"]);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_cache() {
        let owner = Owner::new();
        owner.set();

        let mock = MockApi::new();
        mock.fail("delete_thread", crate::error::ApiError::Timeout);
        let store = CommentsStore::new(ApiHandle::new(mock));
        store.state.update(|s| s.set_doc_threads("d1", vec![thread("th1", 1)]));

        assert!(store.delete_thread("th1").await.is_err());
        assert_eq!(store.state.get_untracked().doc_threads("d1").unwrap().len(), 1);
    }
}
