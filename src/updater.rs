//! Cloud Updater
//!
//! One entry point per user-facing cloud operation. Each wrapper sends the
//! remote call through the dispatcher and, on success, reconciles the
//! response into the app store. Destructive operations ask first.

use std::future::Future;

use futures::FutureExt;
use leptos::prelude::*;
use uuid::Uuid;

use crate::api::{
    use_api, ApiHandle, CreateDocRequest, CreateFolderRequest, UpdateDocRequest,
    UpdateFolderRequest,
};
use crate::bulk::{use_bulk, BulkSender, SendKind, SendingMap};
use crate::dialog::{use_dialog, DialogButton, DialogIconType, DialogStore, MessageBoxOptions};
use crate::error::SendError;
use crate::models::{Doc, Folder, Team, Workspace};
use crate::reconcile::Outcome;
use crate::router::{doc_url, folder_url, team_url, use_router, PushOptions, Router};
use crate::store::{store_apply_outcome, use_app_store, AppStore};
use crate::toast::{use_toast, ToastMessage, ToastStore};

#[derive(Clone)]
pub struct CloudUpdater {
    api: ApiHandle,
    store: AppStore,
    bulk: BulkSender,
    toast: ToastStore,
    dialog: DialogStore,
    router: Router,
}

impl CloudUpdater {
    pub fn new(
        api: ApiHandle,
        store: AppStore,
        bulk: BulkSender,
        toast: ToastStore,
        dialog: DialogStore,
        router: Router,
    ) -> Self {
        Self {
            api,
            store,
            bulk,
            toast,
            dialog,
            router,
        }
    }

    pub fn sending_map(&self) -> Signal<SendingMap> {
        self.bulk.sending_map()
    }

    pub fn is_sending(&self, id: &str) -> bool {
        self.bulk.is_sending(id)
    }

    fn apply(&self, outcome: Outcome) {
        store_apply_outcome(&self.store, outcome);
    }

    pub async fn create_doc(
        &self,
        team: &Team,
        body: CreateDocRequest,
        after_success: impl FnOnce(),
    ) -> Result<(), SendError> {
        let key = Uuid::new_v4().to_string();
        self.bulk
            .send(key, SendKind::Create, self.api.create_doc(&team.id, &body), |res| {
                let url = format!("{}{}", team_url(team), doc_url(&res.doc));
                self.apply(Outcome::DocCreated(res.doc));
                self.router.push(url, PushOptions { new: true });
                after_success();
            })
            .await
    }

    pub async fn create_folder(
        &self,
        team: &Team,
        body: CreateFolderRequest,
        after_success: impl FnOnce(),
    ) -> Result<(), SendError> {
        let key = Uuid::new_v4().to_string();
        self.bulk
            .send(key, SendKind::Create, self.api.create_folder(&team.id, &body), |res| {
                let url = format!("{}{}", team_url(team), folder_url(&res.folder));
                self.apply(Outcome::FolderCreated(res.folder));
                self.router.push(url, PushOptions::default());
                after_success();
            })
            .await
    }

    /// Archive when the doc is live, restore it otherwise
    pub async fn toggle_doc_archive(&self, doc: &Doc) -> Result<(), SendError> {
        let request = if doc.is_archived() {
            self.api.unarchive_doc(&doc.team_id, &doc.id)
        } else {
            self.api.archive_doc(&doc.team_id, &doc.id)
        };
        self.bulk
            .send(doc.id.as_str(), SendKind::Archive, request, |res| {
                self.apply(Outcome::DocArchiveToggled(res.doc))
            })
            .await
    }

    pub async fn toggle_doc_bookmark(&self, doc: &Doc) -> Result<(), SendError> {
        let request = if doc.bookmarked {
            self.api.destroy_doc_bookmark(&doc.team_id, &doc.id)
        } else {
            self.api.create_doc_bookmark(&doc.team_id, &doc.id)
        };
        self.bulk
            .send(doc.id.as_str(), SendKind::Bookmark, request, |res| {
                self.apply(Outcome::DocBookmarkToggled(res.doc))
            })
            .await
    }

    pub async fn toggle_folder_bookmark(&self, folder: &Folder) -> Result<(), SendError> {
        let request = if folder.bookmarked {
            self.api.destroy_folder_bookmark(&folder.team_id, &folder.id)
        } else {
            self.api.create_folder_bookmark(&folder.team_id, &folder.id)
        };
        self.bulk
            .send(folder.id.as_str(), SendKind::Bookmark, request, |res| {
                self.apply(Outcome::FolderBookmarkToggled(res.folder))
            })
            .await
    }

    pub async fn update_doc(&self, doc: &Doc, body: UpdateDocRequest) -> Result<(), SendError> {
        self.bulk
            .send(
                doc.id.as_str(),
                SendKind::Update,
                self.api.update_doc(&doc.team_id, &doc.id, &body),
                |res| self.apply(Outcome::DocUpdated(res)),
            )
            .await
    }

    pub async fn update_folder(&self, folder: &Folder, body: UpdateFolderRequest) -> Result<(), SendError> {
        self.bulk
            .send(
                folder.id.as_str(),
                SendKind::Update,
                self.api.update_folder(&folder.team_id, &folder.id, &body),
                |res| self.apply(Outcome::FolderUpdated(res)),
            )
            .await
    }

    pub async fn update_doc_emoji(&self, doc: &Doc, emoji: Option<String>) -> Result<(), SendError> {
        self.bulk
            .send(
                doc.id.as_str(),
                SendKind::Emoji,
                self.api.update_doc_emoji(doc, emoji.as_deref()),
                |res| self.apply(Outcome::DocEmojiUpdated(res.doc)),
            )
            .await
    }

    pub async fn update_folder_emoji(&self, folder: &Folder, emoji: Option<String>) -> Result<(), SendError> {
        self.bulk
            .send(
                folder.id.as_str(),
                SendKind::Emoji,
                self.api.update_folder_emoji(folder, emoji.as_deref()),
                |res| self.apply(Outcome::FolderEmojiUpdated(res.folder)),
            )
            .await
    }

    /// Move a doc to a workspace, optionally under a folder
    pub async fn move_doc(
        &self,
        doc: &Doc,
        workspace_id: String,
        parent_folder_id: Option<String>,
    ) -> Result<(), SendError> {
        let body = UpdateDocRequest {
            workspace_id: Some(workspace_id),
            parent_folder_id,
            ..Default::default()
        };
        self.update_doc(doc, body).await
    }

    pub async fn move_folder(
        &self,
        folder: &Folder,
        workspace_id: String,
        parent_folder_id: Option<String>,
    ) -> Result<(), SendError> {
        let body = UpdateFolderRequest {
            workspace_id: Some(workspace_id),
            parent_folder_id,
            ..Default::default()
        };
        self.update_folder(folder, body).await
    }

    /// Ask before destroying a doc. Returns the dialog id.
    pub fn delete_doc(&self, doc: &Doc, title: Option<&str>) -> u64 {
        let updater = self.clone();
        let (team_id, doc_id) = (doc.team_id.clone(), doc.id.clone());
        self.confirm(
            format!("Delete {}", title.unwrap_or("this document")),
            "Are you sure to remove for good this content?",
            Some(DialogIconType::Warning),
            "Delete",
            move || {
                let updater = updater.clone();
                let (team_id, doc_id) = (team_id.clone(), doc_id.clone());
                async move {
                    log_rejection(updater.destroy_doc(&team_id, &doc_id).await);
                }
            },
        )
    }

    pub fn delete_folder(&self, folder: &Folder) -> u64 {
        let updater = self.clone();
        let (team_id, folder_id) = (folder.team_id.clone(), folder.id.clone());
        self.confirm(
            format!("Delete {}", folder.pathname),
            "Are you sure to remove this folder and delete completely its notes",
            Some(DialogIconType::Warning),
            "Delete",
            move || {
                let updater = updater.clone();
                let (team_id, folder_id) = (team_id.clone(), folder_id.clone());
                async move {
                    log_rejection(updater.destroy_folder(&team_id, &folder_id).await);
                }
            },
        )
    }

    /// Default workspaces cannot be deleted; no dialog is shown for them.
    pub fn delete_workspace(&self, workspace: &Workspace) -> Option<u64> {
        if workspace.default {
            log::debug!("[updater] refusing to delete default workspace {}", workspace.id);
            return None;
        }
        let updater = self.clone();
        let (team_id, workspace_id) = (workspace.team_id.clone(), workspace.id.clone());
        let id = self.confirm(
            "Delete the workspace?".to_string(),
            "Are you sure to delete this workspace? You will not be able to revert this action.",
            None,
            "Destroy All",
            move || {
                let updater = updater.clone();
                let (team_id, workspace_id) = (team_id.clone(), workspace_id.clone());
                async move {
                    log_rejection(updater.destroy_workspace(&team_id, &workspace_id).await);
                }
            },
        );
        Some(id)
    }

    pub async fn destroy_doc(&self, team_id: &str, doc_id: &str) -> Result<(), SendError> {
        self.bulk
            .send(doc_id, SendKind::Delete, self.api.destroy_doc(team_id, doc_id), |response| {
                self.apply(Outcome::DocDestroyed {
                    id: doc_id.to_string(),
                    response,
                })
            })
            .await
    }

    pub async fn destroy_folder(&self, team_id: &str, folder_id: &str) -> Result<(), SendError> {
        self.bulk
            .send(
                folder_id,
                SendKind::Delete,
                self.api.destroy_folder(team_id, folder_id),
                |response| {
                    self.apply(Outcome::FolderDestroyed {
                        id: folder_id.to_string(),
                        response,
                    })
                },
            )
            .await
    }

    pub async fn destroy_workspace(&self, team_id: &str, workspace_id: &str) -> Result<(), SendError> {
        self.bulk
            .send(
                workspace_id,
                SendKind::Delete,
                self.api.destroy_workspace(team_id, workspace_id, true),
                |response| {
                    self.toast.push_message(ToastMessage::success(
                        "Success",
                        "Your workspace has been deleted",
                    ));
                    self.apply(Outcome::WorkspaceDestroyed {
                        id: workspace_id.to_string(),
                        response,
                    });
                    log::info!("[updater] workspace {} deleted", workspace_id);
                },
            )
            .await
    }

    fn confirm<F, Fut>(
        &self,
        title: String,
        message: &str,
        icon_type: Option<DialogIconType>,
        danger_label: &str,
        action: F,
    ) -> u64
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        self.dialog.message_box(MessageBoxOptions {
            title,
            message: message.to_string(),
            icon_type,
            buttons: vec![
                DialogButton::cancel("Cancel"),
                DialogButton::danger(danger_label, move || action().boxed_local()),
            ],
        })
    }
}

/// The dispatcher already toasted failures. Returns whether the send was rejected.
pub fn log_rejection(result: Result<(), SendError>) -> bool {
    match result {
        Ok(()) => false,
        Err(e) => {
            log::debug!("[updater] {}", e);
            true
        }
    }
}

/// Build the updater from the stores in context
pub fn use_cloud_updater() -> CloudUpdater {
    match use_context::<CloudUpdater>() {
        Some(updater) => updater,
        None => CloudUpdater::new(
            use_api(),
            use_app_store(),
            use_bulk(),
            use_toast(),
            use_dialog(),
            use_router(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::api::TeamResources;
    use crate::nav::fixtures::{doc, folder, workspace};
    use crate::store::{store_hydrate, store_open_doc, AppState, AppStateStoreFields};
    use crate::toast::ToastType;
    use reactive_stores::Store;
    use serde_json::json;

    struct Harness {
        updater: CloudUpdater,
        mock: MockApi,
        store: AppStore,
        toast: ToastStore,
        dialog: DialogStore,
        router: Router,
    }

    fn harness() -> Harness {
        let mock = MockApi::new();
        let store = Store::new(AppState::default());
        let toast = ToastStore::new(5_000);
        let dialog = DialogStore::new();
        let router = Router::new("/t1");
        let bulk = BulkSender::new(toast, None);
        let updater = CloudUpdater::new(
            ApiHandle::new(mock.clone()),
            store,
            bulk,
            toast,
            dialog,
            router,
        );
        Harness {
            updater,
            mock,
            store,
            toast,
            dialog,
            router,
        }
    }

    fn team() -> Team {
        Team {
            id: "t1".into(),
            name: "Team".into(),
            domain: "t1".into(),
            personal: false,
            icon: None,
        }
    }

    fn seed(h: &Harness, resources: TeamResources) {
        store_hydrate(&h.store, team(), resources);
    }

    fn doc_json(id: &str, workspace_id: &str, bookmarked: bool) -> serde_json::Value {
        json!({
            "id": id,
            "title": format!("Doc {}", id),
            "teamId": "t1",
            "workspaceId": workspace_id,
            "folderPathname": "/",
            "bookmarked": bookmarked
        })
    }

    #[tokio::test]
    async fn test_bookmark_toggle_creates_when_unbookmarked() {
        let owner = Owner::new();
        owner.set();

        let h = harness();
        seed(&h, TeamResources { docs: vec![doc("d1", "w1")], ..Default::default() });
        h.mock.on("create_doc_bookmark", json!({ "doc": doc_json("d1", "w1", true) }));

        h.updater.toggle_doc_bookmark(&doc("d1", "w1")).await.unwrap();

        assert_eq!(h.mock.calls(), vec!["create_doc_bookmark"]);
        assert!(h.store.nav().read_untracked().docs_map["d1"].bookmarked);
    }

    #[tokio::test]
    async fn test_bookmark_toggle_destroys_when_bookmarked() {
        let owner = Owner::new();
        owner.set();

        let h = harness();
        let mut marked = folder("f1", "w1");
        marked.bookmarked = true;
        h.mock.on(
            "destroy_folder_bookmark",
            json!({ "folder": { "id": "f1", "name": "Folder f1", "teamId": "t1", "workspaceId": "w1", "pathname": "/f1" } }),
        );

        h.updater.toggle_folder_bookmark(&marked).await.unwrap();

        assert_eq!(h.mock.calls(), vec!["destroy_folder_bookmark"]);
        assert!(!h.store.nav().read_untracked().folders_map["f1"].bookmarked);
    }

    #[tokio::test]
    async fn test_archive_picks_endpoint_from_state() {
        let owner = Owner::new();
        owner.set();

        let h = harness();
        seed(&h, TeamResources { docs: vec![doc("d1", "w1")], ..Default::default() });
        store_open_doc(&h.store, "d1");

        let mut archived = doc_json("d1", "w1", false);
        archived["archivedAt"] = json!("2024-01-01T00:00:00Z");
        h.mock.on("archive_doc", json!({ "doc": archived }));
        h.updater.toggle_doc_archive(&doc("d1", "w1")).await.unwrap();

        let page_doc = h.store.page().read_untracked().page_doc.clone().unwrap();
        assert!(page_doc.is_archived());

        h.mock.on("unarchive_doc", json!({ "doc": doc_json("d1", "w1", false) }));
        h.updater.toggle_doc_archive(&page_doc).await.unwrap();

        assert_eq!(h.mock.calls(), vec!["archive_doc", "unarchive_doc"]);
        assert!(!h.store.page().read_untracked().page_doc.as_ref().unwrap().is_archived());
    }

    #[tokio::test]
    async fn test_create_doc_navigates_to_new_doc() {
        let owner = Owner::new();
        owner.set();

        let h = harness();
        h.mock.on("create_doc", json!({ "doc": doc_json("d9", "w1", false) }));
        let mut after = false;

        let body = CreateDocRequest {
            title: "New".into(),
            workspace_id: "w1".into(),
            parent_folder_id: None,
            emoji: None,
        };
        h.updater.create_doc(&team(), body, || after = true).await.unwrap();

        assert!(after);
        assert!(h.store.nav().read_untracked().docs_map.contains_key("d9"));
        assert_eq!(h.router.pathname().get_untracked(), "/t1/doc/d9");
        assert!(h.router.just_created().get_untracked());
        assert!(h.updater.sending_map().get_untracked().is_empty());
    }

    #[tokio::test]
    async fn test_failed_update_leaves_store_untouched() {
        let owner = Owner::new();
        owner.set();

        let h = harness();
        seed(&h, TeamResources { docs: vec![doc("d1", "w1")], ..Default::default() });
        h.mock.fail(
            "update_doc",
            crate::error::ApiError::Http { status: 500, message: "down".into() },
        );
        let before = h.store.nav().get_untracked();

        let body = UpdateDocRequest { title: Some("Renamed".into()), ..Default::default() };
        assert!(h.updater.update_doc(&doc("d1", "w1"), body).await.is_err());

        assert_eq!(h.store.nav().get_untracked(), before);
        let toasts = h.toast.messages().get_untracked();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].1.kind, ToastType::Error);
    }

    #[tokio::test]
    async fn test_default_workspace_is_never_deleted() {
        let owner = Owner::new();
        owner.set();

        let h = harness();
        let mut ws = workspace("w0");
        ws.default = true;

        assert_eq!(h.updater.delete_workspace(&ws), None);
        assert!(h.dialog.current().get_untracked().is_none());
        assert!(h.mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_workspace_delete_moves_docs_to_fallback() {
        let owner = Owner::new();
        owner.set();

        let h = harness();
        seed(
            &h,
            TeamResources {
                workspaces: vec![workspace("w0"), workspace("w1")],
                docs: vec![doc("d1", "w1"), doc("d2", "w1")],
                ..Default::default()
            },
        );
        h.mock.on(
            "destroy_workspace",
            json!({ "publicWorkspace": { "id": "w0", "name": "Public", "teamId": "t1", "public": true } }),
        );

        let dialog_id = h.updater.delete_workspace(&workspace("w1")).unwrap();
        let (_, options) = h.dialog.current().get_untracked().unwrap();
        assert_eq!(options.buttons[1].label, "Destroy All");
        assert!(h.mock.calls().is_empty());

        h.dialog.press(dialog_id, 1).await;

        let nav = h.store.nav().get_untracked();
        assert_eq!(h.mock.calls(), vec!["destroy_workspace"]);
        assert!(!nav.workspaces_map.contains_key("w1"));
        assert!(nav.workspaces_map.contains_key("w0"));
        assert_eq!(nav.docs_map["d1"].workspace_id, "w0");
        assert_eq!(nav.docs_map["d2"].workspace_id, "w0");

        let toasts = h.toast.messages().get_untracked();
        assert_eq!(toasts[0].1.description, "Your workspace has been deleted");
    }

    #[tokio::test]
    async fn test_cancelled_delete_makes_no_call() {
        let owner = Owner::new();
        owner.set();

        let h = harness();
        seed(&h, TeamResources { docs: vec![doc("d1", "w1")], ..Default::default() });

        let dialog_id = h.updater.delete_doc(&doc("d1", "w1"), None);
        let (_, options) = h.dialog.current().get_untracked().unwrap();
        assert_eq!(options.title, "Delete this document");

        h.dialog.cancel(dialog_id).await;

        assert!(h.mock.calls().is_empty());
        assert!(h.store.nav().read_untracked().docs_map.contains_key("d1"));
    }

    #[tokio::test]
    async fn test_confirmed_folder_delete_clears_page() {
        let owner = Owner::new();
        owner.set();

        let h = harness();
        let mut parent = folder("f0", "w1");
        parent.child_folders_ids = vec!["f1".into()];
        seed(
            &h,
            TeamResources {
                folders: vec![parent, folder("f1", "w1")],
                docs: vec![doc("d1", "w1")],
                ..Default::default()
            },
        );
        store_open_doc(&h.store, "d1");
        h.mock.on(
            "destroy_folder",
            json!({ "docsIds": ["d1"], "foldersIds": ["f1"] }),
        );

        let dialog_id = h.updater.delete_folder(&folder("f1", "w1"));
        h.dialog.press(dialog_id, 1).await;

        let nav = h.store.nav().get_untracked();
        assert!(!nav.folders_map.contains_key("f1"));
        assert!(!nav.docs_map.contains_key("d1"));
        assert!(nav.folders_map["f0"].child_folders_ids.is_empty());
        assert!(h.store.page().read_untracked().page_doc.is_none());
    }

    #[tokio::test]
    async fn test_move_doc_merges_cascade() {
        let owner = Owner::new();
        owner.set();

        let h = harness();
        seed(&h, TeamResources { docs: vec![doc("d1", "w1")], ..Default::default() });
        h.mock.on(
            "update_doc",
            json!({
                "doc": doc_json("d1", "w2", false),
                "folders": [],
                "workspaces": [{ "id": "w2", "name": "Other", "teamId": "t1" }]
            }),
        );

        h.updater
            .move_doc(&doc("d1", "w1"), "w2".into(), None)
            .await
            .unwrap();

        let nav = h.store.nav().get_untracked();
        assert_eq!(nav.docs_map["d1"].workspace_id, "w2");
        assert!(nav.workspaces_map.contains_key("w2"));
    }

    #[test]
    fn test_log_rejection_reports_busy_and_failures() {
        assert!(!log_rejection(Ok(())));
        assert!(log_rejection(Err(SendError::Busy("d1".into()))));
        assert!(log_rejection(Err(SendError::Api(crate::error::ApiError::Timeout))));
    }
}
