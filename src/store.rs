//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::api::TeamResources;
use crate::models::Team;
use crate::nav::NavState;
use crate::page::{PageData, PagePatch, Refresh};
use crate::reconcile::{self, Outcome};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Entity maps of the current team
    pub nav: NavState,
    /// What the main view shows
    pub page: PageData,
    /// Every team the user belongs to
    pub teams: Vec<Team>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Merge a successful operation into the maps, then patch the page
pub fn store_apply_outcome(store: &AppStore, outcome: Outcome) {
    let pointer = store.page().read_untracked().pointer();
    let patch = reconcile::apply(&mut store.nav().write(), &pointer, outcome);
    set_partial_page_data(store, patch);
}

/// Merge only the page slots the patch touches
pub fn set_partial_page_data(store: &AppStore, patch: PagePatch) {
    if patch.is_empty() {
        return;
    }
    store.page().write().apply(patch);
}

/// Replace a team in the global list, appending it when unknown
pub fn set_team_in_global(store: &AppStore, team: Team) {
    let teams = store.teams();
    let mut teams = teams.write();
    match teams.iter_mut().find(|t| t.id == team.id) {
        Some(existing) => *existing = team,
        None => teams.push(team),
    }
}

/// Load a team snapshot and make it the page team
pub fn store_hydrate(store: &AppStore, team: Team, resources: TeamResources) {
    store.nav().write().hydrate(resources);
    store.page().set(PageData {
        team: Some(team),
        ..Default::default()
    });
}

/// Show a known doc in the main view
pub fn store_open_doc(store: &AppStore, doc_id: &str) {
    let Some(doc) = store.nav().read_untracked().docs_map.get(doc_id).cloned() else {
        return;
    };
    store.nav().write().current_path = doc.folder_pathname.clone();
    set_partial_page_data(
        store,
        PagePatch {
            page_doc: Refresh::Replace(doc),
            page_folder: Refresh::Cleared,
            ..Default::default()
        },
    );
}

/// Show a known folder in the main view
pub fn store_open_folder(store: &AppStore, folder_id: &str) {
    let Some(folder) = store.nav().read_untracked().folders_map.get(folder_id).cloned() else {
        return;
    };
    store.nav().write().current_path = folder.pathname.clone();
    set_partial_page_data(
        store,
        PagePatch {
            page_doc: Refresh::Cleared,
            page_folder: Refresh::Replace(folder),
            ..Default::default()
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::fixtures::{doc, folder, workspace};

    fn team(id: &str, name: &str) -> Team {
        Team {
            id: id.into(),
            name: name.into(),
            domain: id.into(),
            personal: false,
            icon: None,
        }
    }

    fn hydrated() -> AppStore {
        let store = Store::new(AppState::default());
        store_hydrate(
            &store,
            team("t1", "Team"),
            TeamResources {
                workspaces: vec![workspace("w1")],
                folders: vec![folder("f1", "w1")],
                docs: vec![doc("d1", "w1"), doc("d2", "w1")],
            },
        );
        store
    }

    #[test]
    fn test_archive_refreshes_only_page_doc() {
        let owner = Owner::new();
        owner.set();

        let store = hydrated();
        store_open_doc(&store, "d1");

        let mut archived = doc("d2", "w1");
        archived.archived_at = Some(chrono::Utc::now());
        store_apply_outcome(&store, Outcome::DocArchiveToggled(archived));
        assert!(!store.page().read_untracked().page_doc.as_ref().unwrap().is_archived());
        assert!(store.nav().read_untracked().docs_map["d2"].is_archived());

        let mut archived = doc("d1", "w1");
        archived.archived_at = Some(chrono::Utc::now());
        store_apply_outcome(&store, Outcome::DocArchiveToggled(archived));
        assert!(store.page().read_untracked().page_doc.as_ref().unwrap().is_archived());
    }

    #[test]
    fn test_open_folder_clears_page_doc() {
        let owner = Owner::new();
        owner.set();

        let store = hydrated();
        store_open_doc(&store, "d1");
        store_open_folder(&store, "f1");

        let page = store.page().get_untracked();
        assert!(page.page_doc.is_none());
        assert_eq!(page.page_folder.map(|f| f.id), Some("f1".to_string()));
        assert_eq!(store.nav().read_untracked().current_path, "/f1");
        assert_eq!(page.team.map(|t| t.id), Some("t1".to_string()));
    }

    #[test]
    fn test_set_team_in_global_upserts() {
        let owner = Owner::new();
        owner.set();

        let store = Store::new(AppState::default());
        set_team_in_global(&store, team("t1", "Old"));
        set_team_in_global(&store, team("t2", "Other"));
        set_team_in_global(&store, team("t1", "New"));

        let teams = store.teams().get_untracked();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].name, "New");
    }
}
