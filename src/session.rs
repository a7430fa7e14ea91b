//! Session Loading
//!
//! Fetches the team list and the resources of the active team into the
//! app store.

use leptos::prelude::*;

use crate::api::ApiHandle;
use crate::error::ApiResult;
use crate::models::Team;
use crate::router::{team_url, PushOptions, Router};
use crate::store::{store_hydrate, AppStateStoreFields, AppStore};

/// Team whose domain starts `pathname`, else the first team
pub fn team_for_path<'a>(teams: &'a [Team], pathname: &str) -> Option<&'a Team> {
    let domain = pathname.trim_start_matches('/').split('/').next().unwrap_or_default();
    teams
        .iter()
        .find(|team| !domain.is_empty() && team.domain == domain)
        .or_else(|| teams.first())
}

/// Load every team, then open the one the current URL points at
pub async fn load_session(api: &ApiHandle, store: &AppStore, router: &Router) -> ApiResult<()> {
    let teams = api.list_teams().await?;
    log::info!("[session] {} teams", teams.len());
    let active = team_for_path(&teams, &router.pathname().get_untracked()).cloned();
    store.teams().set(teams);
    match active {
        Some(team) => open_team(api, store, router, team).await,
        None => Ok(()),
    }
}

/// Replace the store content with `team`'s resources
pub async fn open_team(api: &ApiHandle, store: &AppStore, router: &Router, team: Team) -> ApiResult<()> {
    let resources = api.get_team_resources(&team.id).await?;
    log::debug!(
        "[session] team {}: {} workspaces, {} folders, {} docs",
        team.id,
        resources.workspaces.len(),
        resources.folders.len(),
        resources.docs.len()
    );
    let url = team_url(&team);
    store_hydrate(store, team, resources);
    if !router.pathname().get_untracked().starts_with(&url) {
        router.push(url, PushOptions::default());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::store::AppState;
    use reactive_stores::Store;
    use serde_json::json;

    fn team(id: &str, domain: &str) -> Team {
        Team {
            id: id.into(),
            name: id.into(),
            domain: domain.into(),
            personal: false,
            icon: None,
        }
    }

    #[test]
    fn test_team_for_path() {
        let teams = vec![team("t1", "alpha"), team("t2", "beta")];
        assert_eq!(team_for_path(&teams, "/beta/doc/d1").map(|t| t.id.as_str()), Some("t2"));
        assert_eq!(team_for_path(&teams, "/").map(|t| t.id.as_str()), Some("t1"));
        assert_eq!(team_for_path(&teams, "/unknown").map(|t| t.id.as_str()), Some("t1"));
        assert!(team_for_path(&[], "/beta").is_none());
    }

    #[tokio::test]
    async fn test_load_session_hydrates_active_team() {
        let owner = Owner::new();
        owner.set();

        let mock = MockApi::new();
        mock.on(
            "list_teams",
            json!([
                { "id": "t1", "name": "Alpha", "domain": "alpha" },
                { "id": "t2", "name": "Beta", "domain": "beta" }
            ]),
        )
        .on(
            "get_team_resources",
            json!({
                "workspaces": [{ "id": "w1", "name": "General", "teamId": "t2", "default": true }],
                "folders": [],
                "docs": [{ "id": "d1", "title": "Hello", "teamId": "t2", "workspaceId": "w1" }]
            }),
        );
        let api = ApiHandle::new(mock.clone());
        let store = Store::new(AppState::default());
        let router = Router::new("/beta");

        load_session(&api, &store, &router).await.unwrap();

        assert_eq!(store.teams().get_untracked().len(), 2);
        assert_eq!(store.page().read_untracked().team.as_ref().map(|t| t.id.as_str()), Some("t2"));
        assert!(store.nav().read_untracked().docs_map.contains_key("d1"));
        assert_eq!(router.pathname().get_untracked(), "/beta");
        assert_eq!(mock.calls(), vec!["list_teams", "get_team_resources"]);
    }
}
