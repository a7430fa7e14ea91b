//! Client Router
//!
//! Reactive pathname plus URL builders for teams, docs and folders.

use leptos::prelude::*;

use crate::models::{Doc, Folder, Team};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PushOptions {
    /// The target was just created
    pub new: bool,
}

#[derive(Clone, Copy)]
pub struct Router {
    pathname: RwSignal<String>,
    /// Set when the last push targeted a freshly created entity
    last_new: RwSignal<bool>,
}

impl Router {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            pathname: RwSignal::new(initial.into()),
            last_new: RwSignal::new(false),
        }
    }

    /// Router seeded from the browser location
    pub fn from_location() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let path = web_sys::window()
                .and_then(|w| w.location().pathname().ok())
                .unwrap_or_else(|| "/".to_string());
            Self::new(path)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::new("/")
        }
    }

    pub fn pathname(&self) -> Signal<String> {
        self.pathname.into()
    }

    pub fn just_created(&self) -> Signal<bool> {
        self.last_new.into()
    }

    pub fn push(&self, url: impl Into<String>, options: PushOptions) {
        let url = url.into();
        log::debug!("[router] push {} (new: {})", url, options.new);
        #[cfg(target_arch = "wasm32")]
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            if let Err(e) = history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(url.as_str())) {
                log::warn!("[router] pushState failed: {:?}", e);
            }
        }
        self.last_new.set(options.new);
        self.pathname.set(url);
    }
}

pub fn use_router() -> Router {
    expect_context::<Router>()
}

pub fn team_url(team: &Team) -> String {
    format!("/{}", team.domain)
}

pub fn doc_url(doc: &Doc) -> String {
    format!("/doc/{}", doc.id)
}

pub fn folder_url(folder: &Folder) -> String {
    format!("/folder/{}", folder.id)
}

/// Keep everything after the team segment and put it under `team`
pub fn rewrite_team_path(team: &Team, pathname: &str) -> String {
    let rest: Vec<&str> = pathname.split('/').skip(2).collect();
    if rest.is_empty() {
        team_url(team)
    } else {
        format!("{}/{}", team_url(team), rest.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(domain: &str) -> Team {
        Team {
            id: "t1".into(),
            name: "Team".into(),
            domain: domain.into(),
            personal: false,
            icon: None,
        }
    }

    #[test]
    fn test_rewrite_team_path_keeps_subpath() {
        let t = team("acme");
        assert_eq!(rewrite_team_path(&t, "/old/doc/d1"), "/acme/doc/d1");
        assert_eq!(rewrite_team_path(&t, "/old"), "/acme");
        assert_eq!(rewrite_team_path(&t, "/old/settings/"), "/acme/settings/");
    }

    #[test]
    fn test_push_updates_pathname() {
        let owner = Owner::new();
        owner.set();

        let router = Router::new("/acme");
        router.push("/acme/doc/d1", PushOptions { new: true });
        assert_eq!(router.pathname().get_untracked(), "/acme/doc/d1");
        assert!(router.just_created().get_untracked());
    }
}
