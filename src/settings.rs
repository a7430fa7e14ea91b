//! Team Settings
//!
//! Logic behind the team settings form: domain slugs, field labels and the
//! update sequence (team body, then icon, then local state).

use leptos::prelude::*;

use crate::api::{ApiHandle, IconUpload, UpdateTeamRequest};
use crate::desktop::send_to_desktop;
use crate::error::ApiResult;
use crate::models::Team;
use crate::page::PagePatch;
use crate::router::{rewrite_team_path, PushOptions, Router};
use crate::store::{set_partial_page_data, set_team_in_global, AppStore};

/// Trim, keep `[a-zA-Z0-9-]`, lower-case
pub fn slug_domain(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect::<String>()
        .to_lowercase()
}

/// Team URL the domain would produce
pub fn domain_preview(base_url: &str, raw: &str) -> String {
    format!("{}/{}", base_url, slug_domain(raw))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TeamFormLabels {
    pub name: &'static str,
    pub domain: &'static str,
    pub submit: &'static str,
}

impl TeamFormLabels {
    /// `conversion` turns a personal space into a team
    pub fn for_mode(conversion: bool) -> Self {
        if conversion {
            Self {
                name: "Team name",
                domain: "Team domain",
                submit: "Create",
            }
        } else {
            Self {
                name: "Space name",
                domain: "Space domain",
                submit: "Update",
            }
        }
    }
}

pub fn update_request(name: String, domain: String, conversion: bool) -> UpdateTeamRequest {
    if conversion {
        UpdateTeamRequest {
            name,
            domain: Some(domain),
            personal: Some(false),
        }
    } else {
        UpdateTeamRequest {
            name,
            domain: None,
            personal: None,
        }
    }
}

/// Send the team body, then the icon when one was picked
pub async fn submit_team_update(
    api: &ApiHandle,
    team_id: &str,
    body: &UpdateTeamRequest,
    icon: Option<IconUpload>,
) -> ApiResult<Team> {
    let mut updated = api.update_team(team_id, body).await?;
    if let Some(icon) = icon {
        updated.icon = Some(api.update_team_icon(team_id, icon).await?);
    }
    Ok(updated)
}

/// Make the updated team visible everywhere and follow it to its new URL
pub fn apply_team_update(store: &AppStore, router: &Router, team: Team) {
    set_partial_page_data(
        store,
        PagePatch {
            team: Some(team.clone()),
            ..Default::default()
        },
    );
    set_team_in_global(store, team.clone());
    send_to_desktop("team-update", &team);

    let url = rewrite_team_path(&team, &router.pathname().get_untracked());
    log::info!("[settings] team {} updated, moving to {}", team.id, url);
    router.push(url, PushOptions::default());
}
