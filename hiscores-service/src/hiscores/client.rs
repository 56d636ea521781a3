//! Hiscores HTTP client implementation.

use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::catalog;
use crate::model::GameMode;

use super::error::HiscoresError;
use super::{PAGE_SIZE, StatsProvider, wire};

/// Default base URL for the hiscores API
pub const DEFAULT_BASE_URL: &str = "https://secure.runescape.com";

/// Default timeout for API requests
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_USER_AGENT: &str = concat!("hiscores-service/", env!("CARGO_PKG_VERSION"));

/// Ranking category for skill tables
const SKILL_CATEGORY: u8 = 0;

/// Ranking category for activity and boss tables
const ACTIVITY_CATEGORY: u8 = 1;

/// Hiscores API client
#[derive(Clone)]
pub struct HiscoresClient {
    client: Client,
    base_url: String,
}

impl HiscoresClient {
    /// Create a new hiscores client
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, HiscoresError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of a player's lite stats in JSON form
    pub fn player_url(&self, username: &str, gamemode: GameMode) -> String {
        format!(
            "{}/m={}/index_lite.json?player={}",
            self.base_url,
            hiscore_endpoint(gamemode),
            urlencoding::encode(username)
        )
    }

    /// URL of one page of a ranking table
    pub fn ranking_url(&self, gamemode: GameMode, category: u8, table: usize, page: u32) -> String {
        format!(
            "{}/m={}/ranking.json?table={}&category={}&size={}&page={}",
            self.base_url,
            hiscore_endpoint(gamemode),
            table,
            category,
            PAGE_SIZE,
            page
        )
    }

    /// Get a player's stats as a keyed raw record
    pub async fn player(&self, username: &str, gamemode: GameMode) -> Result<Value, HiscoresError> {
        let url = self.player_url(username, gamemode);
        debug!(%url, "Fetching player stats");

        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(HiscoresError::PlayerNotFound {
                username: username.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(HiscoresError::ApiError {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let payload: Value = response.json().await?;
        wire::keyed_player_record(payload)
    }

    /// URL of one page of a skill ranking
    pub fn skill_ranking_url(
        &self,
        skill: &str,
        gamemode: GameMode,
        page: u32,
    ) -> Result<String, HiscoresError> {
        let table = catalog::skill_table(skill).ok_or_else(|| HiscoresError::UnknownMetric {
            name: skill.to_string(),
        })?;
        Ok(self.ranking_url(gamemode, SKILL_CATEGORY, table, page))
    }

    /// URL of one page of an activity or boss ranking
    pub fn activity_ranking_url(
        &self,
        activity: &str,
        gamemode: GameMode,
        page: u32,
    ) -> Result<String, HiscoresError> {
        let table =
            catalog::activity_table(activity).ok_or_else(|| HiscoresError::UnknownMetric {
                name: activity.to_string(),
            })?;
        Ok(self.ranking_url(gamemode, ACTIVITY_CATEGORY, table, page))
    }

    /// Get one page of a skill ranking
    pub async fn skill_page(
        &self,
        skill: &str,
        gamemode: GameMode,
        page: u32,
    ) -> Result<Vec<Value>, HiscoresError> {
        let url = self.skill_ranking_url(skill, gamemode, page)?;
        let payload = self.ranking(&url).await?;
        wire::ranking_rows(payload, Some(skill))
    }

    /// Get one page of an activity or boss ranking
    pub async fn activity_page(
        &self,
        activity: &str,
        gamemode: GameMode,
        page: u32,
    ) -> Result<Vec<Value>, HiscoresError> {
        let url = self.activity_ranking_url(activity, gamemode, page)?;
        let payload = self.ranking(&url).await?;
        wire::ranking_rows(payload, None)
    }

    async fn ranking(&self, url: &str) -> Result<Value, HiscoresError> {
        debug!(%url, "Fetching ranking page");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(HiscoresError::ApiError {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let payload: Value = response.json().await?;
        Ok(payload)
    }
}

impl StatsProvider for HiscoresClient {
    fn fetch_player<'a>(
        &'a self,
        username: &'a str,
        gamemode: GameMode,
    ) -> BoxFuture<'a, Result<Value, HiscoresError>> {
        self.player(username, gamemode).boxed()
    }

    fn fetch_skill_page<'a>(
        &'a self,
        skill: &'a str,
        gamemode: GameMode,
        page: u32,
    ) -> BoxFuture<'a, Result<Vec<Value>, HiscoresError>> {
        self.skill_page(skill, gamemode, page).boxed()
    }

    fn fetch_activity_page<'a>(
        &'a self,
        activity: &'a str,
        gamemode: GameMode,
        page: u32,
    ) -> BoxFuture<'a, Result<Vec<Value>, HiscoresError>> {
        self.activity_page(activity, gamemode, page).boxed()
    }
}

/// Hiscore table family for a game mode
fn hiscore_endpoint(gamemode: GameMode) -> &'static str {
    match gamemode {
        GameMode::Main => "hiscore_oldschool",
        GameMode::Ironman => "hiscore_oldschool_ironman",
        GameMode::HardcoreIronman => "hiscore_oldschool_hardcore_ironman",
        GameMode::UltimateIronman => "hiscore_oldschool_ultimate",
        GameMode::Deadman => "hiscore_oldschool_deadman",
        GameMode::Seasonal => "hiscore_oldschool_seasonal",
    }
}
