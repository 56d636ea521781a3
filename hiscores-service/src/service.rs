use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{debug, info};

use crate::compare;
use crate::error::{ServiceError, ServiceResult};
use crate::hiscores::{HiscoresError, StatsProvider};
use crate::model::{
    ActivityLeaderboard, GameMode, PlayerComparison, PlayerStats, SkillLeaderboard,
};
use crate::normalize;
use crate::validation::{
    ActivityLeaderboardParams, ComparePlayersParams, PlayerStatsParams, SkillLeaderboardParams,
};

/// Main service coordinator
///
/// Holds no per-request state; every call builds fresh values from the
/// provider's response.
pub struct HiscoresService {
    provider: Arc<dyn StatsProvider>,
}

impl HiscoresService {
    pub fn new(provider: Arc<dyn StatsProvider>) -> Self {
        info!("Initializing hiscores service");
        Self { provider }
    }

    /// Fetch and normalize a single player's stats
    pub async fn player_stats(&self, params: &PlayerStatsParams) -> ServiceResult<PlayerStats> {
        self.fetch_player(&params.username, params.gamemode).await
    }

    /// Fetch one page of a skill leaderboard
    pub async fn skill_leaderboard(
        &self,
        params: &SkillLeaderboardParams,
    ) -> ServiceResult<SkillLeaderboard> {
        let rows = self
            .provider
            .fetch_skill_page(params.skill, params.gamemode, params.page)
            .await
            .map_err(upstream("Failed to fetch skill leaderboard"))?;

        Ok(SkillLeaderboard {
            skill: params.skill.to_string(),
            gamemode: params.gamemode,
            page: params.page,
            entries: rows
                .iter()
                .map(|row| normalize::leaderboard_entry(row, true))
                .collect(),
        })
    }

    /// Fetch one page of an activity or boss leaderboard
    pub async fn activity_leaderboard(
        &self,
        params: &ActivityLeaderboardParams,
    ) -> ServiceResult<ActivityLeaderboard> {
        let rows = self
            .provider
            .fetch_activity_page(params.activity, params.gamemode, params.page)
            .await
            .map_err(upstream("Failed to fetch activity leaderboard"))?;

        Ok(ActivityLeaderboard {
            activity: params.activity.to_string(),
            gamemode: params.gamemode,
            page: params.page,
            entries: rows
                .iter()
                .map(|row| normalize::leaderboard_entry(row, false))
                .collect(),
        })
    }

    /// Fetch every player concurrently and merge their stats.
    ///
    /// The first failed fetch fails the whole comparison.
    pub async fn compare_players(
        &self,
        params: &ComparePlayersParams,
    ) -> ServiceResult<PlayerComparison> {
        let players = try_join_all(
            params
                .usernames
                .iter()
                .map(|username| self.fetch_player(username, GameMode::Main)),
        )
        .await?;

        Ok(PlayerComparison {
            usernames: params.usernames.clone(),
            focus: params.focus,
            comparison: compare::compare(&players, params.focus),
        })
    }

    async fn fetch_player(&self, username: &str, gamemode: GameMode) -> ServiceResult<PlayerStats> {
        debug!(username, %gamemode, "Fetching player");
        let raw = self
            .provider
            .fetch_player(username, gamemode)
            .await
            .map_err(upstream("Failed to fetch player stats"))?;

        Ok(normalize::player_stats(&raw, username, gamemode))
    }
}

fn upstream(context: &'static str) -> impl Fn(HiscoresError) -> ServiceError {
    move |source| ServiceError::Upstream { context, source }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::hiscores::testing::MockProvider;
    use crate::model::{EntryStats, Focus};

    fn zezima() -> serde_json::Value {
        json!({
            "skills": {
                "overall": { "rank": 1000, "level": 2277, "xp": 299791070 },
                "attack": { "rank": 500, "level": 99, "xp": 13034431 }
            },
            "bosses": {
                "zulrah": { "rank": 100, "score": 1500 },
                "vorkath": { "rank": 200, "score": 800 }
            },
            "activities": { "clue_scrolls_all": { "rank": 50, "score": 250 } }
        })
    }

    fn service(provider: MockProvider) -> (HiscoresService, Arc<MockProvider>) {
        let provider = Arc::new(provider);
        (HiscoresService::new(provider.clone()), provider)
    }

    #[tokio::test]
    async fn test_player_stats() {
        let (service, _) = service(MockProvider::new().with_player("Zezima", zezima()));
        let params = PlayerStatsParams {
            username: "Zezima".to_string(),
            gamemode: GameMode::Main,
        };

        let stats = assert_ok!(service.player_stats(&params).await);
        assert_eq!(stats.username, "Zezima");
        assert_eq!(stats.skills["attack"].experience, 13034431);
        assert_eq!(stats.bosses.len(), 2);
    }

    #[tokio::test]
    async fn test_player_stats_is_idempotent() {
        let (service, _) = service(MockProvider::new().with_player("Zezima", zezima()));
        let params = PlayerStatsParams {
            username: "Zezima".to_string(),
            gamemode: GameMode::Main,
        };

        let first = serde_json::to_string(&service.player_stats(&params).await.unwrap()).unwrap();
        let second = serde_json::to_string(&service.player_stats(&params).await.unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_player_not_found_is_upstream_error() {
        let (service, _) = service(MockProvider::new());
        let params = PlayerStatsParams {
            username: "Nobody".to_string(),
            gamemode: GameMode::Main,
        };

        let error = assert_err!(service.player_stats(&params).await);
        assert_eq!(error.error_code(), "UPSTREAM_ERROR");
        assert!(
            error
                .to_string()
                .starts_with("Failed to fetch player stats")
        );
    }

    #[tokio::test]
    async fn test_skill_leaderboard() {
        let (service, provider) = service(MockProvider::new().with_skill_rows(vec![
            json!({ "rank": 1, "username": "TopPlayer", "level": 99, "xp": 200000000, "dead": false }),
            json!({ "rank": 2, "username": "SecondPlace", "level": 99, "xp": 150000000 }),
            json!({}),
        ]));
        let params = SkillLeaderboardParams {
            skill: "attack",
            gamemode: GameMode::Main,
            page: 1,
        };

        let board = service.skill_leaderboard(&params).await.unwrap();
        assert_eq!(provider.calls(), 1);
        assert_eq!(board.skill, "attack");
        assert_eq!(board.entries.len(), 3);
        assert_eq!(board.entries[0].rank, 1);
        assert_eq!(
            board.entries[1].stats,
            EntryStats::Skill {
                level: 99,
                experience: 150000000
            }
        );
        assert_eq!(board.entries[2].username, "Unknown");
    }

    #[tokio::test]
    async fn test_activity_leaderboard() {
        let (service, _) = service(MockProvider::new().with_activity_rows(vec![
            json!({ "rank": 1, "username": "BossKiller1", "score": 5000 }),
            json!({ "rank": 2, "username": "BossKiller2", "score": 4500 }),
        ]));
        let params = ActivityLeaderboardParams {
            activity: "zulrah",
            gamemode: GameMode::Ironman,
            page: 3,
        };

        let board = service.activity_leaderboard(&params).await.unwrap();
        assert_eq!(board.activity, "zulrah");
        assert_eq!(board.gamemode, GameMode::Ironman);
        assert_eq!(board.page, 3);
        assert_eq!(board.entries[1].stats, EntryStats::Activity { score: 4500 });
    }

    #[tokio::test]
    async fn test_leaderboard_upstream_failure() {
        let (service, _) = service(MockProvider::new().with_pages_unavailable());
        let params = ActivityLeaderboardParams {
            activity: "zulrah",
            gamemode: GameMode::Main,
            page: 1,
        };

        let error = service.activity_leaderboard(&params).await.unwrap_err();
        assert!(matches!(error, ServiceError::Upstream { .. }));
        assert_eq!(
            error.to_string(),
            "Failed to fetch activity leaderboard: API error (status 503): Service Unavailable"
        );
    }

    #[tokio::test]
    async fn test_compare_players() {
        let (service, provider) = service(
            MockProvider::new()
                .with_player("A", json!({ "bosses": { "zulrah": { "rank": 100, "score": 1500 } } }))
                .with_player("B", json!({})),
        );
        let params = ComparePlayersParams {
            usernames: vec!["A".to_string(), "B".to_string()],
            focus: Focus::Bosses,
        };

        let result = service.compare_players(&params).await.unwrap();
        assert_eq!(provider.calls(), 2);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "usernames": ["A", "B"],
                "focus": "bosses",
                "comparison": {
                    "bosses": {
                        "zulrah": {
                            "A": { "rank": 100, "score": 1500 },
                            "B": { "rank": -1, "score": 0 }
                        }
                    }
                }
            })
        );
    }

    #[tokio::test]
    async fn test_compare_players_fails_on_any_missing_player() {
        let (service, _) = service(MockProvider::new().with_player("A", json!({})));
        let params = ComparePlayersParams {
            usernames: vec!["A".to_string(), "Ghost".to_string()],
            focus: Focus::All,
        };

        let error = service.compare_players(&params).await.unwrap_err();
        assert_eq!(
            error.to_string(),
            "Failed to fetch player stats: Player not found: Ghost"
        );
    }
}
