//! Argument validation for tool calls.
//!
//! Each parameter record is built from the raw `arguments` object of a
//! `tools/call` request. Validation never touches the network; a record that
//! comes out of here is complete, with every default filled in.

use std::collections::HashSet;
use std::str::FromStr;

use serde_json::{Map, Value};
use strum::VariantNames;

use crate::catalog;
use crate::error::{ServiceError, ServiceResult};
use crate::model::{Focus, GameMode};
use crate::normalize::sanitize_username;

pub const MAX_USERNAME_LEN: usize = 12;
pub const MIN_COMPARE_PLAYERS: usize = 2;
pub const MAX_COMPARE_PLAYERS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStatsParams {
    pub username: String,
    pub gamemode: GameMode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillLeaderboardParams {
    pub skill: &'static str,
    pub gamemode: GameMode,
    pub page: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityLeaderboardParams {
    pub activity: &'static str,
    pub gamemode: GameMode,
    pub page: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparePlayersParams {
    pub usernames: Vec<String>,
    pub focus: Focus,
}

impl PlayerStatsParams {
    pub fn from_arguments(arguments: &Value) -> ServiceResult<Self> {
        let args = arguments_object(arguments)?;
        Ok(Self {
            username: username("username", required(args, "username")?)?,
            gamemode: gamemode(args)?,
        })
    }
}

impl SkillLeaderboardParams {
    pub fn from_arguments(arguments: &Value) -> ServiceResult<Self> {
        let args = arguments_object(arguments)?;
        let name = string("skill", required(args, "skill")?)?;
        let skill = catalog::find_skill(name).ok_or_else(|| {
            ServiceError::validation(
                "skill",
                format!(
                    "unknown skill '{}'. Valid skills: {}",
                    name,
                    catalog::SKILLS.join(", ")
                ),
            )
        })?;

        Ok(Self {
            skill,
            gamemode: gamemode(args)?,
            page: page(args)?,
        })
    }
}

impl ActivityLeaderboardParams {
    pub fn from_arguments(arguments: &Value) -> ServiceResult<Self> {
        let args = arguments_object(arguments)?;
        let name = string("activity", required(args, "activity")?)?;
        let activity = catalog::find_activity(name).ok_or_else(|| {
            ServiceError::validation(
                "activity",
                format!("unknown activity or boss '{}'", name),
            )
        })?;

        Ok(Self {
            activity,
            gamemode: gamemode(args)?,
            page: page(args)?,
        })
    }
}

impl ComparePlayersParams {
    pub fn from_arguments(arguments: &Value) -> ServiceResult<Self> {
        let args = arguments_object(arguments)?;
        let list = required(args, "usernames")?
            .as_array()
            .ok_or_else(|| ServiceError::validation("usernames", "must be an array of strings"))?;

        if list.len() < MIN_COMPARE_PLAYERS {
            return Err(ServiceError::validation(
                "usernames",
                format!("at least {} usernames required", MIN_COMPARE_PLAYERS),
            ));
        }
        if list.len() > MAX_COMPARE_PLAYERS {
            return Err(ServiceError::validation(
                "usernames",
                format!("maximum {} usernames allowed", MAX_COMPARE_PLAYERS),
            ));
        }

        let mut seen = HashSet::new();
        let mut usernames = Vec::with_capacity(list.len());
        for (index, value) in list.iter().enumerate() {
            let field = format!("usernames[{}]", index);
            let name = username(&field, value)?;
            if !seen.insert(name.to_lowercase()) {
                return Err(ServiceError::validation(
                    field,
                    format!("duplicate username '{}'", name),
                ));
            }
            usernames.push(name);
        }

        let focus = match optional(args, "focus") {
            None => Focus::default(),
            Some(value) => {
                let name = string("focus", value)?;
                Focus::from_str(name).map_err(|_| {
                    ServiceError::validation(
                        "focus",
                        format!(
                            "unknown focus '{}'. Valid options: {}",
                            name,
                            Focus::VARIANTS.join(", ")
                        ),
                    )
                })?
            }
        };

        Ok(Self { usernames, focus })
    }
}

/// Validate a username and return its sanitized form.
pub fn username(field: &str, value: &Value) -> ServiceResult<String> {
    let raw = string(field, value)?;
    let length = raw.chars().count();

    if length == 0 {
        return Err(ServiceError::validation(field, "username is required"));
    }
    if length > MAX_USERNAME_LEN {
        return Err(ServiceError::validation(
            field,
            format!("username cannot be longer than {} characters", MAX_USERNAME_LEN),
        ));
    }
    if !raw.chars().all(is_username_char) {
        return Err(ServiceError::validation(
            field,
            "username may only contain letters, digits, spaces, '-' and '_'",
        ));
    }

    let sanitized = sanitize_username(raw);
    if sanitized.is_empty() {
        return Err(ServiceError::validation(field, "username cannot be blank"));
    }
    Ok(sanitized)
}

fn is_username_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ' ')
}

fn arguments_object(arguments: &Value) -> ServiceResult<&Map<String, Value>> {
    static EMPTY: std::sync::LazyLock<Map<String, Value>> = std::sync::LazyLock::new(Map::new);

    match arguments {
        Value::Null => Ok(&EMPTY),
        Value::Object(map) => Ok(map),
        _ => Err(ServiceError::validation("arguments", "must be a JSON object")),
    }
}

fn required<'a>(args: &'a Map<String, Value>, field: &str) -> ServiceResult<&'a Value> {
    optional(args, field)
        .ok_or_else(|| ServiceError::validation(field, format!("{} is required", field)))
}

/// Absent and `null` both mean "use the default".
fn optional<'a>(args: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    args.get(field).filter(|value| !value.is_null())
}

fn string<'a>(field: &str, value: &'a Value) -> ServiceResult<&'a str> {
    value
        .as_str()
        .ok_or_else(|| ServiceError::validation(field, "must be a string"))
}

fn gamemode(args: &Map<String, Value>) -> ServiceResult<GameMode> {
    let Some(value) = optional(args, "gamemode") else {
        return Ok(GameMode::default());
    };
    let name = string("gamemode", value)?;
    GameMode::from_str(name).map_err(|_| {
        ServiceError::validation(
            "gamemode",
            format!(
                "unknown gamemode '{}'. Valid options: {}",
                name,
                GameMode::VARIANTS.join(", ")
            ),
        )
    })
}

fn page(args: &Map<String, Value>) -> ServiceResult<u32> {
    let Some(value) = optional(args, "page") else {
        return Ok(1);
    };
    value
        .as_u64()
        .filter(|page| *page >= 1)
        .and_then(|page| u32::try_from(page).ok())
        .ok_or_else(|| ServiceError::validation("page", "must be a positive integer"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn assert_invalid<T: std::fmt::Debug>(result: ServiceResult<T>, expected_field: &str) {
        match result {
            Err(ServiceError::Validation { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected validation error on {}, got {:?}", expected_field, other),
        }
    }

    #[test]
    fn test_player_stats_defaults() {
        let params = PlayerStatsParams::from_arguments(&json!({ "username": "Zezima" })).unwrap();
        assert_eq!(params.username, "Zezima");
        assert_eq!(params.gamemode, GameMode::Main);

        let params = PlayerStatsParams::from_arguments(
            &json!({ "username": "  Iron  Man ", "gamemode": "hardcore_ironman" }),
        )
        .unwrap();
        assert_eq!(params.username, "Iron Man");
        assert_eq!(params.gamemode, GameMode::HardcoreIronman);
    }

    #[test]
    fn test_username_rules() {
        assert_invalid(username("username", &json!("")), "username");
        assert_invalid(username("username", &json!("ThisIsFourteen")), "username");
        assert_invalid(username("username", &json!("ThirteenChars")), "username");
        assert_invalid(username("username", &json!("bad!name")), "username");
        assert_invalid(username("username", &json!("émile")), "username");
        assert_invalid(username("username", &json!("   ")), "username");
        assert_invalid(username("username", &json!(42)), "username");

        for valid in ["a", "Zezima", "ab_cd-ef 123", "TwelveChars1"] {
            assert!(username("username", &json!(valid)).is_ok(), "{}", valid);
        }
    }

    #[test]
    fn test_player_stats_rejects_bad_input() {
        assert_invalid(PlayerStatsParams::from_arguments(&json!({})), "username");
        assert_invalid(PlayerStatsParams::from_arguments(&json!(null)), "username");
        assert_invalid(PlayerStatsParams::from_arguments(&json!("Zezima")), "arguments");
        assert_invalid(
            PlayerStatsParams::from_arguments(
                &json!({ "username": "TestPlayer", "gamemode": "invalid_mode" }),
            ),
            "gamemode",
        );
        assert_invalid(
            PlayerStatsParams::from_arguments(&json!({ "username": "ThisUsernameIsWayTooLongForOSRS" })),
            "username",
        );
    }

    #[test]
    fn test_skill_leaderboard() {
        let params = SkillLeaderboardParams::from_arguments(&json!({ "skill": "Attack" })).unwrap();
        assert_eq!(params.skill, "attack");
        assert_eq!(params.gamemode, GameMode::Main);
        assert_eq!(params.page, 1);

        let params = SkillLeaderboardParams::from_arguments(
            &json!({ "skill": "slayer", "gamemode": "ironman", "page": 4 }),
        )
        .unwrap();
        assert_eq!(params.page, 4);
        assert_eq!(params.gamemode, GameMode::Ironman);

        assert_invalid(
            SkillLeaderboardParams::from_arguments(&json!({ "skill": "invalid_skill" })),
            "skill",
        );
        assert_invalid(SkillLeaderboardParams::from_arguments(&json!({})), "skill");
    }

    #[test]
    fn test_page_rules() {
        for bad in [json!(0), json!(-1), json!(1.5), json!("2")] {
            assert_invalid(
                SkillLeaderboardParams::from_arguments(&json!({ "skill": "attack", "page": bad })),
                "page",
            );
        }
        let params =
            SkillLeaderboardParams::from_arguments(&json!({ "skill": "attack", "page": null }))
                .unwrap();
        assert_eq!(params.page, 1);
    }

    #[test]
    fn test_activity_leaderboard_accepts_bosses_and_activities() {
        let params =
            ActivityLeaderboardParams::from_arguments(&json!({ "activity": "Zulrah", "page": 2 }))
                .unwrap();
        assert_eq!(params.activity, "zulrah");
        assert_eq!(params.page, 2);

        let params =
            ActivityLeaderboardParams::from_arguments(&json!({ "activity": "clue_scrolls_all" }))
                .unwrap();
        assert_eq!(params.activity, "clue_scrolls_all");

        assert_invalid(
            ActivityLeaderboardParams::from_arguments(&json!({ "activity": "attack" })),
            "activity",
        );
    }

    #[test]
    fn test_compare_players() {
        let params =
            ComparePlayersParams::from_arguments(&json!({ "usernames": ["A", "B"] })).unwrap();
        assert_eq!(params.usernames, vec!["A", "B"]);
        assert_eq!(params.focus, Focus::All);

        let params = ComparePlayersParams::from_arguments(
            &json!({ "usernames": ["One", "Two", "Three", "Four", "Five"], "focus": "bosses" }),
        )
        .unwrap();
        assert_eq!(params.usernames.len(), 5);
        assert_eq!(params.focus, Focus::Bosses);
    }

    #[test]
    fn test_compare_players_cardinality_and_items() {
        assert_invalid(
            ComparePlayersParams::from_arguments(&json!({ "usernames": ["Solo"] })),
            "usernames",
        );
        assert_invalid(
            ComparePlayersParams::from_arguments(
                &json!({ "usernames": ["a", "b", "c", "d", "e", "f"] }),
            ),
            "usernames",
        );
        assert_invalid(
            ComparePlayersParams::from_arguments(&json!({ "usernames": "A,B" })),
            "usernames",
        );
        assert_invalid(
            ComparePlayersParams::from_arguments(&json!({ "usernames": ["A", ""] })),
            "usernames[1]",
        );
        assert_invalid(
            ComparePlayersParams::from_arguments(&json!({ "usernames": ["Zezima", "zezima"] })),
            "usernames[1]",
        );
        assert_invalid(
            ComparePlayersParams::from_arguments(
                &json!({ "usernames": ["A", "B"], "focus": "quests" }),
            ),
            "focus",
        );
    }
}
