//! Conversion from raw upstream payloads into the canonical model.
//!
//! Every function here is total: malformed or partial input produces a
//! fully-defaulted record, never an error. No other module reads raw
//! upstream fields.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::catalog;
use crate::model::{ActivityRecord, EntryStats, GameMode, LeaderboardEntry, PlayerStats, SkillRecord};

const UNKNOWN_USERNAME: &str = "Unknown";

/// Build a player document from a keyed upstream record.
pub fn player_stats(raw: &Value, username: &str, gamemode: GameMode) -> PlayerStats {
    let skills = record_group(raw.get("skills"), skill_record)
        .into_iter()
        .filter_map(|(name, record)| catalog::find_skill(&name).map(|s| (s.to_string(), record)))
        .collect();

    PlayerStats {
        username: username.to_string(),
        gamemode,
        skills,
        activities: record_group(raw.get("activities"), activity_record),
        bosses: record_group(raw.get("bosses"), activity_record),
    }
}

pub fn skill_record(raw: &Value) -> SkillRecord {
    SkillRecord {
        rank: int_field(raw, &["rank"]).unwrap_or(SkillRecord::UNRANKED.rank),
        level: int_field(raw, &["level"]).unwrap_or(SkillRecord::UNRANKED.level),
        experience: int_field(raw, &["xp", "experience"])
            .unwrap_or(SkillRecord::UNRANKED.experience),
    }
}

pub fn activity_record(raw: &Value) -> ActivityRecord {
    ActivityRecord {
        rank: int_field(raw, &["rank"]).unwrap_or(ActivityRecord::UNRANKED.rank),
        score: int_field(raw, &["score"]).unwrap_or(ActivityRecord::UNRANKED.score),
    }
}

/// Build a leaderboard row.
///
/// Skill and activity rows share no distinguishing field, so the caller says
/// which one it asked for.
pub fn leaderboard_entry(raw: &Value, is_skill_metric: bool) -> LeaderboardEntry {
    let stats = if is_skill_metric {
        let record = skill_record(raw);
        EntryStats::Skill {
            level: record.level,
            experience: record.experience,
        }
    } else {
        EntryStats::Activity {
            score: activity_record(raw).score,
        }
    };

    LeaderboardEntry {
        rank: int_field(raw, &["rank"]).unwrap_or(-1),
        username: str_field(raw, &["username", "name"])
            .unwrap_or(UNKNOWN_USERNAME)
            .to_string(),
        stats,
    }
}

/// Collapse whitespace runs to a single space and trim. Case is preserved.
pub fn sanitize_username(username: &str) -> String {
    username.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize every object-valued entry of a keyed group. Anything else is skipped.
fn record_group<R>(raw: Option<&Value>, normalize: fn(&Value) -> R) -> BTreeMap<String, R> {
    raw.and_then(Value::as_object)
        .map(|group| {
            group
                .iter()
                .filter(|(_, entry)| entry.is_object())
                .map(|(name, entry)| (name.clone(), normalize(entry)))
                .collect()
        })
        .unwrap_or_default()
}

/// First key holding something that reads as an integer.
fn int_field(raw: &Value, keys: &[&str]) -> Option<i64> {
    keys.iter().find_map(|key| raw.get(*key).and_then(as_integer))
}

fn str_field<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| {
        raw.get(*key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    })
}

/// Integers, integral floats, and numeric strings such as `"1,234"`.
pub(crate) fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}
