//! Canonical data model.
//!
//! Everything in here is a request-scoped value built by the normalizer or
//! the comparison engine and serialized straight into a tool response.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use strum::{Display, EnumString, VariantNames};

/// Hiscore account type.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumString,
    Display,
    VariantNames,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    Main,
    Ironman,
    HardcoreIronman,
    UltimateIronman,
    Deadman,
    Seasonal,
}

/// Comparison categories a caller can focus on.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumString,
    Display,
    VariantNames,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    Skills,
    Bosses,
    Activities,
    #[default]
    All,
}

/// A single group of metrics inside a player document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Skills,
    Bosses,
    Activities,
}

impl Focus {
    /// Categories populated for this focus.
    pub fn categories(self) -> &'static [Category] {
        match self {
            Focus::Skills => &[Category::Skills],
            Focus::Bosses => &[Category::Bosses],
            Focus::Activities => &[Category::Activities],
            Focus::All => &[Category::Skills, Category::Bosses, Category::Activities],
        }
    }
}

/// Rank, level and experience for one skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkillRecord {
    pub rank: i64,
    pub level: i64,
    pub experience: i64,
}

impl SkillRecord {
    pub const UNRANKED: SkillRecord = SkillRecord {
        rank: -1,
        level: 1,
        experience: 0,
    };
}

/// Rank and score for an activity or boss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityRecord {
    pub rank: i64,
    pub score: i64,
}

impl ActivityRecord {
    pub const UNRANKED: ActivityRecord = ActivityRecord { rank: -1, score: 0 };
}

/// Normalized statistics for one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStats {
    pub username: String,
    pub gamemode: GameMode,
    pub skills: BTreeMap<String, SkillRecord>,
    pub activities: BTreeMap<String, ActivityRecord>,
    pub bosses: BTreeMap<String, ActivityRecord>,
}

/// One row of a leaderboard page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub username: String,
    #[serde(flatten)]
    pub stats: EntryStats,
}

/// Skill rows carry level and experience, activity rows a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EntryStats {
    Skill { level: i64, experience: i64 },
    Activity { score: i64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillLeaderboard {
    pub skill: String,
    pub gamemode: GameMode,
    pub page: u32,
    pub entries: Vec<LeaderboardEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityLeaderboard {
    pub activity: String,
    pub gamemode: GameMode,
    pub page: u32,
    pub entries: Vec<LeaderboardEntry>,
}

/// String-keyed map that serializes in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V>(Vec<(String, V)>);

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert or replace, keeping the original position of an existing key.
    pub fn insert(&mut self, key: String, value: V) {
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    #[cfg(test)]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<(String, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Metric name to (username to record).
pub type MetricTable<R> = OrderedMap<OrderedMap<R>>;

/// Per-category comparison tables; only the focused categories are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<MetricTable<SkillRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bosses: Option<MetricTable<ActivityRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activities: Option<MetricTable<ActivityRecord>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerComparison {
    pub usernames: Vec<String>,
    pub focus: Focus,
    pub comparison: ComparisonData,
}
