//! Side-by-side comparison of player documents.
//!
//! Every player appears under every metric of a focused category. Metrics a
//! player has no record for get the unranked sentinel, so consumers never
//! need to check whether a player key exists.

use std::collections::{BTreeMap, BTreeSet};

use crate::catalog;
use crate::model::{
    ActivityRecord, Category, ComparisonData, Focus, MetricTable, OrderedMap, PlayerStats,
    SkillRecord,
};

/// Build comparison tables for the categories implied by `focus`.
///
/// Player order in every row follows the order of `players`.
pub fn compare(players: &[PlayerStats], focus: Focus) -> ComparisonData {
    let mut data = ComparisonData::default();
    for category in focus.categories() {
        match category {
            Category::Skills => data.skills = Some(compare_skills(players)),
            Category::Bosses => data.bosses = Some(compare_group(players, |p| &p.bosses)),
            Category::Activities => {
                data.activities = Some(compare_group(players, |p| &p.activities))
            }
        }
    }
    data
}

/// Skills use the fixed catalog rather than whatever the inputs carry.
fn compare_skills(players: &[PlayerStats]) -> MetricTable<SkillRecord> {
    catalog::SKILLS
        .iter()
        .map(|skill| {
            let row: OrderedMap<SkillRecord> = players
                .iter()
                .map(|player| {
                    let record = player
                        .skills
                        .get(*skill)
                        .copied()
                        .unwrap_or(SkillRecord::UNRANKED);
                    (player.username.clone(), record)
                })
                .collect();
            (skill.to_string(), row)
        })
        .collect()
}

/// Activities and bosses use the union of keys present across all players.
fn compare_group(
    players: &[PlayerStats],
    group: fn(&PlayerStats) -> &BTreeMap<String, ActivityRecord>,
) -> MetricTable<ActivityRecord> {
    let metrics: BTreeSet<&str> = players
        .iter()
        .flat_map(|player| group(player).keys().map(String::as_str))
        .collect();

    metrics
        .into_iter()
        .map(|metric| {
            let row: OrderedMap<ActivityRecord> = players
                .iter()
                .map(|player| {
                    let record = group(player)
                        .get(metric)
                        .copied()
                        .unwrap_or(ActivityRecord::UNRANKED);
                    (player.username.clone(), record)
                })
                .collect();
            (metric.to_string(), row)
        })
        .collect()
}
