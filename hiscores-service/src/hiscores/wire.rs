//! Reshaping of hiscores wire payloads into the keyed raw form.
//!
//! Values stay untyped here. Besides the container layout, the only change
//! is the level filled into skill ranking rows.

use serde_json::{Map, Value};

use crate::catalog;
use crate::normalize;

use super::error::HiscoresError;

/// Turn an index_lite payload into `{ skills, activities, bosses }` objects.
///
/// index_lite lists rows with display names; an already keyed payload is
/// passed through untouched.
pub(super) fn keyed_player_record(payload: Value) -> Result<Value, HiscoresError> {
    let Value::Object(fields) = payload else {
        return Err(HiscoresError::MalformedResponse {
            message: "player stats must be a JSON object".to_string(),
        });
    };

    let is_row_list = ["skills", "activities"]
        .iter()
        .any(|key| fields.get(*key).is_some_and(Value::is_array));
    if !is_row_list {
        return Ok(Value::Object(fields));
    }

    let skills = named_rows(fields.get("skills")).collect::<Map<_, _>>();
    let (activities, bosses): (Vec<_>, Vec<_>) =
        named_rows(fields.get("activities")).partition(|(key, _)| is_activity_row(key));

    let mut record = Map::new();
    record.insert("skills".to_string(), Value::Object(skills));
    record.insert(
        "activities".to_string(),
        Value::Object(activities.into_iter().collect()),
    );
    record.insert(
        "bosses".to_string(),
        Value::Object(bosses.into_iter().collect()),
    );
    Ok(Value::Object(record))
}

/// Rows of one ranking page.
///
/// Skill tables report experience as `score` and carry no level, so `xp` is
/// set from `score` and a missing level is derived from it. Overall has no
/// such derivation; the total level depends on how experience is spread.
pub(super) fn ranking_rows(payload: Value, skill: Option<&str>) -> Result<Vec<Value>, HiscoresError> {
    let Value::Array(rows) = payload else {
        return Err(HiscoresError::MalformedResponse {
            message: "ranking page must be a JSON array".to_string(),
        });
    };

    let Some(skill) = skill else {
        return Ok(rows);
    };

    Ok(rows
        .into_iter()
        .map(|mut row| {
            if let Value::Object(fields) = &mut row {
                if !fields.contains_key("xp") {
                    if let Some(score) = fields.remove("score") {
                        fields.insert("xp".to_string(), score);
                    }
                }
                if skill != "overall" && !fields.contains_key("level") {
                    let level = fields
                        .get("xp")
                        .and_then(normalize::as_integer)
                        .map(catalog::level_for_experience);
                    if let Some(level) = level {
                        fields.insert("level".to_string(), Value::from(level));
                    }
                }
            }
            row
        })
        .collect())
}

/// Snake-case key for a display name, e.g. `"Clue Scrolls (all)"` to `clue_scrolls_all`.
pub(super) fn metric_key(display_name: &str) -> String {
    let mut key = String::with_capacity(display_name.len());
    for c in display_name.chars().filter(|c| *c != '\'') {
        if c.is_ascii_alphanumeric() {
            key.push(c.to_ascii_lowercase());
        } else if !key.is_empty() && !key.ends_with('_') {
            key.push('_');
        }
    }
    while key.ends_with('_') {
        key.pop();
    }
    key
}

fn named_rows(rows: Option<&Value>) -> impl Iterator<Item = (String, Value)> + '_ {
    rows.and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|row| {
            let name = row.get("name").and_then(Value::as_str)?;
            Some((metric_key(name), row.clone()))
        })
}

/// Rows without a known table id are treated as bosses.
fn is_activity_row(key: &str) -> bool {
    catalog::activity_table(key).is_some_and(|table| table < catalog::FIRST_BOSS_TABLE)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_metric_keys() {
        assert_eq!(metric_key("Attack"), "attack");
        assert_eq!(metric_key("Clue Scrolls (all)"), "clue_scrolls_all");
        assert_eq!(metric_key("LMS - Rank"), "lms_rank");
        assert_eq!(metric_key("K'ril Tsutsaroth"), "kril_tsutsaroth");
        assert_eq!(metric_key("Vet'ion"), "vetion");
        assert_eq!(metric_key("TzKal-Zuk"), "tzkal_zuk");
        assert_eq!(
            metric_key("Chambers of Xeric: Challenge Mode"),
            "chambers_of_xeric_challenge_mode"
        );
        assert_eq!(metric_key("Phosani's Nightmare"), "phosanis_nightmare");
    }

    #[test]
    fn test_index_lite_rows_are_keyed_and_split() {
        let payload = json!({
            "skills": [
                { "id": 0, "name": "Overall", "rank": 1000, "level": 2277, "xp": 299791070 },
                { "id": 1, "name": "Attack", "rank": 500, "level": 99, "xp": 13034431 }
            ],
            "activities": [
                { "id": 0, "name": "League Points", "rank": -1, "score": -1 },
                { "id": 6, "name": "Clue Scrolls (all)", "rank": 50, "score": 250 },
                { "id": 85, "name": "Zulrah", "rank": 100, "score": 1500 },
                { "id": 99, "rank": 1, "score": 1 }
            ]
        });

        let record = keyed_player_record(payload).unwrap();
        assert_eq!(record["skills"]["attack"]["xp"], json!(13034431));
        assert_eq!(record["skills"]["overall"]["level"], json!(2277));
        assert_eq!(record["activities"]["clue_scrolls_all"]["score"], json!(250));
        assert!(record["activities"].get("league_points").is_some());
        assert_eq!(record["bosses"]["zulrah"]["rank"], json!(100));
        assert_eq!(record["bosses"].as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_keyed_payload_passes_through() {
        let payload = json!({ "skills": { "attack": { "rank": 1 } }, "bosses": {} });
        assert_eq!(keyed_player_record(payload.clone()).unwrap(), payload);
    }

    #[test]
    fn test_non_object_player_payload_is_rejected() {
        assert!(matches!(
            keyed_player_record(json!([1, 2])),
            Err(HiscoresError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_ranking_rows() {
        let rows = ranking_rows(json!([{ "name": "BossKiller", "score": 10 }]), None).unwrap();
        assert_eq!(rows[0]["score"], json!(10));
        assert!(rows[0].get("level").is_none());

        assert!(ranking_rows(json!({ "error": "nope" }), None).is_err());
    }

    #[test]
    fn test_skill_ranking_rows_gain_level() {
        let rows = ranking_rows(
            json!([
                { "name": "Lynx Titan", "rank": "1", "score": "4,600,000,000" },
                { "name": "Mid Level", "rank": "2", "score": "6,517,253" },
                { "name": "Reported", "rank": "3", "score": 0, "level": 7 }
            ]),
            Some("attack"),
        )
        .unwrap();

        assert_eq!(rows[0]["xp"], json!("4,600,000,000"));
        assert!(rows[0].get("score").is_none());
        assert_eq!(rows[0]["level"], json!(99));
        assert_eq!(rows[1]["level"], json!(92));
        assert_eq!(rows[2]["level"], json!(7));
    }

    #[test]
    fn test_overall_ranking_rows_keep_upstream_level() {
        let rows = ranking_rows(
            json!([{ "name": "Lynx Titan", "rank": 1, "score": 4600000000u64 }]),
            Some("overall"),
        )
        .unwrap();
        assert_eq!(rows[0]["xp"], json!(4600000000u64));
        assert!(rows[0].get("level").is_none());
    }
}
