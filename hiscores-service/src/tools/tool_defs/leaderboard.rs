//! Leaderboard tool definitions.

use std::collections::BTreeMap;

use serde_json::json;

use crate::catalog;
use crate::tools::registry::{ToolMetadata, ToolName};

use super::gamemode_property;

pub fn register(registry: &mut BTreeMap<ToolName, ToolMetadata>) {
    let tools = [get_skill_leaderboard(), get_activity_leaderboard()];
    for tool in tools {
        registry.insert(tool.name, tool);
    }
}

fn page_property() -> serde_json::Value {
    json!({
        "type": "integer",
        "minimum": 1,
        "default": 1,
        "description": "Page number, 25 entries per page"
    })
}

fn get_skill_leaderboard() -> ToolMetadata {
    ToolMetadata {
        name: ToolName::GetSkillLeaderboard,
        description: "Get one page of the top players for a skill, ranked by experience.",
        parameters: || {
            json!({
                "type": "object",
                "properties": {
                    "skill": {
                        "type": "string",
                        "enum": catalog::SKILLS,
                        "description": "Skill name (e.g., 'attack', 'slayer', 'overall')"
                    },
                    "gamemode": gamemode_property(),
                    "page": page_property()
                },
                "required": ["skill"]
            })
        },
    }
}

fn get_activity_leaderboard() -> ToolMetadata {
    ToolMetadata {
        name: ToolName::GetActivityLeaderboard,
        description: "Get one page of the top players for a minigame, clue scroll tier or boss, ranked by score.",
        parameters: || {
            json!({
                "type": "object",
                "properties": {
                    "activity": {
                        "type": "string",
                        "enum": catalog::activity_names().collect::<Vec<_>>(),
                        "description": "Activity or boss name (e.g., 'clue_scrolls_all', 'zulrah')"
                    },
                    "gamemode": gamemode_property(),
                    "page": page_property()
                },
                "required": ["activity"]
            })
        },
    }
}
