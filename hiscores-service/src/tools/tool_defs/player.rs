//! Single-player tool definitions.

use std::collections::BTreeMap;

use serde_json::json;

use crate::tools::registry::{ToolMetadata, ToolName};
use crate::validation::MAX_USERNAME_LEN;

use super::gamemode_property;

pub fn register(registry: &mut BTreeMap<ToolName, ToolMetadata>) {
    let tool = get_player_stats();
    registry.insert(tool.name, tool);
}

fn get_player_stats() -> ToolMetadata {
    ToolMetadata {
        name: ToolName::GetPlayerStats,
        description: "Get a player's skill levels, experience, boss kill counts and activity scores from the Old School RuneScape hiscores.",
        parameters: || {
            json!({
                "type": "object",
                "properties": {
                    "username": {
                        "type": "string",
                        "minLength": 1,
                        "maxLength": MAX_USERNAME_LEN,
                        "description": "RuneScape display name (letters, digits, spaces, '-' and '_')"
                    },
                    "gamemode": gamemode_property()
                },
                "required": ["username"]
            })
        },
    }
}
