//! Multi-player comparison tool definition.

use std::collections::BTreeMap;

use serde_json::json;
use strum::VariantNames;

use crate::model::Focus;
use crate::tools::registry::{ToolMetadata, ToolName};
use crate::validation::{MAX_COMPARE_PLAYERS, MAX_USERNAME_LEN, MIN_COMPARE_PLAYERS};

pub fn register(registry: &mut BTreeMap<ToolName, ToolMetadata>) {
    let tool = compare_players();
    registry.insert(tool.name, tool);
}

fn compare_players() -> ToolMetadata {
    ToolMetadata {
        name: ToolName::ComparePlayers,
        description: "Compare the main-game hiscores of several players side by side. Metrics a player has no record for show rank -1.",
        parameters: || {
            json!({
                "type": "object",
                "properties": {
                    "usernames": {
                        "type": "array",
                        "items": {
                            "type": "string",
                            "minLength": 1,
                            "maxLength": MAX_USERNAME_LEN
                        },
                        "minItems": MIN_COMPARE_PLAYERS,
                        "maxItems": MAX_COMPARE_PLAYERS,
                        "description": "Display names of the players to compare"
                    },
                    "focus": {
                        "type": "string",
                        "enum": Focus::VARIANTS,
                        "default": "all",
                        "description": "Which categories to compare"
                    }
                },
                "required": ["usernames"]
            })
        },
    }
}
