//! Tool definitions organized by category.
//!
//! Each submodule defines tools for a specific category and provides
//! a registration function that adds them to the registry.

mod compare;
mod leaderboard;
mod player;

use std::collections::BTreeMap;

use serde_json::{Value, json};
use strum::VariantNames;

use crate::model::GameMode;

use super::registry::{ToolMetadata, ToolName};

/// Register all tools from all categories into the registry.
pub fn register_all_tools(registry: &mut BTreeMap<ToolName, ToolMetadata>) {
    player::register(registry);
    leaderboard::register(registry);
    compare::register(registry);
}

/// Shared `gamemode` property schema.
fn gamemode_property() -> Value {
    json!({
        "type": "string",
        "enum": GameMode::VARIANTS,
        "default": "main",
        "description": "Game mode hiscores to query"
    })
}
