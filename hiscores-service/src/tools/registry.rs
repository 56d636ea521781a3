//! Registry of the hiscores tools.
//!
//! Tool names are derived from enum variants via strum, so the advertised
//! name and the dispatched name are always the same string.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// All tool names as an exhaustive enum.
///
/// Adding a new tool requires:
/// 1. Add variant here
/// 2. Register metadata in the matching tool_defs module
/// 3. Add a dispatch arm in mcp/tools.rs (compile error if missing)
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    GetPlayerStats,
    GetSkillLeaderboard,
    GetActivityLeaderboard,
    ComparePlayers,
}

/// Metadata for a tool definition.
#[derive(Debug, Clone)]
pub struct ToolMetadata {
    /// Tool identifier - string representation derived via strum Display
    pub name: ToolName,

    pub description: &'static str,

    /// JSON Schema for tool parameters (called lazily to avoid static initialization issues)
    pub parameters: fn() -> serde_json::Value,
}

/// Central registry of all tools.
pub struct ToolRegistry {
    tools: BTreeMap<ToolName, ToolMetadata>,
}

impl ToolRegistry {
    /// Build the registry from all registered tool definitions
    pub fn new() -> Self {
        let mut tools = BTreeMap::new();

        super::tool_defs::register_all_tools(&mut tools);

        Self { tools }
    }

    /// Get all tools as MCP tool definitions, in declaration order
    pub fn mcp_definitions(&self) -> Vec<McpToolDefinition> {
        self.tools
            .values()
            .map(|t| McpToolDefinition {
                name: t.name.to_string(),
                description: t.description.to_string(),
                input_schema: (t.parameters)(),
            })
            .collect()
    }

    /// Get metadata by string name
    pub fn get_by_str(&self, name: &str) -> Option<&ToolMetadata> {
        ToolName::from_str(name)
            .ok()
            .and_then(|n| self.tools.get(&n))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.tools.len()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global singleton registry instance
pub static REGISTRY: LazyLock<ToolRegistry> = LazyLock::new(ToolRegistry::new);

/// MCP tool definition structure (for output generation)
#[derive(Debug, Clone, Serialize)]
pub struct McpToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}
