//! MCP tool call handler.
//!
//! Handles execution of individual tool calls from MCP clients. Domain
//! errors are converted to protocol errors here and nowhere else.

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{ServiceError, ServiceResult, rpc_codes};
use crate::tools::{REGISTRY, ToolName};
use crate::validation::{
    ActivityLeaderboardParams, ComparePlayersParams, PlayerStatsParams, SkillLeaderboardParams,
};

use super::{McpError, McpState};

/// Handle tools/call request
pub async fn handle_tool_call(
    state: &McpState,
    params: Option<Value>,
) -> Result<Value, McpError> {
    let params =
        params.ok_or_else(|| McpError::new(rpc_codes::INVALID_PARAMS, "Missing params"))?;

    let name = params
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::new(rpc_codes::INVALID_PARAMS, "Missing tool name"))?;

    let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

    info!(tool = %name, "Tool call");
    dispatch(state, name, &arguments).await.map_err(|e| {
        warn!(tool = %name, error = %e, kind = e.error_code(), "Tool call failed");
        McpError::from(e)
    })
}

async fn dispatch(state: &McpState, name: &str, arguments: &Value) -> ServiceResult<Value> {
    let tool = REGISTRY
        .get_by_str(name)
        .map(|metadata| metadata.name)
        .ok_or_else(|| ServiceError::UnknownTool {
            name: name.to_string(),
        })?;
    let service = &state.service;

    match tool {
        ToolName::GetPlayerStats => {
            let params = PlayerStatsParams::from_arguments(arguments)?;
            text_content(&service.player_stats(&params).await?)
        }
        ToolName::GetSkillLeaderboard => {
            let params = SkillLeaderboardParams::from_arguments(arguments)?;
            text_content(&service.skill_leaderboard(&params).await?)
        }
        ToolName::GetActivityLeaderboard => {
            let params = ActivityLeaderboardParams::from_arguments(arguments)?;
            text_content(&service.activity_leaderboard(&params).await?)
        }
        ToolName::ComparePlayers => {
            let params = ComparePlayersParams::from_arguments(arguments)?;
            text_content(&service.compare_players(&params).await?)
        }
    }
}

/// Wrap a result as a single pretty-printed text content block.
fn text_content<T: Serialize>(result: &T) -> ServiceResult<Value> {
    Ok(serde_json::json!({
        "content": [{
            "type": "text",
            "text": serde_json::to_string_pretty(result)?
        }]
    }))
}

impl From<ServiceError> for McpError {
    fn from(error: ServiceError) -> Self {
        McpError {
            code: error.rpc_code(),
            message: error.to_string(),
            data: Some(serde_json::json!({ "kind": error.error_code() })),
        }
    }
}
