//! Tool catalog exposed over MCP.
//!
//! Tool names come from the [`ToolName`] enum, so the `tools/list` output and
//! `tools/call` dispatch cannot drift apart.

mod registry;
mod tool_defs;

pub use registry::{REGISTRY, ToolName};
