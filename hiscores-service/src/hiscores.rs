//! Old School RuneScape hiscores integration.
//!
//! The rest of the service only sees the [`StatsProvider`] trait, which hands
//! back untyped upstream records for the normalizer to convert.
//! [`HiscoresClient`] is the HTTP implementation against the official
//! hiscores endpoints.

mod client;
mod error;
mod wire;

use futures::future::BoxFuture;
use serde_json::Value;

use crate::model::GameMode;

pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, HiscoresClient};
pub use error::HiscoresError;

/// Rows per leaderboard page.
pub const PAGE_SIZE: u32 = 25;

/// Read-only access to the upstream statistics provider.
///
/// Implementations make exactly one attempt per call and report any failure
/// as a [`HiscoresError`].
pub trait StatsProvider: Send + Sync {
    /// Keyed raw record: `{ skills: {..}, activities: {..}, bosses: {..} }`.
    fn fetch_player<'a>(
        &'a self,
        username: &'a str,
        gamemode: GameMode,
    ) -> BoxFuture<'a, Result<Value, HiscoresError>>;

    fn fetch_skill_page<'a>(
        &'a self,
        skill: &'a str,
        gamemode: GameMode,
        page: u32,
    ) -> BoxFuture<'a, Result<Vec<Value>, HiscoresError>>;

    fn fetch_activity_page<'a>(
        &'a self,
        activity: &'a str,
        gamemode: GameMode,
        page: u32,
    ) -> BoxFuture<'a, Result<Vec<Value>, HiscoresError>>;
}
