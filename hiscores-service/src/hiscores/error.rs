//! Error types for the hiscores API.

#[derive(Debug, thiserror::Error)]
pub enum HiscoresError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Player not found: {username}")]
    PlayerNotFound { username: String },

    #[error("No hiscore table for {name}")]
    UnknownMetric { name: String },

    #[error("Unexpected response: {message}")]
    MalformedResponse { message: String },
}
