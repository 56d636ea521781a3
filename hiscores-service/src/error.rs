use thiserror::Error;

use crate::hiscores::HiscoresError;

/// JSON-RPC error codes used at the protocol boundary.
pub mod rpc_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
    pub const SERVER_ERROR: i32 = -32000;
}

/// Main service error type
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("{context}: {source}")]
    Upstream {
        context: &'static str,
        #[source]
        source: HiscoresError,
    },

    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ServiceError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ServiceError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Taxonomy name reported to callers.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::Validation { .. } => "VALIDATION_ERROR",
            ServiceError::Upstream { .. } => "UPSTREAM_ERROR",
            ServiceError::UnknownTool { .. } => "UNKNOWN_TOOL",
            ServiceError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn rpc_code(&self) -> i32 {
        match self {
            ServiceError::Validation { .. } => rpc_codes::INVALID_PARAMS,
            ServiceError::Upstream { .. } => rpc_codes::SERVER_ERROR,
            ServiceError::UnknownTool { .. } => rpc_codes::METHOD_NOT_FOUND,
            ServiceError::Internal { .. } => rpc_codes::INTERNAL_ERROR,
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(error: serde_json::Error) -> Self {
        ServiceError::Internal {
            message: format!("Failed to serialize response: {}", error),
        }
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_and_codes() {
        let error = ServiceError::validation("username", "must be at most 12 characters");
        assert_eq!(
            error.to_string(),
            "Invalid username: must be at most 12 characters"
        );
        assert_eq!(error.error_code(), "VALIDATION_ERROR");
        assert_eq!(error.rpc_code(), rpc_codes::INVALID_PARAMS);

        let error = ServiceError::Upstream {
            context: "Failed to fetch player stats",
            source: HiscoresError::PlayerNotFound {
                username: "Zezima".to_string(),
            },
        };
        assert_eq!(
            error.to_string(),
            "Failed to fetch player stats: Player not found: Zezima"
        );
        assert_eq!(error.error_code(), "UPSTREAM_ERROR");

        let error = ServiceError::UnknownTool {
            name: "does_not_exist".to_string(),
        };
        assert_eq!(error.to_string(), "Unknown tool: does_not_exist");
        assert_eq!(error.rpc_code(), rpc_codes::METHOD_NOT_FOUND);
    }
}
