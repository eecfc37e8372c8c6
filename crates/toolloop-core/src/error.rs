//! Error Types
//!
//! Two layers: [`AgentError`] aborts a turn (or startup), while
//! [`ToolError`] and [`ValidationError`] stay inside the tool invoker and
//! come back to the model as tool results.

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Agent error types
#[derive(Error, Debug)]
pub enum AgentError {
    /// Model client call failed (network, quota, malformed response)
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// Tool-call rounds for one turn exhausted
    #[error("Turn budget exceeded after {0} tool rounds")]
    TurnBudgetExceeded(usize),

    /// Tool registered twice under the same name
    #[error("Duplicate tool name: {0}")]
    DuplicateTool(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AgentError {
    /// Check if error is retryable by the caller.
    ///
    /// The loop itself never retries; this is a hint for whoever drives it.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ModelUnavailable(_))
    }

    /// Convert to a short diagnostic suitable for printing after a failed turn
    pub fn user_message(&self) -> String {
        match self {
            Self::ModelUnavailable(msg) => format!("The model service is unavailable: {msg}"),
            Self::TurnBudgetExceeded(rounds) => format!(
                "Gave up after {rounds} tool rounds without a final answer. Try a simpler request."
            ),
            Self::DuplicateTool(name) => format!("Tool '{name}' is registered twice."),
            Self::Config(msg) => format!("Configuration problem: {msg}"),
        }
    }
}

/// Failure raised by a tool handler.
///
/// Never escapes the invoker: it is folded into an `is_error` tool result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// Arguments passed schema validation but could not be decoded
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// Handler failed while running
    #[error("{0}")]
    Execution(String),
}

impl ToolError {
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidArguments(err.to_string())
    }
}

/// Schema constraint violated by a tool call's arguments
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("arguments must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("missing required field '{0}'")]
    MissingField(String),

    #[error("field '{field}' must be of type {expected}, got {actual}")]
    WrongType {
        field: String,
        expected: String,
        actual: &'static str,
    },

    #[error("field '{field}' must be one of [{allowed}], got {actual}")]
    NotInEnum {
        field: String,
        allowed: String,
        actual: String,
    },

    #[error("field '{field}' must be within [{min}, {max}], got {actual}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
        actual: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(AgentError::ModelUnavailable("timeout".into()).is_retryable());
        assert!(!AgentError::TurnBudgetExceeded(3).is_retryable());
        assert!(!AgentError::Config("missing key".into()).is_retryable());
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            AgentError::DuplicateTool("calculator".into()).user_message(),
            "Tool 'calculator' is registered twice."
        );
        assert!(AgentError::TurnBudgetExceeded(10)
            .user_message()
            .contains("10 tool rounds"));
    }

    #[test]
    fn test_validation_messages() {
        let err = ValidationError::NotInEnum {
            field: "op".into(),
            allowed: "\"upper\", \"lower\"".into(),
            actual: "\"title\"".into(),
        };
        assert_eq!(
            err.to_string(),
            "field 'op' must be one of [\"upper\", \"lower\"], got \"title\""
        );
    }
}
