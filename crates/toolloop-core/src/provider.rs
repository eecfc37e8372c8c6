//! LLM Provider Strategy Pattern
//!
//! Defines the contract the orchestration loop relies on for talking to a
//! chat model. Adapters receive the complete history and the advertised
//! tool schemas on every call; no server-side memory is assumed.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use toolloop_core::provider::{GenerationOptions, LlmProvider, ModelTurn};
//!
//! let turn = provider.complete(conversation.messages(), &schemas, &options).await?;
//! match turn {
//!     ModelTurn::FinalAnswer(text) => println!("{text}"),
//!     ModelTurn::ToolCalls { calls, .. } => { /* run tools */ }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::message::Message;
use crate::tool::{ToolCall, ToolSchema};

/// Configuration for model generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Model identifier (e.g., "gpt-4o", "gpt-4o-mini")
    pub model: String,

    /// Temperature for sampling (0.0 = deterministic)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

const fn default_temperature() -> f32 {
    0.0
}
const fn default_max_tokens() -> u32 {
    1024
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: "gpt-4o".into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// What the model decided to do with the current history
#[derive(Clone, Debug, PartialEq)]
pub enum ModelTurn {
    /// Plain answer, ends the turn
    FinalAnswer(String),

    /// One or more tool calls, in the order the model listed them
    ToolCalls {
        /// Text the model emitted alongside the calls (often empty)
        content: String,
        calls: Vec<ToolCall>,
    },
}

impl ModelTurn {
    pub fn tool_calls(calls: Vec<ToolCall>) -> Self {
        Self::ToolCalls {
            content: String::new(),
            calls,
        }
    }
}

/// Strategy trait for model providers
///
/// Implement this trait to add support for new chat backends.
/// The agent works exclusively through this interface.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Ask the model for its next move.
    ///
    /// Any transport, quota or decoding failure must be reported as
    /// [`AgentError::ModelUnavailable`](crate::AgentError::ModelUnavailable).
    async fn complete(
        &self,
        history: &[Message],
        tools: &[ToolSchema],
        options: &GenerationOptions,
    ) -> Result<ModelTurn>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_options_defaults() {
        let opts = GenerationOptions::default();
        assert!(opts.temperature.abs() < f32::EPSILON);
        assert_eq!(opts.max_tokens, 1024);
        assert_eq!(opts.model, "gpt-4o");
    }
}
