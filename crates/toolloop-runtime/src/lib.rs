//! # toolloop-runtime
//!
//! Model provider adapters for the toolloop agent.
//!
//! ## Providers
//!
//! - **OpenAI** (default): any OpenAI-compatible `/chat/completions`
//!   endpoint with native tool calling
//!
//! ## Usage
//!
//! ```rust,ignore
//! use toolloop_runtime::OpenAiProvider;
//!
//! let provider = OpenAiProvider::from_env()?;
//! let agent = AgentBuilder::new()
//!     .provider(Arc::new(provider))
//!     .build()?;
//! ```

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "openai")]
pub use openai::{OpenAiConfig, OpenAiProvider};

// Re-export core types for convenience
pub use toolloop_core::{
    Agent, AgentError, LlmProvider, Message, ModelTurn, Result, Role, Session, Tool, ToolRegistry,
};
