//! # toolloop-core
//!
//! Agent orchestration loop with a provider-agnostic model abstraction and
//! a name-keyed tool registry.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Session                              │
//! │  ┌─────────────┐  ┌─────────────┐  ┌──────────────────────┐  │
//! │  │  Reasoning  │  │    Tool     │  │   LlmProvider        │  │
//! │  │    Loop     │──│   Invoker   │  │   (Strategy)         │  │
//! │  └──────┬──────┘  └──────┬──────┘  └──────────────────────┘  │
//! │         │         ┌──────┴──────┐                            │
//! │         └────────▶│  Registry   │                            │
//! │                   └─────────────┘                            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tool failures never abort a turn; they come back to the model as
//! `is_error` results. Only provider failures and the round budget end a
//! turn early.

pub mod error;
pub mod invoker;
pub mod message;
pub mod provider;
pub mod reasoning;
pub mod session;
pub mod tool;

pub use error::{AgentError, Result, ToolError, ValidationError};
pub use invoker::ToolInvoker;
pub use message::{Conversation, Message, Role};
pub use provider::{GenerationOptions, LlmProvider, ModelTurn};
pub use reasoning::{Agent, AgentBuilder, AgentConfig, TurnOutcome};
pub use session::{Session, is_exit_command};
pub use tool::{ParameterSchema, Tool, ToolCall, ToolRegistry, ToolResult, ToolSchema};
