//! Reasoning Loop
//!
//! Drives the model through tool-call rounds until it produces a final
//! answer:
//!
//! ```text
//!   AwaitingModel ──FinalAnswer──────────────▶ Done
//!        │  ▲
//!   ToolCalls  all results appended
//!        ▼  │
//!   ExecutingTools
//!
//!   AwaitingModel ──adapter error / budget──▶ Failed
//! ```
//!
//! Tool calls of one round run concurrently; their results are appended in
//! request order so the next model call sees a deterministic history.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{AgentError, Result};
use crate::invoker::ToolInvoker;
use crate::message::{Conversation, Message};
use crate::provider::{GenerationOptions, LlmProvider, ModelTurn};
use crate::tool::{Tool, ToolCall, ToolRegistry, ToolSchema};

/// Agent configuration
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// System prompt placed ahead of every user request
    pub system_prompt: Option<String>,

    /// Maximum tool-call rounds per turn before giving up
    pub max_rounds: usize,

    /// Generation options
    pub generation: GenerationOptions,

    /// Whether to append tool descriptions to the system prompt
    pub inject_tool_descriptions: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_prompt: None,
            max_rounds: DEFAULT_MAX_ROUNDS,
            generation: GenerationOptions::default(),
            inject_tool_descriptions: false,
        }
    }
}

pub const DEFAULT_MAX_ROUNDS: usize = 10;

/// Loop states
#[derive(Debug)]
enum LoopState {
    AwaitingModel,
    ExecutingTools(Vec<ToolCall>),
    Done(String),
    Failed(AgentError),
}

/// Result of a completed turn
#[derive(Clone, Debug)]
pub struct TurnOutcome {
    /// Final answer text
    pub answer: String,

    /// Tool rounds executed before the answer
    pub rounds: usize,

    /// Full history of the turn, excluding the final answer
    pub conversation: Conversation,
}

/// The main Agent struct
pub struct Agent {
    provider: Arc<dyn LlmProvider>,
    invoker: ToolInvoker,
    config: AgentConfig,
}

impl Agent {
    /// Create a new agent
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        tools: Arc<ToolRegistry>,
        config: AgentConfig,
    ) -> Self {
        Self {
            provider,
            invoker: ToolInvoker::new(tools),
            config,
        }
    }

    /// Create with default configuration
    pub fn with_defaults(provider: Arc<dyn LlmProvider>, tools: Arc<ToolRegistry>) -> Self {
        Self::new(provider, tools, AgentConfig::default())
    }

    /// Build the full system prompt including tool descriptions
    pub fn system_prompt(&self) -> Option<String> {
        let tools = self.invoker.registry();
        let mut prompt = self.config.system_prompt.clone();

        if self.config.inject_tool_descriptions && !tools.is_empty() {
            let base = prompt.get_or_insert_with(String::new);
            if !base.is_empty() {
                base.push_str("\n\n");
            }
            base.push_str(&tools.generate_prompt_section());
        }

        prompt
    }

    /// Seed history for one turn: optional system prompt, then the user text
    pub fn seed(&self, user_text: &str) -> Conversation {
        let mut conversation = self
            .system_prompt()
            .map_or_else(Conversation::new, Conversation::with_system_prompt);
        conversation.push(Message::user(user_text));
        conversation
    }

    /// Run the loop over a seeded conversation.
    ///
    /// On failure the partial history is dropped with the error.
    pub async fn run(&self, mut conversation: Conversation) -> Result<TurnOutcome> {
        let schemas: Vec<ToolSchema> = self.invoker.registry().schemas();
        let max_rounds = self.config.max_rounds;
        let mut rounds = 0;
        let mut state = LoopState::AwaitingModel;

        loop {
            state = match state {
                LoopState::AwaitingModel => {
                    tracing::debug!(
                        provider = self.provider.name(),
                        messages = conversation.len(),
                        "Awaiting model"
                    );
                    match self
                        .provider
                        .complete(conversation.messages(), &schemas, &self.config.generation)
                        .await
                    {
                        Ok(ModelTurn::FinalAnswer(text)) => LoopState::Done(text),
                        Ok(ModelTurn::ToolCalls { content, calls }) if calls.is_empty() => {
                            LoopState::Done(content)
                        }
                        Ok(ModelTurn::ToolCalls { .. }) if rounds >= max_rounds => {
                            LoopState::Failed(AgentError::TurnBudgetExceeded(max_rounds))
                        }
                        Ok(ModelTurn::ToolCalls { content, calls }) => {
                            let calls = ensure_unique_ids(calls);
                            conversation.push(Message::assistant_with_calls(content, calls.clone()));
                            LoopState::ExecutingTools(calls)
                        }
                        Err(e) => LoopState::Failed(e),
                    }
                }
                LoopState::ExecutingTools(calls) => {
                    rounds += 1;
                    tracing::info!(
                        round = rounds,
                        tools = ?calls.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
                        "Executing tool calls"
                    );
                    let results = self.invoker.invoke_all(&calls).await;
                    conversation.extend(results.into_iter().map(Message::tool));
                    LoopState::AwaitingModel
                }
                LoopState::Done(answer) => {
                    tracing::debug!(rounds, "Turn complete");
                    return Ok(TurnOutcome {
                        answer,
                        rounds,
                        conversation,
                    });
                }
                LoopState::Failed(e) => {
                    tracing::debug!(rounds, error = %e, "Loop stopped");
                    return Err(e);
                }
            };
        }
    }

    /// Run a single user request from a fresh history
    pub async fn ask(&self, question: &str) -> Result<String> {
        let outcome = self.run(self.seed(question)).await?;
        Ok(outcome.answer)
    }

    /// Get the tool registry
    pub fn tools(&self) -> &ToolRegistry {
        self.invoker.registry()
    }

    /// Get configuration
    pub const fn config(&self) -> &AgentConfig {
        &self.config
    }
}

/// Give every call a non-empty id that is unique within the message.
///
/// Ids from the model are kept verbatim; only blank or colliding ones are
/// replaced.
fn ensure_unique_ids(calls: Vec<ToolCall>) -> Vec<ToolCall> {
    let mut seen = HashSet::new();
    calls
        .into_iter()
        .map(|mut call| {
            if call.id.is_empty() || !seen.insert(call.id.clone()) {
                let fresh = format!("call_{}", uuid::Uuid::new_v4().simple());
                tracing::debug!(tool = %call.name, old = %call.id, new = %fresh, "Reassigned tool call id");
                seen.insert(fresh.clone());
                call.id = fresh;
            }
            call
        })
        .collect()
}

/// Builder for Agent configuration
pub struct AgentBuilder {
    provider: Option<Arc<dyn LlmProvider>>,
    tools: ToolRegistry,
    config: AgentConfig,
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self {
            provider: None,
            tools: ToolRegistry::new(),
            config: AgentConfig::default(),
        }
    }

    #[must_use]
    pub fn provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Register one more tool; fails on a duplicate name
    pub fn tool<T: Tool + 'static>(mut self, tool: T) -> Result<Self> {
        self.tools.register(tool)?;
        Ok(self)
    }

    #[must_use]
    pub fn tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools;
        self
    }

    #[must_use]
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.generation.model = model.into();
        self
    }

    #[must_use]
    pub const fn temperature(mut self, temp: f32) -> Self {
        self.config.generation.temperature = temp;
        self
    }

    #[must_use]
    pub const fn max_rounds(mut self, max: usize) -> Self {
        self.config.max_rounds = max;
        self
    }

    #[must_use]
    pub const fn inject_tool_descriptions(mut self, inject: bool) -> Self {
        self.config.inject_tool_descriptions = inject;
        self
    }

    pub fn build(self) -> Result<Agent> {
        let provider = self
            .provider
            .ok_or_else(|| AgentError::Config("Provider is required".into()))?;

        Ok(Agent::new(provider, Arc::new(self.tools), self.config))
    }
}
