//! Session Management
//!
//! A session is the caller side of the loop: it accepts one user request
//! at a time, seeds a fresh history for it and reports the answer. Nothing
//! is carried from one turn to the next.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::reasoning::{Agent, TurnOutcome};

/// Unique session identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether an input line ends the interactive session
pub fn is_exit_command(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("exit")
}

/// Interactive session over a shared agent
pub struct Session {
    id: SessionId,
    agent: Arc<Agent>,
    turns: usize,
    created_at: DateTime<Utc>,
    last_turn_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(agent: Arc<Agent>) -> Self {
        Self {
            id: SessionId::new(),
            agent,
            turns: 0,
            created_at: Utc::now(),
            last_turn_at: None,
        }
    }

    pub const fn id(&self) -> &SessionId {
        &self.id
    }

    /// Number of turns attempted so far, failed ones included
    pub const fn turns(&self) -> usize {
        self.turns
    }

    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub const fn last_turn_at(&self) -> Option<DateTime<Utc>> {
        self.last_turn_at
    }

    /// Run one user request and return the final answer
    pub async fn run_turn(&mut self, user_text: &str) -> Result<String> {
        Ok(self.run_turn_detailed(user_text).await?.answer)
    }

    /// Like [`Session::run_turn`], keeping the turn's history and round count
    pub async fn run_turn_detailed(&mut self, user_text: &str) -> Result<TurnOutcome> {
        self.turns += 1;
        self.last_turn_at = Some(Utc::now());
        tracing::info!(session = %self.id, turn = self.turns, "Starting turn");

        let conversation = self.agent.seed(user_text);
        self.agent.run(conversation).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AgentError;
    use crate::message::Message;
    use crate::provider::{GenerationOptions, LlmProvider, ModelTurn};
    use crate::tool::{ToolRegistry, ToolSchema};
    use async_trait::async_trait;

    /// Answers with the text of the last user message, or fails on "boom"
    struct EchoProvider;

    #[async_trait]
    impl LlmProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        async fn complete(
            &self,
            history: &[Message],
            _tools: &[ToolSchema],
            _options: &GenerationOptions,
        ) -> Result<ModelTurn> {
            let last = history.last().map(Message::content).unwrap_or_default();
            if last == "boom" {
                return Err(AgentError::ModelUnavailable("down".into()));
            }
            Ok(ModelTurn::FinalAnswer(format!("{} messages, last: {last}", history.len())))
        }
    }

    fn session() -> Session {
        let agent = Agent::with_defaults(Arc::new(EchoProvider), Arc::new(ToolRegistry::new()));
        Session::new(Arc::new(agent))
    }

    #[test]
    fn test_exit_detection() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("  EXIT \n"));
        assert!(is_exit_command("Exit"));
        assert!(!is_exit_command("exit now"));
        assert!(!is_exit_command(""));
    }

    #[tokio::test]
    async fn test_turns_do_not_share_history() {
        let mut session = session();

        assert_eq!(session.run_turn("one").await.unwrap(), "1 messages, last: one");
        assert_eq!(session.run_turn("two").await.unwrap(), "1 messages, last: two");
        assert_eq!(session.turns(), 2);
        assert!(session.last_turn_at().is_some());
    }

    #[tokio::test]
    async fn test_failed_turn_keeps_session_usable() {
        let mut session = session();

        let err = session.run_turn("boom").await.unwrap_err();
        assert!(matches!(err, AgentError::ModelUnavailable(_)));

        assert!(session.run_turn("again").await.is_ok());
        assert_eq!(session.turns(), 2);
    }
}
