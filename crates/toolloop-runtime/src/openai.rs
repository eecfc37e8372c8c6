//! OpenAI-compatible Provider
//!
//! Implementation of `LlmProvider` for the `/chat/completions` endpoint with
//! native function calling.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use toolloop_core::{
    error::{AgentError, Result},
    message::Message,
    provider::{GenerationOptions, LlmProvider, ModelTurn},
    tool::{ToolCall, ToolSchema},
};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// OpenAI provider configuration
#[derive(Clone)]
pub struct OpenAiConfig {
    /// Bearer token
    pub api_key: String,

    /// API base, without the `/chat/completions` suffix
    pub base_url: String,

    /// Model used when the agent does not override it
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            timeout_secs: 120,
        }
    }

    /// Read `OPENAI_API_KEY` (required), `OPENAI_BASE_URL` and `OPENAI_MODEL`
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AgentError::Config(format!("missing {API_KEY_VAR} env var")))?;
        let base_url = std::env::var("OPENAI_BASE_URL")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let model = std::env::var("OPENAI_MODEL")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.into());

        Ok(Self {
            api_key,
            base_url,
            model,
            ..Self::new(String::new())
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// OpenAI chat-completions provider
pub struct OpenAiProvider {
    client: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiProvider {
    /// Create from configuration
    pub fn from_config(config: OpenAiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AgentError::Config(format!("HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(OpenAiConfig::from_env()?)
    }

    pub const fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    /// Convert agent messages to wire format
    fn convert_messages(messages: &[Message]) -> Vec<WireMessage> {
        messages
            .iter()
            .map(|m| match m {
                Message::System { content } => WireMessage::text("system", content),
                Message::User { content } => WireMessage::text("user", content),
                Message::Assistant {
                    content,
                    tool_calls,
                } => WireMessage {
                    role: "assistant",
                    content: (!content.is_empty()).then(|| content.clone()),
                    tool_calls: (!tool_calls.is_empty())
                        .then(|| tool_calls.iter().map(WireToolCall::from_call).collect()),
                    tool_call_id: None,
                },
                Message::Tool(result) => WireMessage {
                    role: "tool",
                    content: Some(result.content.clone()),
                    tool_calls: None,
                    tool_call_id: Some(result.correlation_id.clone()),
                },
            })
            .collect()
    }

    /// Convert tool schemas to function definitions
    fn convert_tools(tools: &[ToolSchema]) -> Vec<Value> {
        tools
            .iter()
            .map(|t| {
                serde_json::json!({
                    "type": "function",
                    "function": {
                        "name": t.name,
                        "description": t.description,
                        "parameters": t.input_schema(),
                    }
                })
            })
            .collect()
    }

    /// Convert a response body to the model's decision
    fn convert_response(response: ChatResponse) -> Result<ModelTurn> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::ModelUnavailable("response contained no choices".into()))?;

        let content = choice.message.content.unwrap_or_default();
        let calls: Vec<ToolCall> = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(WireToolCall::into_call)
            .collect();

        if calls.is_empty() {
            Ok(ModelTurn::FinalAnswer(content))
        } else {
            Ok(ModelTurn::ToolCalls { content, calls })
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(
        &self,
        history: &[Message],
        tools: &[ToolSchema],
        options: &GenerationOptions,
    ) -> Result<ModelTurn> {
        let request = ChatRequest {
            model: &options.model,
            messages: Self::convert_messages(history),
            tools: Self::convert_tools(tools),
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        tracing::debug!(
            model = %options.model,
            messages = history.len(),
            tools = tools.len(),
            "Sending chat completion"
        );

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::ModelUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "Chat completion rejected");
            return Err(AgentError::ModelUnavailable(format!("{status}: {body}")));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| AgentError::ModelUnavailable(format!("malformed response: {e}")))?;

        Self::convert_response(body)
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Value>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<WireToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

impl WireMessage {
    fn text(role: &'static str, content: &str) -> Self {
        Self {
            role,
            content: Some(content.to_string()),
            tool_calls: None,
            tool_call_id: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct WireToolCall {
    #[serde(default)]
    id: String,
    #[serde(rename = "type", default = "function_kind")]
    kind: String,
    function: WireFunction,
}

fn function_kind() -> String {
    "function".into()
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunction {
    name: String,
    /// JSON-encoded argument object
    #[serde(default)]
    arguments: String,
}

impl WireToolCall {
    fn from_call(call: &ToolCall) -> Self {
        Self {
            id: call.id.clone(),
            kind: function_kind(),
            function: WireFunction {
                name: call.name.clone(),
                arguments: call.arguments.to_string(),
            },
        }
    }

    /// Undecodable argument strings are kept as a JSON string so schema
    /// validation reports them back to the model.
    fn into_call(self) -> ToolCall {
        let raw = self.function.arguments;
        let arguments = if raw.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&raw).unwrap_or(Value::String(raw))
        };
        ToolCall::new(self.id, self.function.name, arguments)
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<WireToolCall>>,
}
