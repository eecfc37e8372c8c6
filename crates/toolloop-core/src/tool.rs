//! Tool System
//!
//! Tools are registered once at startup and looked up by name when the
//! model requests them. Each tool describes its parameters with a
//! [`ToolSchema`], which doubles as the JSON schema advertised to the
//! model and the validator applied before the handler runs.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{AgentError, Result, ToolError, ValidationError};

/// Tool call request from the model
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Correlation token chosen by the model client
    pub id: String,

    /// Tool identifier
    pub name: String,

    /// Arguments, normally a JSON object
    #[serde(default)]
    pub arguments: Value,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}

/// Result of one tool call, paired with its request by `correlation_id`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Id of the [`ToolCall`] this answers
    pub correlation_id: String,

    /// Tool that was called
    pub tool_name: String,

    /// Output (rendered value or error description)
    pub content: String,

    /// Whether the call failed
    #[serde(default)]
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(
        correlation_id: impl Into<String>,
        tool_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            tool_name: tool_name.into(),
            content: content.into(),
            is_error: false,
        }
    }

    pub fn failure(
        correlation_id: impl Into<String>,
        tool_name: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            tool_name: tool_name.into(),
            content: error.into(),
            is_error: true,
        }
    }
}

/// Parameter definition for tool schema
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterSchema {
    /// Parameter name
    pub name: String,

    /// JSON Schema type (string, number, integer, boolean, object, array)
    #[serde(rename = "type")]
    pub param_type: String,

    /// Human-readable description
    pub description: String,

    /// Whether this parameter is required
    #[serde(default)]
    pub required: bool,

    /// Enum of allowed values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,

    /// Inclusive lower bound for numeric parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,

    /// Inclusive upper bound for numeric parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
}

impl ParameterSchema {
    /// Optional parameter with no further constraints
    pub fn new(
        name: impl Into<String>,
        param_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            description: description.into(),
            required: false,
            enum_values: None,
            minimum: None,
            maximum: None,
        }
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(|v| Value::String(v.into())).collect());
        self
    }

    #[must_use]
    pub const fn with_minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    #[must_use]
    pub const fn with_maximum(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    fn check(&self, value: &Value) -> std::result::Result<(), ValidationError> {
        if !matches_type(&self.param_type, value) {
            return Err(ValidationError::WrongType {
                field: self.name.clone(),
                expected: self.param_type.clone(),
                actual: json_type_name(value),
            });
        }

        if let Some(allowed) = &self.enum_values {
            if !allowed.contains(value) {
                return Err(ValidationError::NotInEnum {
                    field: self.name.clone(),
                    allowed: allowed
                        .iter()
                        .map(Value::to_string)
                        .collect::<Vec<_>>()
                        .join(", "),
                    actual: value.to_string(),
                });
            }
        }

        if let Some(n) = value.as_f64() {
            let below = self.minimum.is_some_and(|min| n < min);
            let above = self.maximum.is_some_and(|max| n > max);
            if below || above {
                return Err(ValidationError::OutOfRange {
                    field: self.name.clone(),
                    min: self.minimum.map_or_else(|| "-inf".into(), |m| m.to_string()),
                    max: self.maximum.map_or_else(|| "inf".into(), |m| m.to_string()),
                    actual: n,
                });
            }
        }

        Ok(())
    }
}

/// Tool definition schema (for model function calling)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Unique tool identifier
    pub name: String,

    /// Human-readable description (shown to the model)
    pub description: String,

    /// Parameter definitions
    pub parameters: Vec<ParameterSchema>,
}

impl ToolSchema {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterSchema) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Check call arguments against the declared parameters.
    ///
    /// `null` is accepted as an empty argument object. Unknown fields are
    /// ignored.
    pub fn validate(&self, arguments: &Value) -> std::result::Result<(), ValidationError> {
        let empty = serde_json::Map::new();
        let args = match arguments {
            Value::Object(map) => map,
            Value::Null => &empty,
            other => return Err(ValidationError::NotAnObject(json_type_name(other))),
        };

        for param in &self.parameters {
            match args.get(&param.name) {
                Some(value) => param.check(value)?,
                None if param.required => {
                    return Err(ValidationError::MissingField(param.name.clone()));
                }
                None => {}
            }
        }

        Ok(())
    }

    /// JSON Schema object describing the parameters
    pub fn input_schema(&self) -> Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for param in &self.parameters {
            let mut prop = serde_json::Map::new();
            prop.insert("type".into(), Value::String(param.param_type.clone()));
            prop.insert("description".into(), Value::String(param.description.clone()));
            if let Some(values) = &param.enum_values {
                prop.insert("enum".into(), Value::Array(values.clone()));
            }
            if let Some(min) = param.minimum {
                prop.insert("minimum".into(), serde_json::json!(min));
            }
            if let Some(max) = param.maximum {
                prop.insert("maximum".into(), serde_json::json!(max));
            }
            properties.insert(param.name.clone(), Value::Object(prop));

            if param.required {
                required.push(Value::String(param.name.clone()));
            }
        }

        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

fn matches_type(param_type: &str, value: &Value) -> bool {
    match param_type {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => {
            value.is_i64() || value.is_u64() || value.as_f64().is_some_and(|n| n.fract() == 0.0)
        }
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        _ => true,
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decode validated arguments into a tool's typed parameter struct
pub fn parse_args<T: DeserializeOwned>(arguments: &Value) -> std::result::Result<T, ToolError> {
    match arguments {
        Value::Null => Ok(T::deserialize(&Value::Object(serde_json::Map::new()))?),
        other => Ok(T::deserialize(other)?),
    }
}

/// Tool trait - implement to add new capabilities
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool's schema for model function calling
    fn schema(&self) -> ToolSchema;

    /// Run the handler on arguments that already passed [`ToolSchema::validate`]
    async fn execute(&self, arguments: &Value) -> std::result::Result<Value, ToolError>;
}

/// Registry for available tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a new tool; names must be unique
    pub fn register<T: Tool + 'static>(&mut self, tool: T) -> Result<()> {
        self.register_arc(Arc::new(tool))
    }

    /// Register a shared tool
    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        let name = tool.schema().name;
        if self.tools.contains_key(&name) {
            return Err(AgentError::DuplicateTool(name));
        }
        tracing::debug!(tool = %name, "Registered tool");
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Get a tool by name
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// All tool schemas, sorted by name
    pub fn schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<_> = self.tools.values().map(|t| t.schema()).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    /// Tool names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Generate system prompt section describing available tools
    pub fn generate_prompt_section(&self) -> String {
        let mut prompt = String::from("## Available Tools\n\n");

        for schema in self.schemas() {
            prompt.push_str(&format!("### {}\n", schema.name));
            prompt.push_str(&format!("{}\n", schema.description));

            if !schema.parameters.is_empty() {
                prompt.push_str("**Parameters:**\n");
                for param in &schema.parameters {
                    let required = if param.required { " (required)" } else { "" };
                    let allowed = param.enum_values.as_ref().map_or_else(String::new, |vals| {
                        let vals: Vec<_> = vals.iter().map(Value::to_string).collect();
                        format!(" one of {}", vals.join("|"))
                    });
                    prompt.push_str(&format!(
                        "- `{}` ({}){}{}: {}\n",
                        param.name, param.param_type, required, allowed, param.description
                    ));
                }
            }
            prompt.push('\n');
        }

        prompt
    }
}
