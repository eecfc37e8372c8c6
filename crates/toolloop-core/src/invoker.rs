//! Tool Invoker
//!
//! Runs one tool call end to end and always produces a [`ToolResult`].
//! Unknown tools, schema violations, handler errors and handler panics are
//! all turned into `is_error` results so the model can react to them.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::join_all;
use serde_json::Value;

use crate::tool::{ToolCall, ToolRegistry, ToolResult};

/// Content of the result returned for an unregistered tool name
pub const TOOL_NOT_FOUND: &str = "ToolNotFound";

/// Executes tool calls against a shared, read-only registry
#[derive(Clone, Debug)]
pub struct ToolInvoker {
    registry: Arc<ToolRegistry>,
}

impl ToolInvoker {
    pub const fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Invoke a single tool call
    pub async fn invoke(&self, call: &ToolCall) -> ToolResult {
        let Some(tool) = self.registry.lookup(&call.name) else {
            tracing::warn!(tool = %call.name, id = %call.id, "Tool not found");
            return ToolResult::failure(&call.id, &call.name, TOOL_NOT_FOUND);
        };

        if let Err(e) = tool.schema().validate(&call.arguments) {
            tracing::warn!(tool = %call.name, id = %call.id, error = %e, "Rejected tool arguments");
            return ToolResult::failure(&call.id, &call.name, format!("ToolArgumentInvalid: {e}"));
        }

        tracing::debug!(tool = %call.name, id = %call.id, args = %call.arguments, "Running tool");

        let outcome = AssertUnwindSafe(tool.execute(&call.arguments))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(value)) => {
                let content = render_value(&value);
                tracing::debug!(tool = %call.name, id = %call.id, result = %content, "Tool finished");
                ToolResult::success(&call.id, &call.name, content)
            }
            Ok(Err(e)) => {
                tracing::warn!(tool = %call.name, id = %call.id, error = %e, "Tool failed");
                ToolResult::failure(&call.id, &call.name, format!("ToolError: {e}"))
            }
            Err(panic) => {
                let msg = panic
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "tool panicked".into());
                tracing::error!(tool = %call.name, id = %call.id, "Tool panicked: {}", msg);
                ToolResult::failure(&call.id, &call.name, format!("ToolError: {msg}"))
            }
        }
    }

    /// Invoke all calls concurrently; results come back in request order
    pub async fn invoke_all(&self, calls: &[ToolCall]) -> Vec<ToolResult> {
        join_all(calls.iter().map(|call| self.invoke(call))).await
    }
}

/// Render a handler's return value as tool result content.
///
/// Strings are emitted without quotes. Whole floats below `1e21` print all
/// their integer digits (`7.0` becomes `7`, `1e16` becomes
/// `10000000000000000`); larger or fractional ones keep the shortest form.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f == 0.0 => "0".into(),
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{f}"),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}
