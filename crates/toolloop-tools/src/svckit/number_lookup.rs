//! Number Lookup Tool
//!
//! Reads a value from the injected [`NumberTable`].

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use toolloop_core::{ParameterSchema, Tool, ToolError, ToolSchema, tool::parse_args};

use crate::fixture::NumberTable;

#[derive(Debug, Deserialize)]
struct LookupParams {
    number: f64,
}

/// Tool for finding the value stored for a number
pub struct NumberLookupTool {
    table: Arc<dyn NumberTable>,
}

impl NumberLookupTool {
    pub fn new(table: Arc<dyn NumberTable>) -> Self {
        Self { table }
    }
}

/// Table key for a requested number, if it can be one
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn as_key(number: f64) -> Option<u32> {
    (number.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&number)).then(|| number as u32)
}

/// Render the requested number the way the model wrote it (`3`, not `3.0`)
fn display_number(number: f64) -> String {
    as_key(number).map_or_else(|| number.to_string(), |key| key.to_string())
}

#[async_trait]
impl Tool for NumberLookupTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            "findNumberValue",
            "finds the value of the number from a hashmap",
        )
        .with_parameter(ParameterSchema::new("number", "number", "value to find in hashmap").required())
    }

    async fn execute(&self, arguments: &Value) -> Result<Value, ToolError> {
        let params: LookupParams = parse_args(arguments)?;

        let found = match as_key(params.number) {
            Some(key) => self.table.get(key).await,
            None => None,
        };

        match found {
            Some(value) => Ok(Value::from(value)),
            None => {
                tracing::debug!(table = self.table.name(), number = params.number, "Key not in table");
                Ok(Value::String(format!(
                    "Key '{}' not found.",
                    display_number(params.number)
                )))
            }
        }
    }
}
