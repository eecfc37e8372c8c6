//! Calculator Tool
//!
//! Binary arithmetic on two numbers.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use toolloop_core::{ParameterSchema, Tool, ToolError, ToolSchema, tool::parse_args};

/// Supported operations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Sub,
    Multiply,
    Divide,
}

#[derive(Debug, Deserialize)]
struct CalculatorParams {
    operation: Operation,
    a: f64,
    b: f64,
}

/// Compute `a <op> b`
pub fn calculate(operation: Operation, a: f64, b: f64) -> Result<f64, ToolError> {
    let result = match operation {
        Operation::Add => a + b,
        Operation::Sub => a - b,
        Operation::Multiply => a * b,
        Operation::Divide => {
            if b == 0.0 {
                return Err(ToolError::execution("division by zero"));
            }
            a / b
        }
    };

    if result.is_finite() {
        Ok(result)
    } else {
        Err(ToolError::execution("result is not a finite number"))
    }
}

/// Tool computing one arithmetic operation
pub struct CalculatorTool;

#[async_trait]
impl Tool for CalculatorTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "calculator".into(),
            description: "compute a and b based on operations".into(),
            parameters: vec![
                ParameterSchema {
                    name: "operation".into(),
                    param_type: "string".into(),
                    description: "Operation: 'add', 'sub', 'multiply' or 'divide'".into(),
                    required: true,
                    enum_values: Some(vec![
                        serde_json::json!("add"),
                        serde_json::json!("sub"),
                        serde_json::json!("multiply"),
                        serde_json::json!("divide"),
                    ]),
                    minimum: None,
                    maximum: None,
                },
                ParameterSchema::new("a", "number", "first number").required(),
                ParameterSchema::new("b", "number", "second number").required(),
            ],
        }
    }

    async fn execute(&self, arguments: &Value) -> Result<Value, ToolError> {
        let params: CalculatorParams = parse_args(arguments)?;
        let result = calculate(params.operation, params.a, params.b)?;
        tracing::debug!(?params, result, "Calculated");
        Ok(serde_json::json!(result))
    }
}
