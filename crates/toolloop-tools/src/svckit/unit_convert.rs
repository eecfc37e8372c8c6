//! Unit Conversion Tool
//!
//! Supported pairs: meter <-> foot, celsius <-> fahrenheit. Anything else
//! is answered with an "Unsupported conversion" message, not an error.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use toolloop_core::{ParameterSchema, Tool, ToolError, ToolSchema, tool::parse_args};

/// 1 m = 3.280839895 ft
pub const METERS_TO_FEET: f64 = 3.280_839_895;

const UNITS: [&str; 4] = ["meter", "foot", "celsius", "fahrenheit"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Meter,
    Foot,
    Celsius,
    Fahrenheit,
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Meter => write!(f, "meter"),
            Self::Foot => write!(f, "foot"),
            Self::Celsius => write!(f, "celsius"),
            Self::Fahrenheit => write!(f, "fahrenheit"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConvertParams {
    from: Unit,
    to: Unit,
    value: f64,
}

/// Converted value, or `None` for an unsupported pair
pub fn convert(from: Unit, to: Unit, value: f64) -> Option<f64> {
    match (from, to) {
        (Unit::Meter, Unit::Foot) => Some(value * METERS_TO_FEET),
        (Unit::Foot, Unit::Meter) => Some(value / METERS_TO_FEET),
        (Unit::Fahrenheit, Unit::Celsius) => Some((value - 32.0) * (5.0 / 9.0)),
        (Unit::Celsius, Unit::Fahrenheit) => Some(value * 9.0 / 5.0 + 32.0),
        _ => None,
    }
}

/// Tool converting a value between units
pub struct UnitConvertTool;

#[async_trait]
impl Tool for UnitConvertTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            "unitConvert",
            "Converts between units. Supported: meter<->foot, celsius<->fahrenheit",
        )
        .with_parameter(
            ParameterSchema::new("from", "string", "source unit")
                .required()
                .with_enum(UNITS),
        )
        .with_parameter(
            ParameterSchema::new("to", "string", "target unit")
                .required()
                .with_enum(UNITS),
        )
        .with_parameter(ParameterSchema::new("value", "number", "value to convert").required())
    }

    async fn execute(&self, arguments: &Value) -> Result<Value, ToolError> {
        let params: ConvertParams = parse_args(arguments)?;

        match convert(params.from, params.to, params.value) {
            Some(converted) if converted.is_finite() => Ok(serde_json::json!(converted)),
            Some(_) => Err(ToolError::execution("result is not a finite number")),
            None => Ok(Value::String(format!(
                "Unsupported conversion: {} -> {}",
                params.from, params.to
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use toolloop_core::{ToolCall, ToolInvoker, ToolRegistry};

    #[test]
    fn test_supported_pairs() {
        assert!((convert(Unit::Meter, Unit::Foot, 1.0).unwrap() - 3.280_839_895).abs() < 1e-9);
        assert!((convert(Unit::Foot, Unit::Meter, 3.280_839_895).unwrap() - 1.0).abs() < 1e-9);
        assert!((convert(Unit::Celsius, Unit::Fahrenheit, 100.0).unwrap() - 212.0).abs() < 1e-9);
        assert!((convert(Unit::Fahrenheit, Unit::Celsius, 32.0).unwrap()).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_overflow_is_an_error() {
        let err = UnitConvertTool
            .execute(&json!({"from": "meter", "to": "foot", "value": 1e308}))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "result is not a finite number");

        assert!(UnitConvertTool
            .execute(&json!({"from": "celsius", "to": "fahrenheit", "value": 1.7e308}))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_overflow_reaches_model_as_error_result() {
        let mut registry = ToolRegistry::new();
        registry.register(UnitConvertTool).unwrap();
        let invoker = ToolInvoker::new(Arc::new(registry));

        let result = invoker
            .invoke(&ToolCall::new(
                "c1",
                "unitConvert",
                json!({"from": "meter", "to": "foot", "value": 1e308}),
            ))
            .await;
        assert!(result.is_error);
        assert_eq!(result.content, "ToolError: result is not a finite number");
    }

    #[test]
    fn test_temperature_round_trip() {
        for celsius in [-40.0, 0.0, 21.5, 37.0, 1000.0] {
            let f = convert(Unit::Celsius, Unit::Fahrenheit, celsius).unwrap();
            let back = convert(Unit::Fahrenheit, Unit::Celsius, f).unwrap();
            assert!((back - celsius).abs() < 1e-9, "{celsius} -> {f} -> {back}");
        }
    }

    #[test]
    fn test_unsupported_pairs() {
        assert!(convert(Unit::Meter, Unit::Celsius, 1.0).is_none());
        assert!(convert(Unit::Meter, Unit::Meter, 1.0).is_none());
    }

    #[tokio::test]
    async fn test_unsupported_is_not_an_error() {
        let out = UnitConvertTool
            .execute(&json!({"from": "meter", "to": "celsius", "value": 3}))
            .await
            .unwrap();
        assert_eq!(out, json!("Unsupported conversion: meter -> celsius"));
    }

    #[test]
    fn test_unknown_unit_rejected_by_schema() {
        let schema = UnitConvertTool.schema();
        assert!(schema.validate(&json!({"from": "inch", "to": "foot", "value": 1})).is_err());
    }
}
