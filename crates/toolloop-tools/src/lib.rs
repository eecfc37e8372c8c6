//! # toolloop-tools
//!
//! Built-in tools for the toolloop agent.
//!
//! | tool | input | output |
//! |---|---|---|
//! | `calculator` | `operation`, `a`, `b` | number |
//! | `findNumberValue` | `number` | stored value or "not found" text |
//! | `textTransform` | `op` (upper/lower/slug), `text` | text |
//! | `unitConvert` | `from`, `to`, `value` | number or "unsupported" text |
//!
//! Tools are grouped into the two sets the demos use (`calculator_registry`,
//! `text_registry`) or registered all together with `builtin_registry`.

pub mod fixture;
pub mod svckit;

use std::sync::Arc;

use toolloop_core::{Result, ToolRegistry};

pub use fixture::{NumberTable, SeededNumberTable};

/// Re-export tools for easy registration
pub mod tools {
    pub use crate::svckit::{CalculatorTool, NumberLookupTool, TextTransformTool, UnitConvertTool};
}

use tools::{CalculatorTool, NumberLookupTool, TextTransformTool, UnitConvertTool};

/// Which tools to expose to the model
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToolSet {
    /// Every built-in tool
    #[default]
    All,
    /// `calculator` and `findNumberValue`
    Calculator,
    /// `textTransform` and `unitConvert`
    Text,
}

impl std::str::FromStr for ToolSet {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "calculator" | "math" => Ok(Self::Calculator),
            "text" => Ok(Self::Text),
            other => Err(format!("unknown tool set '{other}' (expected all, calculator or text)")),
        }
    }
}

/// `calculator` and `findNumberValue`
pub fn calculator_registry(table: Arc<dyn NumberTable>) -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(CalculatorTool)?;
    registry.register(NumberLookupTool::new(table))?;
    Ok(registry)
}

/// `textTransform` and `unitConvert`
pub fn text_registry() -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(TextTransformTool)?;
    registry.register(UnitConvertTool)?;
    Ok(registry)
}

/// All built-in tools
pub fn builtin_registry(table: Arc<dyn NumberTable>) -> Result<ToolRegistry> {
    let mut registry = calculator_registry(table)?;
    registry.register(TextTransformTool)?;
    registry.register(UnitConvertTool)?;
    Ok(registry)
}

/// Registry for a [`ToolSet`]
pub fn registry_for(set: ToolSet, table: Arc<dyn NumberTable>) -> Result<ToolRegistry> {
    match set {
        ToolSet::All => builtin_registry(table),
        ToolSet::Calculator => calculator_registry(table),
        ToolSet::Text => text_registry(),
    }
}

/// System prompt describing the tools and when to use them
pub const DEFAULT_SYSTEM_PROMPT: &str = r#"You are a precise assistant with these tools:
- calculator(operation, a, b): operation ∈ {add, sub, multiply, divide}
- findNumberValue(number): looks up the value stored for a number
- textTransform(op, text): op ∈ {upper, lower, slug}
- unitConvert(from, to, value): units ∈ {meter, foot, celsius, fahrenheit}

Rules:
1) If the user asks to slug/uppercase/lowercase, ALWAYS call textTransform.
2) For slug requests, set op="slug".
3) If the user provides quoted text (e.g., "arijit"), use the quoted part as the 'text' argument.
4) Use calculator for arithmetic and unitConvert for conversions; chain calls when one result feeds another.
5) Do not answer directly when a matching tool exists; use the tool.
6) If a tool reports an error or an unsupported request, say so plainly."#;
