//! Text Transform Tool
//!
//! Upper-casing, lower-casing and URL slugs.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use unicode_normalization::UnicodeNormalization;

use toolloop_core::{ParameterSchema, Tool, ToolError, ToolSchema, tool::parse_args};

/// Placeholder slug for input with no usable characters
pub const EMPTY_SLUG: &str = "n-a";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextOp {
    Upper,
    Lower,
    Slug,
}

#[derive(Debug, Deserialize)]
struct TransformParams {
    op: TextOp,
    text: String,
}

/// Lowercase, hyphen-joined, accent-free token.
///
/// Runs of anything other than ASCII letters and digits collapse into a
/// single `-`; leading and trailing hyphens are dropped.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());

    for c in text.nfkd().filter(|c| !('\u{0300}'..='\u{036f}').contains(c)) {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

pub fn transform(op: TextOp, text: &str) -> String {
    match op {
        TextOp::Upper => text.to_uppercase(),
        TextOp::Lower => text.to_lowercase(),
        TextOp::Slug => slugify(text),
    }
}

/// Tool applying one text transform
pub struct TextTransformTool;

#[async_trait]
impl Tool for TextTransformTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            "textTransform",
            "Transforms text. ops: upper|lower|slug. Example: { op: 'slug', text: 'Hello World!' }",
        )
        .with_parameter(
            ParameterSchema::new("op", "string", "transform to apply")
                .required()
                .with_enum(["upper", "lower", "slug"]),
        )
        .with_parameter(ParameterSchema::new("text", "string", "input text").required())
    }

    async fn execute(&self, arguments: &Value) -> Result<Value, ToolError> {
        let params: TransformParams = parse_args(arguments)?;
        Ok(Value::String(transform(params.op, &params.text)))
    }
}
