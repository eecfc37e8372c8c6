//! Service Kit - Agent Tools
//!
//! Built-in tools implementing `toolloop_core::Tool`.

mod calculator;
mod number_lookup;
mod text_transform;
mod unit_convert;

pub use calculator::{CalculatorTool, Operation, calculate};
pub use number_lookup::NumberLookupTool;
pub use text_transform::{EMPTY_SLUG, TextOp, TextTransformTool, slugify, transform};
pub use unit_convert::{METERS_TO_FEET, Unit, UnitConvertTool, convert};
