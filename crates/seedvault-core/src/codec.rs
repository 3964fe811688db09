//! Section-based text format for settings
//!
//! - [`document`]: generic `[SECTION]` / `key = value` reader and writer
//! - [`values`]: scalar conversions shared by both directions
//! - [`parser`]: document to [`SettingsAggregate`](crate::models::SettingsAggregate)
//! - [`writer`]: [`SettingsAggregate`](crate::models::SettingsAggregate) to document

pub mod document;
pub mod parser;
pub mod values;
pub mod writer;

pub use document::{ConfigDocument, Section};
pub use parser::{defaults, ParseOutcome, SettingsParser};
pub use values::{check_float, check_val, format_time, parse_bool, parse_time, ToCfgValue};
