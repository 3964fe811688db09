//! Warning and error records collected while resolving settings
//!
//! Per-field problems never abort a parse. They are recorded here, a default
//! is substituted, and the caller decides whether the accumulated errors are
//! blocking.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Value was defaulted or corrected; the result is usable as is
    Warning,
    /// Required value was unusable; a default was substituted
    Error,
}

/// A single warning or error tied to a section and, usually, a key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub section: String,
    pub key: Option<String>,
    pub message: String,
}

impl Diagnostic {
    /// Location in `SECTION.key` form, or just `SECTION`
    pub fn location(&self) -> String {
        match &self.key {
            Some(key) => format!("{}.{}", self.section, key),
            None => self.section.clone(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.location(), self.message)
    }
}

/// Ordered warning and error lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub warnings: Vec<Diagnostic>,
    pub errors: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning
    pub fn warn(&mut self, section: &str, key: Option<&str>, message: impl Into<String>) {
        self.warnings.push(Diagnostic {
            severity: Severity::Warning,
            section: section.to_string(),
            key: key.map(str::to_string),
            message: message.into(),
        });
    }

    /// Record an error
    pub fn error(&mut self, section: &str, key: Option<&str>, message: impl Into<String>) {
        self.errors.push(Diagnostic {
            severity: Severity::Error,
            section: section.to_string(),
            key: key.map(str::to_string),
            message: message.into(),
        });
    }

    /// Append another collection, keeping order
    pub fn merge(&mut self, other: Diagnostics) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
    }

    /// No errors were recorded
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }

    /// Warnings then errors, each in recording order
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.warnings.iter().chain(self.errors.iter())
    }

    /// Any warning whose message contains `needle`
    pub fn has_warning_containing(&self, needle: &str) -> bool {
        self.warnings.iter().any(|d| d.message.contains(needle))
    }

    /// Any error whose message contains `needle`
    pub fn has_error_containing(&self, needle: &str) -> bool {
        self.errors.iter().any(|d| d.message.contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_in_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.warn("SDS", Some("sds_path"), "first");
        diagnostics.error("EVENT", None, "second");
        diagnostics.warn("PROCESSING", Some("gap_tolerance"), "third");

        assert_eq!(diagnostics.warnings.len(), 2);
        assert_eq!(diagnostics.errors.len(), 1);
        assert_eq!(diagnostics.warnings[1].message, "third");
        assert!(!diagnostics.is_valid());
        assert!(diagnostics.has_warnings());
    }

    #[test]
    fn test_location_and_display() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.error("STATION", Some("channel"), "bad pattern");
        diagnostics.error("EVENT", None, "missing");

        assert_eq!(diagnostics.errors[0].location(), "STATION.channel");
        assert_eq!(diagnostics.errors[1].to_string(), "[EVENT] missing");
    }

    #[test]
    fn test_merge() {
        let mut a = Diagnostics::new();
        a.warn("SDS", None, "a");
        let mut b = Diagnostics::new();
        b.error("AUTH", None, "b");
        a.merge(b);

        assert_eq!(a.iter().count(), 2);
        assert!(a.has_error_containing("b"));
    }
}
