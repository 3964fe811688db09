//! Error types for SeedVault

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedVaultError {
    // Configuration source errors
    #[error("File not found in the following path: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to read configuration file: {reason}")]
    ConfigUnreadable { reason: String },

    #[error("Malformed configuration at line {line}: {reason}")]
    ConfigSyntax { line: usize, reason: String },

    // Value errors
    #[error("Invalid value '{value}' for {field}. Allowed values: {allowed}")]
    Validation {
        field: String,
        value: String,
        allowed: String,
    },

    #[error("Cannot interpret '{value}' as {expected}")]
    InvalidValue { value: String, expected: String },

    #[error("Invalid channel selector '{value}': {reason}")]
    InvalidSelector { value: String, reason: String },

    // Snapshot errors
    #[error("Snapshot error: {reason}")]
    Snapshot { reason: String },

    #[error("Snapshot schema version {found} is newer than supported version {supported}")]
    UnsupportedSnapshotVersion { found: u16, supported: u16 },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SeedVaultError {
    /// Build a `Validation` error for an unknown enum value
    pub fn unknown_variant(field: &str, value: &str, allowed: &[&str]) -> Self {
        SeedVaultError::Validation {
            field: field.to_string(),
            value: value.to_string(),
            allowed: allowed.join(", "),
        }
    }
}

pub type Result<T> = std::result::Result<T, SeedVaultError>;
