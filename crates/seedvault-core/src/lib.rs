//! SeedVault Core - settings schema, configuration codec and snapshots
//!
//! This crate holds the typed settings of a seismic data retrieval session,
//! the section-based text format they are stored in, and a versioned binary
//! snapshot for passing settings between processes.

pub mod codec;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod models;
pub mod snapshot;

pub use codec::{ConfigDocument, ParseOutcome, SettingsParser};
pub use config::{ConfigSource, FieldSources, SettingsOverrides};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{Result, SeedVaultError};
pub use models::SettingsAggregate;
