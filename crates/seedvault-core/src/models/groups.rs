//! Leaf setting groups: processing, credentials, date windows and waveform
//! preferences. Each is independently constructible and defaultable.

use chrono::{Duration, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Worker count used when a `ProcessingConfig` is built directly
pub const DEFAULT_NUM_PROCESSES: u32 = 4;

/// Accepted gap between consecutive records, seconds
pub const DEFAULT_GAP_TOLERANCE: u32 = 60;

/// Days covered by the default date window, ending today
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Data centre used when a search group is built directly
pub const DEFAULT_CLIENT: &str = "IRIS";

/// Parallelism and gap handling for archive processing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub num_processes: u32,
    pub gap_tolerance: u32,
    pub logging: Option<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            num_processes: DEFAULT_NUM_PROCESSES,
            gap_tolerance: DEFAULT_GAP_TOLERANCE,
            logging: None,
        }
    }
}

impl ProcessingConfig {
    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }
}

/// Credentials for one network.station.location.channel scope
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    pub nslc_code: String,
    pub username: String,
    pub password: String,
}

impl AuthConfig {
    pub fn new(
        nslc_code: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            nslc_code: nslc_code.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// `username:password`, as stored in the `[AUTH]` section
    pub fn credential(&self) -> String {
        format!("{}:{}", self.username, self.password)
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("nslc_code", &self.nslc_code)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Six independent time bounds, UTC. No ordering between them is enforced
/// here; query builders decide what combinations mean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeConfig {
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub start_before: Option<NaiveDateTime>,
    pub start_after: Option<NaiveDateTime>,
    pub end_before: Option<NaiveDateTime>,
    pub end_after: Option<NaiveDateTime>,
}

impl Default for DateRangeConfig {
    /// The last [`DEFAULT_WINDOW_DAYS`] days, midnight to midnight
    fn default() -> Self {
        let today = Utc::now().date_naive().and_time(NaiveTime::MIN);
        Self::between(today - Duration::days(DEFAULT_WINDOW_DAYS), today)
    }
}

impl DateRangeConfig {
    /// Window with only start and end set
    pub fn between(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start_time: Some(start),
            end_time: Some(end),
            start_before: None,
            start_after: None,
            end_before: None,
            end_after: None,
        }
    }

    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }
}

/// Where and how waveforms are fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveformConfig {
    pub client: Option<String>,
    pub channel_pref: Option<String>,
    pub location_pref: Option<String>,
    pub days_per_request: u32,
}

impl Default for WaveformConfig {
    fn default() -> Self {
        Self {
            client: Some(DEFAULT_CLIENT.to_string()),
            channel_pref: None,
            location_pref: None,
            days_per_request: 1,
        }
    }
}

impl WaveformConfig {
    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }
}
