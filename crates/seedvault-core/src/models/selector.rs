use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SeedVaultError};

/// Network/station/location/channel scope with an optional time window
///
/// The compact form joins the populated codes with `.` in N.S.L.C order.
/// Note the asymmetry: [`ChannelSelector::compact`] emits up to four
/// components, while [`ChannelSelector::from_compact`] only understands the
/// two-component `NET.STA` form used by the force/exclude station lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelSelector {
    pub network: Option<String>,
    pub station: Option<String>,
    pub location: Option<String>,
    pub channel: Option<String>,
    pub starttime: Option<NaiveDateTime>,
    pub endtime: Option<NaiveDateTime>,
}

impl ChannelSelector {
    /// Selector for a network/station pair
    pub fn station(network: impl Into<String>, station: impl Into<String>) -> Self {
        Self {
            network: Some(network.into()),
            station: Some(station.into()),
            ..Default::default()
        }
    }

    /// Parse the network/station pair at the front of a compact string.
    ///
    /// Components after the station are ignored, so a four-component string
    /// comes back with only network and station populated.
    pub fn from_compact(value: &str) -> Result<Self> {
        let mut parts = value.trim().split('.');
        match (parts.next(), parts.next()) {
            (Some(network), Some(station)) if !network.is_empty() && !station.is_empty() => {
                Ok(Self::station(network, station))
            }
            _ => Err(SeedVaultError::InvalidSelector {
                value: value.to_string(),
                reason: "expected NET.STA".to_string(),
            }),
        }
    }

    /// Number of dot-separated components in a compact string
    pub fn component_count(value: &str) -> usize {
        value.trim().split('.').count()
    }

    /// Dot-joined populated components; empty when nothing is set
    pub fn compact(&self) -> String {
        [&self.network, &self.station, &self.location, &self.channel]
            .into_iter()
            .flatten()
            .filter(|code| !code.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Compact form, or `None` when no component is set
    pub fn compact_opt(&self) -> Option<String> {
        let compact = self.compact();
        (!compact.is_empty()).then_some(compact)
    }
}

impl fmt::Display for ChannelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.compact())
    }
}
