//! Closed value sets used across the settings schema.
//!
//! Every enum is backed by a raw string value, which is what the text format
//! stores. Parsing is exact: an unknown value is a [`SeedVaultError::Validation`]
//! naming the field and the allowed set. Falling back to a default is the
//! parser's decision, never the type's.

use crate::error::{Result, SeedVaultError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shared behaviour of string-backed configuration enums
pub trait ConfigEnum: Sized + Copy + PartialEq + 'static {
    /// Field name used in validation errors
    const FIELD: &'static str;

    /// Every member, in declaration order
    const ALL: &'static [Self];

    /// The raw string value of this member
    fn as_str(&self) -> &'static str;

    /// Raw values of every member
    fn allowed_values() -> Vec<&'static str> {
        Self::ALL.iter().map(|v| v.as_str()).collect()
    }

    /// Match a raw value exactly
    fn from_value(value: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == value)
            .ok_or_else(|| {
                SeedVaultError::unknown_variant(Self::FIELD, value, &Self::allowed_values())
            })
    }
}

/// How waveforms are requested from the data centre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DownloadType {
    #[default]
    Event,
    Continuous,
}

impl ConfigEnum for DownloadType {
    const FIELD: &'static str = "download_type";
    const ALL: &'static [Self] = &[DownloadType::Event, DownloadType::Continuous];

    fn as_str(&self) -> &'static str {
        match self {
            DownloadType::Event => "event",
            DownloadType::Continuous => "continuous",
        }
    }
}

/// User-facing acquisition strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowType {
    #[default]
    EventBased,
    StationBased,
    Continuous,
}

impl WorkflowType {
    /// Human-readable explanation shown next to the workflow selector
    pub fn description(&self) -> &'static str {
        match self {
            WorkflowType::EventBased => {
                "Event-based: search an earthquake catalog first, then select stations \
                 around the chosen events and download waveforms around the predicted \
                 phase arrivals."
            }
            WorkflowType::StationBased => {
                "Station-based: select stations first, then search for events recorded \
                 by them and download waveforms around the predicted phase arrivals."
            }
            WorkflowType::Continuous => {
                "Continuous: select stations and archive continuous waveform data for \
                 the whole requested time range."
            }
        }
    }
}

impl ConfigEnum for WorkflowType {
    const FIELD: &'static str = "selected_workflow";
    const ALL: &'static [Self] =
        &[WorkflowType::EventBased, WorkflowType::StationBased, WorkflowType::Continuous];

    fn as_str(&self) -> &'static str {
        match self {
            WorkflowType::EventBased => "event_based",
            WorkflowType::StationBased => "station_based",
            WorkflowType::Continuous => "continuous",
        }
    }
}

/// Kind of spatial filter attached to a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GeoConstraintType {
    #[serde(rename = "bounding")]
    Bounding,
    #[serde(rename = "circle")]
    Circle,
    #[default]
    #[serde(rename = "neither")]
    None,
}

impl ConfigEnum for GeoConstraintType {
    const FIELD: &'static str = "geo_constraint";
    const ALL: &'static [Self] =
        &[GeoConstraintType::Bounding, GeoConstraintType::Circle, GeoConstraintType::None];

    fn as_str(&self) -> &'static str {
        match self {
            GeoConstraintType::Bounding => "bounding",
            GeoConstraintType::Circle => "circle",
            GeoConstraintType::None => "neither",
        }
    }
}

/// Detail level of a station inventory request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InventoryLevel {
    Network,
    Station,
    #[default]
    Channel,
    Response,
}

impl ConfigEnum for InventoryLevel {
    const FIELD: &'static str = "level";
    const ALL: &'static [Self] = &[
        InventoryLevel::Network,
        InventoryLevel::Station,
        InventoryLevel::Channel,
        InventoryLevel::Response,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            InventoryLevel::Network => "network",
            InventoryLevel::Station => "station",
            InventoryLevel::Channel => "channel",
            InventoryLevel::Response => "response",
        }
    }
}

/// 1-D earth model used for travel-time predictions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VelocityModel {
    #[default]
    Iasp91,
    Ak135,
    Ak135f,
    Prem,
}

impl ConfigEnum for VelocityModel {
    const FIELD: &'static str = "model";
    const ALL: &'static [Self] =
        &[VelocityModel::Iasp91, VelocityModel::Ak135, VelocityModel::Ak135f, VelocityModel::Prem];

    fn as_str(&self) -> &'static str {
        match self {
            VelocityModel::Iasp91 => "iasp91",
            VelocityModel::Ak135 => "ak135",
            VelocityModel::Ak135f => "ak135f",
            VelocityModel::Prem => "prem",
        }
    }
}

macro_rules! impl_display_from_str {
    ($($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl FromStr for $ty {
                type Err = SeedVaultError;

                fn from_str(s: &str) -> Result<Self> {
                    <$ty as ConfigEnum>::from_value(s)
                }
            }
        )+
    };
}

impl_display_from_str!(DownloadType, WorkflowType, GeoConstraintType, InventoryLevel, VelocityModel);
