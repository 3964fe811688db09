//! Scalar conversions between raw text values and typed settings

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Result, SeedVaultError};
use crate::models::enums::{
    ConfigEnum, DownloadType, GeoConstraintType, InventoryLevel, VelocityModel, WorkflowType,
};
use crate::models::selector::ChannelSelector;

/// Timestamp layout written by the serializer
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// `None`, empty, or the literal `none` in any case
pub fn is_none(raw: Option<&str>) -> bool {
    match raw {
        None => true,
        Some(value) => {
            let value = value.trim();
            value.is_empty() || value.eq_ignore_ascii_case("none")
        }
    }
}

/// Convert a raw value, falling back to `default` when it is absent.
///
/// Absent, empty and `none` values yield the default; anything else must
/// parse as `T`.
pub fn check_val<T: FromStr>(raw: Option<&str>, default: T) -> Result<T> {
    if is_none(raw) {
        return Ok(default);
    }
    let value = raw.unwrap_or_default().trim();
    value.parse::<T>().map_err(|_| SeedVaultError::InvalidValue {
        value: value.to_string(),
        expected: std::any::type_name::<T>().to_string(),
    })
}

/// [`check_val`] for floats. `nan` and the infinities parse as `f64` but are
/// not usable settings, so they are rejected.
pub fn check_float(raw: Option<&str>, default: f64) -> Result<f64> {
    let value = check_val(raw, default)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SeedVaultError::InvalidValue {
            value: raw.unwrap_or_default().trim().to_string(),
            expected: "a finite number".to_string(),
        })
    }
}

/// Boolean literals accepted in configuration files
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Interpret a timestamp, trying ISO-8601 first and then the legacy
/// `YYYY,MM,DD`, `YYYYDDD` and `YYYY,MM,DD,HH,MM,SS` forms.
///
/// Zone-qualified values are converted to UTC.
pub fn parse_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    parse_iso(value)
        .or_else(|| parse_comma_date(value))
        .or_else(|| parse_julian(value))
        .or_else(|| parse_comma_datetime(value))
}

/// Render a timestamp the way [`parse_time`] reads it back
pub fn format_time(value: &NaiveDateTime) -> String {
    value.format(TIME_FORMAT).to_string()
}

fn parse_iso(value: &str) -> Option<NaiveDateTime> {
    if let Ok(zoned) = DateTime::parse_from_rfc3339(value) {
        return Some(zoned.naive_utc());
    }

    let naive = value.strip_suffix('Z').unwrap_or(value);
    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(naive, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(naive, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

fn numeric_parts(value: &str, count: usize) -> Option<Vec<u32>> {
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<u32>().ok())
        .collect::<Option<Vec<_>>>()?;
    (parts.len() == count).then_some(parts)
}

fn parse_comma_date(value: &str) -> Option<NaiveDateTime> {
    let parts = numeric_parts(value, 3)?;
    NaiveDate::from_ymd_opt(parts[0] as i32, parts[1], parts[2])
        .map(|date| date.and_time(NaiveTime::MIN))
}

fn parse_julian(value: &str) -> Option<NaiveDateTime> {
    if value.len() != 7 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = value[..4].parse::<i32>().ok()?;
    let ordinal = value[4..].parse::<u32>().ok()?;
    NaiveDate::from_yo_opt(year, ordinal).map(|date| date.and_time(NaiveTime::MIN))
}

fn parse_comma_datetime(value: &str) -> Option<NaiveDateTime> {
    let parts = numeric_parts(value, 6)?;
    NaiveDate::from_ymd_opt(parts[0] as i32, parts[1], parts[2])
        .and_then(|date| date.and_hms_opt(parts[3], parts[4], parts[5]))
}

/// Display form of any value, falling back to its debug form.
///
/// Never fails: a formatting error is logged and yields an empty string.
pub fn display_or_debug<T: fmt::Display + fmt::Debug + ?Sized>(value: &T) -> String {
    use fmt::Write;

    let mut out = String::new();
    if write!(out, "{}", value).is_ok() {
        return out;
    }
    out.clear();
    if write!(out, "{:?}", value).is_ok() {
        return out;
    }
    tracing::warn!("Error converting a setting to text, writing an empty value");
    String::new()
}

/// Text form of a setting as written to a configuration file.
///
/// Missing values become empty strings and enums write their raw value.
pub trait ToCfgValue {
    fn to_cfg_value(&self) -> String;
}

impl<T: ToCfgValue> ToCfgValue for Option<T> {
    fn to_cfg_value(&self) -> String {
        self.as_ref().map(ToCfgValue::to_cfg_value).unwrap_or_default()
    }
}

impl<T: ToCfgValue + ?Sized> ToCfgValue for &T {
    fn to_cfg_value(&self) -> String {
        (**self).to_cfg_value()
    }
}

impl ToCfgValue for str {
    fn to_cfg_value(&self) -> String {
        self.to_string()
    }
}

impl ToCfgValue for NaiveDateTime {
    fn to_cfg_value(&self) -> String {
        format_time(self)
    }
}

impl ToCfgValue for Path {
    fn to_cfg_value(&self) -> String {
        self.display().to_string()
    }
}

impl ToCfgValue for PathBuf {
    fn to_cfg_value(&self) -> String {
        self.as_path().to_cfg_value()
    }
}

macro_rules! impl_cfg_value_via_display {
    ($($ty:ty),+) => {
        $(
            impl ToCfgValue for $ty {
                fn to_cfg_value(&self) -> String {
                    display_or_debug(self)
                }
            }
        )+
    };
}

impl_cfg_value_via_display!(String, bool, u32, i64, f64, ChannelSelector);

macro_rules! impl_cfg_value_for_enum {
    ($($ty:ty),+) => {
        $(
            impl ToCfgValue for $ty {
                fn to_cfg_value(&self) -> String {
                    self.as_str().to_string()
                }
            }
        )+
    };
}

impl_cfg_value_for_enum!(DownloadType, WorkflowType, GeoConstraintType, InventoryLevel, VelocityModel);
