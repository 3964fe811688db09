//! Building a [`SettingsAggregate`] from a configuration document
//!
//! Only an unreadable or syntactically broken file fails the parse. Every
//! per-field problem is recorded in the outcome's [`Diagnostics`] and the
//! field falls back to its file default, so a partially valid file still
//! yields a complete aggregate.

use chrono::{Duration, NaiveDateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::document::ConfigDocument;
use super::values::{check_float, check_val, format_time, is_none, parse_bool, parse_time};
use crate::config::{ConfigSource, FieldSources};
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::models::enums::{ConfigEnum, DownloadType, GeoConstraintType, InventoryLevel, VelocityModel};
use crate::models::event::EventSearchConfig;
use crate::models::geometry::{unwrap_east, unwrap_west, CircleArea, GeometryConstraint, RectangleArea};
use crate::models::groups::{AuthConfig, DateRangeConfig, ProcessingConfig, WaveformConfig};
use crate::models::selector::ChannelSelector;
use crate::models::settings::{default_db_path, SettingsAggregate, DEFAULT_SDS_PATH};
use crate::models::station::{is_channel_pattern, StationSearchConfig};

/// Values substituted while reading a file.
///
/// These intentionally differ from the schema defaults used when a group is
/// built directly in code.
pub mod defaults {
    pub const NUM_PROCESSES: u32 = 2;
    pub const GAP_TOLERANCE: u32 = 60;
    pub const CLIENT: &str = "EARTHSCOPE";
    pub const DAYS_PER_REQUEST: u32 = 1;
    pub const NETWORK: &str = "GSN";
    pub const STATION: &str = "";
    pub const LOCATION: &str = "*";
    pub const CHANNEL: &str = "?H?,?N?";
    pub const MODEL: &str = "iasp91";
    pub const BEFORE_P_SEC: u32 = 20;
    pub const AFTER_P_SEC: u32 = 130;
    pub const MIN_DEPTH: f64 = -3.0;
    pub const MAX_DEPTH: f64 = 600.0;
    pub const MIN_MAGNITUDE: f64 = 5.5;
    pub const MAX_MAGNITUDE: f64 = 7.7;
    pub const MIN_RADIUS: f64 = 30.0;
    pub const MAX_RADIUS: f64 = 90.0;
    /// Event searches cover this many days up to the parse time
    pub const EVENT_WINDOW_DAYS: i64 = 30;
}

/// Aggregate plus everything learned while building it
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub settings: SettingsAggregate,
    pub diagnostics: Diagnostics,
    pub sources: FieldSources,
}

impl ParseOutcome {
    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_valid()
    }

    /// Every resolved field with its text value and source.
    /// Credentials are redacted.
    pub fn to_inspection_map(&self) -> BTreeMap<String, (String, ConfigSource)> {
        let doc = self.settings.to_cfg();

        self.sources
            .iter()
            .map(|(path, source)| {
                let value = match path.split_once('.') {
                    Some(("AUTH", _)) => "<redacted>".to_string(),
                    Some((section, key)) => doc.get(section, key).unwrap_or_default().to_string(),
                    None => String::new(),
                };
                (path.to_string(), (value, source))
            })
            .collect()
    }
}

impl SettingsAggregate {
    /// Read settings from a configuration file
    pub fn from_cfg_file<P: AsRef<Path>>(path: P) -> Result<ParseOutcome> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Loading configuration");
        let doc = ConfigDocument::from_path(path)?;
        Ok(SettingsParser::new().parse_document(&doc))
    }

    /// Read settings from an open stream
    pub fn from_cfg_reader<R: Read>(reader: R) -> Result<ParseOutcome> {
        let doc = ConfigDocument::from_reader(reader)?;
        Ok(SettingsParser::new().parse_document(&doc))
    }

    /// Read settings from configuration text
    pub fn from_cfg_str(text: &str) -> Result<ParseOutcome> {
        let doc = ConfigDocument::parse(text)?;
        Ok(SettingsParser::new().parse_document(&doc))
    }
}

/// Resolves documents into settings relative to a fixed "now"
#[derive(Debug, Clone, Copy)]
pub struct SettingsParser {
    now: NaiveDateTime,
}

impl Default for SettingsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsParser {
    /// Parser anchored at the current UTC time
    pub fn new() -> Self {
        Self::at(Utc::now().naive_utc())
    }

    /// Parser anchored at `now`; relative defaults are computed from it
    pub fn at(now: NaiveDateTime) -> Self {
        Self { now }
    }

    pub fn parse_str(&self, text: &str) -> Result<ParseOutcome> {
        let doc = ConfigDocument::parse(text)?;
        Ok(self.parse_document(&doc))
    }

    pub fn parse_document(&self, doc: &ConfigDocument) -> ParseOutcome {
        let mut resolver = Resolver::new(doc);

        let sds_path = resolver.sds_path();
        let db_path = resolver.db_path(&sds_path);
        let (processing, download_type) = resolver.processing();
        let settings = SettingsAggregate {
            sds_path,
            db_path,
            download_type,
            processing,
            auths: resolver.auths(),
            waveform: resolver.waveform(),
            station: resolver.station(),
            event: resolver.event(self.now),
            ..SettingsAggregate::default()
        };

        tracing::debug!(
            warnings = resolver.diagnostics.warnings.len(),
            errors = resolver.diagnostics.errors.len(),
            "Resolved configuration"
        );

        ParseOutcome {
            settings,
            diagnostics: resolver.diagnostics,
            sources: resolver.sources,
        }
    }
}

/// Legacy spellings accepted on read; the first name is always written
fn aliases(section: &str, key: &str) -> &'static [&'static str] {
    match (section, key) {
        ("STATION", "includerestricted") => &["include_restricted"],
        ("STATION", "minsearchradius") => &["minradius"],
        ("STATION", "maxsearchradius") => &["maxradius"],
        ("EVENT", "updatedafter") => &["updated_after"],
        _ => &[],
    }
}

fn any_value(_: &str) -> bool {
    true
}

fn is_time(value: &str) -> bool {
    parse_time(value).is_some()
}

fn is_count(value: &str) -> bool {
    value.parse::<u32>().is_ok()
}

fn is_number(value: &str) -> bool {
    value.parse::<f64>().is_ok_and(f64::is_finite)
}

fn is_member<E: ConfigEnum>(value: &str) -> bool {
    E::from_value(value).is_ok()
}

struct Resolver<'a> {
    doc: &'a ConfigDocument,
    diagnostics: Diagnostics,
    sources: FieldSources,
}

impl<'a> Resolver<'a> {
    fn new(doc: &'a ConfigDocument) -> Self {
        Self {
            doc,
            diagnostics: Diagnostics::new(),
            sources: FieldSources::new(),
        }
    }

    fn raw(&self, section: &str, key: &str) -> Option<&'a str> {
        let doc = self.doc;
        std::iter::once(key)
            .chain(aliases(section, key).iter().copied())
            .find_map(|name| doc.get(section, name))
    }

    fn from_file(&mut self, section: &str, key: &str) {
        self.sources.record(section, key, ConfigSource::File);
    }

    fn defaulted(&mut self, section: &str, key: &str) {
        self.sources.record(section, key, ConfigSource::Default);
    }

    fn missing_section(&mut self, section: &str) -> bool {
        if self.doc.has_section(section) {
            return false;
        }
        self.diagnostics.error(
            section,
            None,
            format!("The [{}] section is missing in the configuration file.", section),
        );
        true
    }

    /// Required value: a missing key or a rejected value is an error, an empty
    /// value a warning. Returns the accepted raw value, `None` when the caller
    /// should use `default`.
    fn resolve(
        &mut self,
        section: &str,
        key: &str,
        default: &str,
        accept: fn(&str) -> bool,
        allowed: &[&str],
    ) -> Option<&'a str> {
        match self.raw(section, key).map(str::trim) {
            None => {
                self.diagnostics.error(
                    section,
                    Some(key),
                    format!(
                        "'{}' is missing in the [{}] section. Using default value: '{}'.",
                        key, section, default
                    ),
                );
                self.defaulted(section, key);
                None
            }
            Some(value) if is_none(Some(value)) => {
                self.diagnostics.warn(
                    section,
                    Some(key),
                    format!(
                        "'{}' is empty in the [{}] section. Using default value: '{}'.",
                        key, section, default
                    ),
                );
                self.defaulted(section, key);
                None
            }
            Some(value) if !accept(value) => {
                let hint = if allowed.is_empty() {
                    String::new()
                } else {
                    format!(" Allowed values: {}.", allowed.join(", "))
                };
                self.diagnostics.error(
                    section,
                    Some(key),
                    format!(
                        "Invalid value '{}' for '{}' in the [{}] section.{} Using default value: '{}'.",
                        value, key, section, hint, default
                    ),
                );
                self.defaulted(section, key);
                None
            }
            Some(value) => {
                self.from_file(section, key);
                Some(value)
            }
        }
    }

    fn required_text(&mut self, section: &str, key: &str, default: &str, accept: fn(&str) -> bool) -> String {
        self.resolve(section, key, default, accept, &[])
            .unwrap_or(default)
            .to_string()
    }

    fn required_enum<E: ConfigEnum>(&mut self, section: &str, key: &str, default: E) -> E {
        let allowed = E::allowed_values();
        self.resolve(section, key, default.as_str(), is_member::<E>, &allowed)
            .and_then(|value| E::from_value(value).ok())
            .unwrap_or(default)
    }

    fn required_parsed<T>(&mut self, section: &str, key: &str, default: T, accept: fn(&str) -> bool) -> T
    where
        T: FromStr + fmt::Display,
    {
        let shown = default.to_string();
        self.resolve(section, key, &shown, accept, &[])
            .and_then(|value| value.parse().ok())
            .unwrap_or(default)
    }

    /// Optional value: absent or empty means default, an unusable value warns
    fn optional_float(&mut self, section: &str, key: &str, default: f64) -> f64 {
        let raw = self.raw(section, key);
        match check_float(raw, default) {
            Ok(value) => {
                if is_none(raw) {
                    self.defaulted(section, key);
                } else {
                    self.from_file(section, key);
                }
                value
            }
            Err(err) => {
                self.diagnostics.warn(
                    section,
                    Some(key),
                    format!("{} for '{}'. Using default value: '{}'.", err, key, default),
                );
                self.defaulted(section, key);
                default
            }
        }
    }

    fn optional_count(&mut self, section: &str, key: &str) -> Option<u32> {
        let raw = self.raw(section, key);
        if is_none(raw) {
            self.defaulted(section, key);
            return None;
        }
        match check_val::<u32>(raw, 0) {
            Ok(value) => {
                self.from_file(section, key);
                Some(value)
            }
            Err(err) => {
                self.diagnostics.warn(section, Some(key), format!("{} for '{}'. Ignoring it.", err, key));
                self.defaulted(section, key);
                None
            }
        }
    }

    fn optional_text(&mut self, section: &str, key: &str) -> Option<String> {
        let raw = self.raw(section, key).map(str::trim);
        if is_none(raw) {
            self.defaulted(section, key);
            return None;
        }
        self.from_file(section, key);
        raw.map(str::to_string)
    }

    fn optional_time(&mut self, section: &str, key: &str) -> Option<NaiveDateTime> {
        let Some(value) = self.raw(section, key).map(str::trim).filter(|v| !v.is_empty()) else {
            self.defaulted(section, key);
            return None;
        };
        match parse_time(value) {
            Some(time) => {
                self.from_file(section, key);
                Some(time)
            }
            None => {
                self.diagnostics.warn(
                    section,
                    Some(key),
                    format!(
                        "Could not interpret '{}' as a date for '{}' in the [{}] section. Ignoring it.",
                        value, key, section
                    ),
                );
                self.defaulted(section, key);
                None
            }
        }
    }

    fn flag(&mut self, section: &str, key: &str, default: bool) -> bool {
        let raw = self.raw(section, key);
        if is_none(raw) {
            self.defaulted(section, key);
            return default;
        }
        let value = raw.unwrap_or_default().trim();
        match parse_bool(value) {
            Some(flag) => {
                self.from_file(section, key);
                flag
            }
            None => {
                self.diagnostics.warn(
                    section,
                    Some(key),
                    format!(
                        "'{}' is not a boolean value for '{}' in the [{}] section. Using default value: '{}'.",
                        value, key, section, default
                    ),
                );
                self.defaulted(section, key);
                default
            }
        }
    }

    /// Blank or absent waveform client names warn and fall back
    fn waveform_client(&mut self, section: &str) -> String {
        match self.raw(section, "client").map(str::trim) {
            Some(value) if !is_none(Some(value)) => {
                self.from_file(section, "client");
                value.to_string()
            }
            _ => {
                self.diagnostics.warn(
                    section,
                    Some("client"),
                    format!(
                        "'client' is missing or empty in the [{}] section. Using default value: '{}'.",
                        section,
                        defaults::CLIENT
                    ),
                );
                self.defaulted(section, "client");
                defaults::CLIENT.to_string()
            }
        }
    }

    fn sds_path(&mut self) -> PathBuf {
        match self.raw("SDS", "sds_path").map(str::trim).filter(|v| !v.is_empty()) {
            Some(path) => {
                self.from_file("SDS", "sds_path");
                PathBuf::from(path)
            }
            None => {
                self.diagnostics.warn(
                    "SDS",
                    Some("sds_path"),
                    format!(
                        "'sds_path' is missing or empty in the [SDS] section. Using default value: '{}'.",
                        DEFAULT_SDS_PATH
                    ),
                );
                self.defaulted("SDS", "sds_path");
                PathBuf::from(DEFAULT_SDS_PATH)
            }
        }
    }

    fn db_path(&mut self, sds_path: &Path) -> PathBuf {
        match self.raw("DATABASE", "db_path").map(str::trim).filter(|v| !v.is_empty()) {
            Some(path) => {
                self.from_file("DATABASE", "db_path");
                PathBuf::from(path)
            }
            None => {
                let default = default_db_path(sds_path);
                self.diagnostics.warn(
                    "DATABASE",
                    Some("db_path"),
                    format!(
                        "'db_path' is missing or empty in the [DATABASE] section. Using default value: '{}'.",
                        default.display()
                    ),
                );
                self.defaulted("DATABASE", "db_path");
                default
            }
        }
    }

    /// Worker counts and tolerances: any unusable value warns and falls back
    fn count_or_default(&mut self, section: &str, key: &str, default: u32) -> u32 {
        let raw = self.raw(section, key);
        match check_val(raw, default) {
            Ok(value) if !is_none(raw) => {
                self.from_file(section, key);
                value
            }
            _ => {
                self.diagnostics.warn(
                    section,
                    Some(key),
                    format!(
                        "'{}' is missing or invalid in the [{}] section. Using default value: '{}'.",
                        key, section, default
                    ),
                );
                self.defaulted(section, key);
                default
            }
        }
    }

    fn processing(&mut self) -> (ProcessingConfig, DownloadType) {
        const SECTION: &str = "PROCESSING";

        let processing = ProcessingConfig {
            num_processes: self.count_or_default(SECTION, "num_processes", defaults::NUM_PROCESSES),
            gap_tolerance: self.count_or_default(SECTION, "gap_tolerance", defaults::GAP_TOLERANCE),
            logging: self.optional_text(SECTION, "logging"),
        };

        let raw = self.raw(SECTION, "download_type").unwrap_or_default().trim().to_lowercase();
        let download_type = match DownloadType::from_value(&raw) {
            Ok(download_type) => {
                self.from_file(SECTION, "download_type");
                download_type
            }
            Err(_) => {
                self.diagnostics.warn(
                    SECTION,
                    Some("download_type"),
                    format!(
                        "Invalid download_type '{}' found in config. Defaulting to '{}'.",
                        raw,
                        DownloadType::Event
                    ),
                );
                self.defaulted(SECTION, "download_type");
                DownloadType::Event
            }
        };

        (processing, download_type)
    }

    /// One malformed credential discards the whole section
    fn auths(&mut self) -> Vec<AuthConfig> {
        let doc = self.doc;
        let Some(section) = doc.section("AUTH") else {
            self.diagnostics.warn("AUTH", None, "No [AUTH] section found; no credentials are configured.");
            return Vec::new();
        };

        let mut auths = Vec::with_capacity(section.entries.len());
        for (nslc, credential) in &section.entries {
            match credential.split_once(':') {
                Some((username, password)) => auths.push(AuthConfig::new(nslc, username, password)),
                None => {
                    self.diagnostics.error(
                        "AUTH",
                        Some(nslc.as_str()),
                        format!(
                            "Error parsing [AUTH] section: the credential for '{}' is not in 'username:password' form. No credentials were loaded.",
                            nslc
                        ),
                    );
                    return Vec::new();
                }
            }
        }

        for auth in &auths {
            self.from_file("AUTH", &auth.nslc_code);
        }
        auths
    }

    fn waveform(&mut self) -> WaveformConfig {
        const SECTION: &str = "WAVEFORM";

        let mut waveform = WaveformConfig {
            client: Some(defaults::CLIENT.to_string()),
            channel_pref: None,
            location_pref: None,
            days_per_request: defaults::DAYS_PER_REQUEST,
        };
        if self.missing_section(SECTION) {
            return waveform;
        }

        waveform.client = Some(self.waveform_client(SECTION));
        waveform.channel_pref = self.optional_text(SECTION, "channel_pref");
        waveform.location_pref = self.optional_text(SECTION, "location_pref");
        waveform.days_per_request =
            self.required_parsed(SECTION, "days_per_request", defaults::DAYS_PER_REQUEST, is_count);
        waveform
    }

    fn station(&mut self) -> StationSearchConfig {
        const SECTION: &str = "STATION";

        let mut station = StationSearchConfig {
            client: Some(defaults::CLIENT.to_string()),
            network: Some(defaults::NETWORK.to_string()),
            station: Some(defaults::STATION.to_string()),
            location: Some(defaults::LOCATION.to_string()),
            channel: Some(defaults::CHANNEL.to_string()),
            ..StationSearchConfig::default()
        };
        if self.missing_section(SECTION) {
            return station;
        }

        station.client = Some(self.required_text(SECTION, "client", defaults::CLIENT, any_value));
        station.network = Some(self.required_text(SECTION, "network", defaults::NETWORK, any_value));
        station.station = Some(self.required_text(SECTION, "station", defaults::STATION, any_value));
        station.location = Some(self.required_text(SECTION, "location", defaults::LOCATION, any_value));
        station.channel = Some(self.required_text(SECTION, "channel", defaults::CHANNEL, is_channel_pattern));
        station.force_stations = self.selectors(SECTION, "force_stations");
        station.exclude_stations = self.selectors(SECTION, "exclude_stations");
        station.local_inventory = self.optional_text(SECTION, "local_inventory");
        station.include_restricted = self.flag(SECTION, "includerestricted", false);
        station.level = self.required_enum(SECTION, "level", InventoryLevel::Channel);
        station.date_config = DateRangeConfig {
            start_time: self.optional_time(SECTION, "starttime"),
            end_time: self.optional_time(SECTION, "endtime"),
            start_before: self.optional_time(SECTION, "startbefore"),
            start_after: self.optional_time(SECTION, "startafter"),
            end_before: self.optional_time(SECTION, "endbefore"),
            end_after: self.optional_time(SECTION, "endafter"),
        };
        station.geo_constraint = self.geo_constraint(SECTION);
        station
    }

    /// Comma-separated `NET.STA` list; bad tokens are reported and skipped
    fn selectors(&mut self, section: &str, key: &str) -> Vec<ChannelSelector> {
        let raw = self.raw(section, key).unwrap_or_default();
        let mut selectors = Vec::new();

        for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match ChannelSelector::from_compact(token) {
                Ok(selector) => {
                    if ChannelSelector::component_count(token) > 2 {
                        self.diagnostics.warn(
                            section,
                            Some(key),
                            format!(
                                "'{}' in '{}' has more than NET.STA; only '{}' is kept.",
                                token,
                                key,
                                selector.compact()
                            ),
                        );
                    }
                    selectors.push(selector);
                }
                Err(err) => {
                    self.diagnostics.error(section, Some(key), format!("{}. Skipping it.", err));
                }
            }
        }

        if selectors.is_empty() {
            self.defaulted(section, key);
        } else {
            self.from_file(section, key);
        }
        selectors
    }

    fn event(&mut self, now: NaiveDateTime) -> Option<EventSearchConfig> {
        const SECTION: &str = "EVENT";

        if self.missing_section(SECTION) {
            return None;
        }

        let start_default = now - Duration::days(defaults::EVENT_WINDOW_DAYS);
        let start = self.required_text(SECTION, "starttime", &format_time(&start_default), is_time);
        let end = self.required_text(SECTION, "endtime", &format_time(&now), is_time);

        let event = EventSearchConfig {
            client: Some(self.required_text(SECTION, "client", defaults::CLIENT, any_value)),
            date_config: DateRangeConfig {
                start_time: Some(parse_time(&start).unwrap_or(start_default)),
                end_time: Some(parse_time(&end).unwrap_or(now)),
                start_before: self.optional_time(SECTION, "startbefore"),
                start_after: self.optional_time(SECTION, "startafter"),
                end_before: self.optional_time(SECTION, "endbefore"),
                end_after: self.optional_time(SECTION, "endafter"),
            },
            model: self.required_enum(SECTION, "model", VelocityModel::Iasp91),
            min_depth: self.optional_float(SECTION, "min_depth", defaults::MIN_DEPTH),
            max_depth: self.optional_float(SECTION, "max_depth", defaults::MAX_DEPTH),
            min_magnitude: self.optional_float(SECTION, "minmagnitude", defaults::MIN_MAGNITUDE),
            max_magnitude: self.optional_float(SECTION, "maxmagnitude", defaults::MAX_MAGNITUDE),
            min_radius: self.optional_float(SECTION, "minradius", defaults::MIN_RADIUS),
            max_radius: self.optional_float(SECTION, "maxradius", defaults::MAX_RADIUS),
            before_p_sec: self.required_parsed(SECTION, "before_p_sec", defaults::BEFORE_P_SEC, is_count),
            after_p_sec: self.required_parsed(SECTION, "after_p_sec", defaults::AFTER_P_SEC, is_count),
            include_all_origins: self.flag(SECTION, "includeallorigins", false),
            include_all_magnitudes: self.flag(SECTION, "includeallmagnitudes", false),
            include_arrivals: self.flag(SECTION, "includearrivals", false),
            limit: self.optional_count(SECTION, "limit"),
            offset: self.optional_count(SECTION, "offset"),
            local_catalog: self.optional_text(SECTION, "local_catalog"),
            contributor: self.optional_text(SECTION, "contributor"),
            updated_after: self.optional_time(SECTION, "updatedafter"),
            selected_catalogs: None,
            geo_constraint: self.geo_constraint(SECTION),
        };

        // Inconsistent bounds are reported but kept as written
        self.diagnostics.merge(event.check_radius_bounds());
        Some(event)
    }

    fn coordinate(&mut self, section: &str, key: &str, default: f64) -> f64 {
        self.required_parsed(section, key, default, is_number)
    }

    /// At most one constraint; its kind selects which coordinate keys are read
    fn geo_constraint(&mut self, section: &str) -> Vec<GeometryConstraint> {
        let Some(kind) = self.raw(section, "geo_constraint").map(str::trim) else {
            self.defaulted(section, "geo_constraint");
            return Vec::new();
        };

        if kind == GeoConstraintType::Bounding.as_str() {
            self.from_file(section, "geo_constraint");
            let mut area = RectangleArea::new(
                self.coordinate(section, "minlatitude", -90.0),
                self.coordinate(section, "maxlatitude", 90.0),
                self.coordinate(section, "minlongitude", -180.0),
                self.coordinate(section, "maxlongitude", 180.0),
            );
            if let Some(lng) = unwrap_east(area.max_lng) {
                self.adjusted(section, "maxlongitude", area.max_lng, lng);
                area.max_lng = lng;
            }
            if let Some(lng) = unwrap_west(area.min_lng) {
                self.adjusted(section, "minlongitude", area.min_lng, lng);
                area.min_lng = lng;
            }
            vec![GeometryConstraint::rectangle(area)]
        } else if kind == GeoConstraintType::Circle.as_str() {
            self.from_file(section, "geo_constraint");
            let mut area = CircleArea::new(
                self.coordinate(section, "latitude", 0.0),
                self.coordinate(section, "longitude", 0.0),
                self.coordinate(section, "minsearchradius", 0.0),
                self.coordinate(section, "maxsearchradius", 180.0),
            );
            if let Some(lng) = unwrap_east(area.lng).or_else(|| unwrap_west(area.lng)) {
                self.adjusted(section, "longitude", area.lng, lng);
                area.lng = lng;
            }
            vec![GeometryConstraint::circle(area)]
        } else {
            self.diagnostics.error(
                section,
                Some("geo_constraint"),
                format!(
                    "Invalid geo_constraint type '{}' in the [{}] section. Allowed values are '{}' or '{}'.",
                    kind,
                    section,
                    GeoConstraintType::Bounding,
                    GeoConstraintType::Circle
                ),
            );
            self.defaulted(section, "geo_constraint");
            Vec::new()
        }
    }

    fn adjusted(&mut self, section: &str, key: &str, from: f64, to: f64) {
        self.diagnostics.warn(
            section,
            Some(key),
            format!("'{}' value {} is outside [-180, 180]. Adjusted to {}.", key, from, to),
        );
    }
}
