//! Writing a [`SettingsAggregate`] as section-based text
//!
//! Writing never fails on a value: anything that cannot be rendered becomes
//! an empty string. Only the first geometry constraint of a search is
//! written, since the format has room for one.

use std::path::Path;

use super::document::ConfigDocument;
use super::values::ToCfgValue;
use crate::error::Result;
use crate::models::geometry::{GeoCoords, GeometryConstraint};
use crate::models::groups::DateRangeConfig;
use crate::models::selector::ChannelSelector;
use crate::models::settings::SettingsAggregate;

impl SettingsAggregate {
    /// Render every persisted setting into a document
    pub fn to_cfg(&self) -> ConfigDocument {
        let mut doc = ConfigDocument::new();

        put(&mut doc, "SDS", "sds_path", &self.sds_path);
        put(&mut doc, "DATABASE", "db_path", &self.db_path);

        let processing = &self.processing;
        put(&mut doc, "PROCESSING", "num_processes", processing.num_processes);
        put(&mut doc, "PROCESSING", "gap_tolerance", processing.gap_tolerance);
        put(&mut doc, "PROCESSING", "download_type", self.download_type);
        put(&mut doc, "PROCESSING", "logging", &processing.logging);

        doc.add_section("AUTH");
        for auth in &self.auths {
            doc.set("AUTH", &auth.nslc_code, auth.credential());
        }

        let waveform = &self.waveform;
        put(&mut doc, "WAVEFORM", "client", &waveform.client);
        put(&mut doc, "WAVEFORM", "channel_pref", &waveform.channel_pref);
        put(&mut doc, "WAVEFORM", "location_pref", &waveform.location_pref);
        put(&mut doc, "WAVEFORM", "days_per_request", waveform.days_per_request);

        let station = &self.station;
        put(&mut doc, "STATION", "client", &station.client);
        put(&mut doc, "STATION", "network", &station.network);
        put(&mut doc, "STATION", "station", &station.station);
        put(&mut doc, "STATION", "location", &station.location);
        put(&mut doc, "STATION", "channel", &station.channel);
        put(&mut doc, "STATION", "force_stations", join_selectors(&station.force_stations));
        put(&mut doc, "STATION", "exclude_stations", join_selectors(&station.exclude_stations));
        put(&mut doc, "STATION", "local_inventory", &station.local_inventory);
        put(&mut doc, "STATION", "includerestricted", station.include_restricted);
        put(&mut doc, "STATION", "level", station.level);
        put_dates(&mut doc, "STATION", &station.date_config);
        put_geometry(&mut doc, "STATION", station.primary_constraint(), station.geo_constraint.len());

        if let Some(event) = &self.event {
            put(&mut doc, "EVENT", "client", &event.client);
            put(&mut doc, "EVENT", "model", event.model);
            put_dates(&mut doc, "EVENT", &event.date_config);
            put(&mut doc, "EVENT", "before_p_sec", event.before_p_sec);
            put(&mut doc, "EVENT", "after_p_sec", event.after_p_sec);
            put(&mut doc, "EVENT", "min_depth", event.min_depth);
            put(&mut doc, "EVENT", "max_depth", event.max_depth);
            put(&mut doc, "EVENT", "minmagnitude", event.min_magnitude);
            put(&mut doc, "EVENT", "maxmagnitude", event.max_magnitude);
            put(&mut doc, "EVENT", "minradius", event.min_radius);
            put(&mut doc, "EVENT", "maxradius", event.max_radius);
            put(&mut doc, "EVENT", "includeallorigins", event.include_all_origins);
            put(&mut doc, "EVENT", "includeallmagnitudes", event.include_all_magnitudes);
            put(&mut doc, "EVENT", "includearrivals", event.include_arrivals);
            put(&mut doc, "EVENT", "limit", event.limit);
            put(&mut doc, "EVENT", "offset", event.offset);
            put(&mut doc, "EVENT", "local_catalog", &event.local_catalog);
            put(&mut doc, "EVENT", "contributor", &event.contributor);
            put(&mut doc, "EVENT", "updatedafter", event.updated_after);
            put_geometry(&mut doc, "EVENT", event.primary_constraint(), event.geo_constraint.len());
        }

        doc
    }

    /// Rendered configuration text
    pub fn to_cfg_string(&self) -> String {
        self.to_cfg().render()
    }

    /// Write the configuration file, replacing any existing one
    pub fn write_cfg<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Writing configuration");
        self.to_cfg().write_to(path)
    }
}

fn put(doc: &mut ConfigDocument, section: &str, key: &str, value: impl ToCfgValue) {
    doc.set(section, key, value.to_cfg_value());
}

fn join_selectors(selectors: &[ChannelSelector]) -> String {
    selectors
        .iter()
        .filter_map(ChannelSelector::compact_opt)
        .collect::<Vec<_>>()
        .join(",")
}

fn put_dates(doc: &mut ConfigDocument, section: &str, dates: &DateRangeConfig) {
    put(doc, section, "starttime", dates.start_time);
    put(doc, section, "endtime", dates.end_time);
    put(doc, section, "startbefore", dates.start_before);
    put(doc, section, "startafter", dates.start_after);
    put(doc, section, "endbefore", dates.end_before);
    put(doc, section, "endafter", dates.end_after);
}

fn put_geometry(doc: &mut ConfigDocument, section: &str, primary: Option<&GeometryConstraint>, count: usize) {
    if count > 1 {
        tracing::debug!(section, dropped = count - 1, "Only the first geometry constraint is written");
    }

    let Some(coords) = primary.and_then(GeometryConstraint::coords) else {
        return;
    };

    put(doc, section, "geo_constraint", coords.geo_type());
    match coords {
        GeoCoords::Rectangle(area) => {
            put(doc, section, "minlatitude", area.min_lat);
            put(doc, section, "maxlatitude", area.max_lat);
            put(doc, section, "minlongitude", area.min_lng);
            put(doc, section, "maxlongitude", area.max_lng);
        }
        GeoCoords::Circle(area) => {
            put(doc, section, "latitude", area.lat);
            put(doc, section, "longitude", area.lng);
            put(doc, section, "minsearchradius", area.min_radius);
            put(doc, section, "maxsearchradius", area.max_radius);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::geometry::{CircleArea, RectangleArea};
    use crate::models::groups::AuthConfig;

    #[test]
    fn test_every_section_is_written() {
        let doc = SettingsAggregate::default().to_cfg();
        for section in ["SDS", "DATABASE", "PROCESSING", "AUTH", "WAVEFORM", "STATION", "EVENT"] {
            assert!(doc.has_section(section), "{section}");
        }
        assert_eq!(doc.get("PROCESSING", "download_type"), Some("event"));
        assert_eq!(doc.get("STATION", "level"), Some("channel"));
        assert_eq!(doc.get("EVENT", "model"), Some("iasp91"));
        assert_eq!(doc.get("EVENT", "limit"), Some(""));
    }

    #[test]
    fn test_no_event_section_without_event_search() {
        let settings = SettingsAggregate { event: None, ..Default::default() };
        assert!(!settings.to_cfg().has_section("EVENT"));
    }

    #[test]
    fn test_credentials_and_selectors() {
        let mut settings = SettingsAggregate::default();
        settings.auths.push(AuthConfig::new("XX.STA", "alice", "pa:ss"));
        settings.station.force_stations =
            vec![ChannelSelector::station("IU", "ANMO"), ChannelSelector::default()];

        let doc = settings.to_cfg();
        assert_eq!(doc.get("AUTH", "XX.STA"), Some("alice:pa:ss"));
        assert_eq!(doc.get("STATION", "force_stations"), Some("IU.ANMO"));
        assert_eq!(doc.get("STATION", "exclude_stations"), Some(""));
    }

    #[test]
    fn test_only_first_constraint_written() {
        let mut settings = SettingsAggregate::default();
        settings.station.geo_constraint = vec![
            GeometryConstraint::circle(CircleArea::new(10.0, 20.0, 0.0, 5.0)),
            GeometryConstraint::rectangle(RectangleArea::new(0.0, 1.0, 2.0, 3.0)),
        ];

        let doc = settings.to_cfg();
        assert_eq!(doc.get("STATION", "geo_constraint"), Some("circle"));
        assert_eq!(doc.get("STATION", "longitude"), Some("20"));
        assert_eq!(doc.get("STATION", "minlatitude"), None);
    }

    #[test]
    fn test_empty_first_constraint_writes_no_geometry() {
        let mut settings = SettingsAggregate::default();
        settings.station.geo_constraint = vec![
            GeometryConstraint::none(),
            GeometryConstraint::rectangle(RectangleArea::default()),
        ];
        assert_eq!(settings.to_cfg().get("STATION", "geo_constraint"), None);
    }
}
