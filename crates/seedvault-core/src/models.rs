pub mod enums;
pub mod event;
pub mod geometry;
pub mod groups;
pub mod selector;
pub mod settings;
pub mod station;

pub use enums::{ConfigEnum, DownloadType, GeoConstraintType, InventoryLevel, VelocityModel, WorkflowType};
pub use event::EventSearchConfig;
pub use geometry::{CircleArea, GeoCoords, GeometryConstraint, RectangleArea};
pub use groups::{AuthConfig, DateRangeConfig, ProcessingConfig, WaveformConfig};
pub use selector::ChannelSelector;
pub use settings::{FieldChange, PredictionRecord, SettingsAggregate, SettingsDiff};
pub use station::StationSearchConfig;
