// src/location/mod.rs
//! Device location acquisition and the privacy reduction applied before a
//! fix is attached to a civic report.

pub mod geo;
pub mod privacy;
pub mod types;

pub use geo::{
    GeoSource, LocationPlatform, Locator, PermissionStatus, PositionOptions, StaticPlatform,
};
pub use privacy::{
    is_known_category, is_within_service_area, rationale_for, recommended_tier, reduce,
    urgency_of, validate, LocationValidation, PrecisionTier, ReportUrgency,
};
pub use types::{LocationFix, ReducedLocation};
