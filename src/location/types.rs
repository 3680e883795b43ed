// src/location/types.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::location::privacy::PrecisionTier;

/// A single live reading from the device. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_meters: f64,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl LocationFix {
    pub fn new(latitude: f64, longitude: f64, accuracy_meters: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_meters,
            timestamp: Utc::now(),
            altitude: None,
            heading: None,
            speed: None,
        }
    }
}

/// A fix after precision reduction. `tier` is retained for audit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReducedLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_meters: f64,
    pub tier: PrecisionTier,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl ReducedLocation {
    /// View the reduced coordinate as a fix again (altitude/heading/speed are gone).
    pub fn as_fix(&self) -> LocationFix {
        LocationFix {
            latitude: self.latitude,
            longitude: self.longitude,
            accuracy_meters: self.accuracy_meters,
            timestamp: self.timestamp,
            altitude: None,
            heading: None,
            speed: None,
        }
    }
}
