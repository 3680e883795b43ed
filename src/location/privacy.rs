// src/location/privacy.rs
//! # Location privacy
//!
//! Deterministic coordinate reduction for civic reports, plus the two
//! category policy tables that drive it:
//!
//! - `recommended_tier`: which precision a report category should be sent at.
//! - `urgency_of`: which permission-prompt wording to show.
//!
//! The two tables are independent and disagree on purpose for some
//! categories (e.g. `sewage_overflow` is `Safety` wording but `Exact`
//! precision). Keep them separate.
//!
//! Nothing here performs I/O.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::location::types::{LocationFix, ReducedLocation};

/// Minimum radius reported for an exact fix, even when the sensor claims better.
const EXACT_MIN_RADIUS_M: f64 = 5.0;

/// Degree of coordinate rounding. Ordered from finest to coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecisionTier {
    Exact,
    Street,
    Area,
}

impl PrecisionTier {
    pub const ALL: [PrecisionTier; 3] = [Self::Exact, Self::Street, Self::Area];

    /// Decimal places kept; `None` means pass-through.
    pub fn decimals(self) -> Option<i32> {
        match self {
            PrecisionTier::Exact => None,
            PrecisionTier::Street => Some(4),
            PrecisionTier::Area => Some(3),
        }
    }

    /// Nominal accuracy radius in meters. For `Exact` this is the floor
    /// applied to the sensor accuracy.
    pub fn nominal_radius_m(self) -> f64 {
        match self {
            PrecisionTier::Exact => EXACT_MIN_RADIUS_M,
            PrecisionTier::Street => 25.0,
            PrecisionTier::Area => 150.0,
        }
    }

    /// Largest radius still considered accurate when this tier is recommended.
    pub fn max_acceptable_radius_m(self) -> f64 {
        match self {
            PrecisionTier::Exact => 10.0,
            PrecisionTier::Street => 50.0,
            PrecisionTier::Area => 200.0,
        }
    }

    pub fn justification(self) -> &'static str {
        match self {
            PrecisionTier::Exact => {
                "Exact location lets responders reach a hazard without searching."
            }
            PrecisionTier::Street => {
                "Street-level location (about 10-25 m) is enough to find the issue while keeping your exact position private."
            }
            PrecisionTier::Area => {
                "Area-level location (about 100-150 m) shows the neighbourhood only."
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PrecisionTier::Exact => "exact",
            PrecisionTier::Street => "street",
            PrecisionTier::Area => "area",
        }
    }
}

impl fmt::Display for PrecisionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported precision tier '{0}'")]
pub struct UnsupportedTier(pub String);

impl FromStr for PrecisionTier {
    type Err = UnsupportedTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(PrecisionTier::Exact),
            "street" => Ok(PrecisionTier::Street),
            "area" => Ok(PrecisionTier::Area),
            // "landmark" is part of the category vocabulary but has no rounding rule.
            _ => Err(UnsupportedTier(s.to_string())),
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Reduce a fix to the requested tier. Idempotent per tier.
pub fn reduce(fix: &LocationFix, tier: PrecisionTier) -> ReducedLocation {
    let (latitude, longitude) = match tier.decimals() {
        None => (fix.latitude, fix.longitude),
        Some(d) => (round_to(fix.latitude, d), round_to(fix.longitude, d)),
    };
    let accuracy_meters = match tier {
        PrecisionTier::Exact => fix.accuracy_meters.max(EXACT_MIN_RADIUS_M),
        _ => tier.nominal_radius_m(),
    };
    ReducedLocation {
        latitude,
        longitude,
        accuracy_meters,
        tier,
        timestamp: fix.timestamp,
    }
}

fn normalize_category(category: &str) -> String {
    category
        .trim()
        .to_ascii_lowercase()
        .replace([' ', '-'], "_")
}

const EXACT_CATEGORIES: &[&str] = &[
    "fire_hazard",
    "electrical_hazard",
    "exposed_wiring",
    "sewage_overflow",
    "sewage_leak",
    "structural_damage",
    "building_collapse",
    "gas_leak",
    "chemical_spill",
    "hazmat",
];

const STREET_CATEGORIES: &[&str] = &[
    "pothole",
    "streetlight",
    "broken_streetlight",
    "traffic_signal",
    "road_damage",
    "garbage",
    "garbage_collection",
    "noise_complaint",
    "illegal_parking",
    "other",
];

/// Precision policy keyed by report category. Unknown categories get `Street`.
pub fn recommended_tier(report_category: &str) -> PrecisionTier {
    let c = normalize_category(report_category);
    if EXACT_CATEGORIES.contains(&c.as_str()) {
        PrecisionTier::Exact
    } else {
        PrecisionTier::Street
    }
}

/// Whether the category appears in either precision table.
pub fn is_known_category(report_category: &str) -> bool {
    let c = normalize_category(report_category);
    EXACT_CATEGORIES.contains(&c.as_str()) || STREET_CATEGORIES.contains(&c.as_str())
}

/// Bucket used only to pick the permission rationale wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportUrgency {
    Urgent,
    Safety,
    General,
}

const URGENT_CATEGORIES: &[&str] = &[
    "fire_hazard",
    "gas_leak",
    "electrical_hazard",
    "building_collapse",
    "chemical_spill",
];

const SAFETY_CATEGORIES: &[&str] = &[
    "structural_damage",
    "sewage_overflow",
    "traffic_signal",
    "road_damage",
    "pothole",
    "broken_streetlight",
];

pub fn urgency_of(report_category: &str) -> ReportUrgency {
    let c = normalize_category(report_category);
    if URGENT_CATEGORIES.contains(&c.as_str()) {
        ReportUrgency::Urgent
    } else if SAFETY_CATEGORIES.contains(&c.as_str()) {
        ReportUrgency::Safety
    } else {
        ReportUrgency::General
    }
}

/// Permission-request rationale shown before asking for foreground location.
pub fn rationale_for(urgency: ReportUrgency) -> &'static str {
    match urgency {
        ReportUrgency::Urgent => {
            "This is an emergency report. Your precise location helps responders reach the hazard quickly."
        }
        ReportUrgency::Safety => {
            "Your location helps the city find and fix this safety issue. Only the precision needed is shared."
        }
        ReportUrgency::General => {
            "Your approximate location helps route this report to the right department."
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationValidation {
    pub is_accurate: bool,
    pub recommended_tier: PrecisionTier,
    pub message: String,
}

/// Annotate a reduced location against the category policy. Never blocks.
pub fn validate(location: &ReducedLocation, report_category: &str) -> LocationValidation {
    let recommended = recommended_tier(report_category);
    let limit = recommended.max_acceptable_radius_m();
    let is_accurate = location.accuracy_meters <= limit;

    let message = if location.tier > recommended {
        format!(
            "Location shared at {} precision; {} precision is recommended for this report type.",
            location.tier, recommended
        )
    } else if !is_accurate {
        format!(
            "Location accuracy is about {:.0} m; within {:.0} m is recommended for this report type.",
            location.accuracy_meters, limit
        )
    } else {
        format!(
            "Location precision ({}, about {:.0} m) is suitable for this report.",
            location.tier, location.accuracy_meters
        )
    };

    LocationValidation {
        is_accurate,
        recommended_tier: recommended,
        message,
    }
}

/// Service bounding box (India mainland + islands), inclusive.
pub const SERVICE_AREA_LAT: (f64, f64) = (6.0, 37.5);
pub const SERVICE_AREA_LON: (f64, f64) = (68.0, 97.5);

/// Sanity filter for coordinates. NaN and out-of-box values are rejected.
pub fn is_within_service_area(latitude: f64, longitude: f64) -> bool {
    (SERVICE_AREA_LAT.0..=SERVICE_AREA_LAT.1).contains(&latitude)
        && (SERVICE_AREA_LON.0..=SERVICE_AREA_LON.1).contains(&longitude)
}
