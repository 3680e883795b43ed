// src/location/geo.rs
//! GeoSource: one exact fix from the platform location API, with the failure
//! classified as `ServiceDisabled`, `PermissionDenied` or `Timeout`.
//!
//! The platform itself (permission dialogs, sensor reads) sits behind
//! `LocationPlatform` so servers and tests can plug their own backend.

use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::StaticFixConfig;
use crate::error::LocationError;
use crate::location::types::LocationFix;

/// Upper bound on waiting for a fix.
pub const FIX_TIMEOUT: Duration = Duration::from_secs(15);
/// Cached platform fixes younger than this are accepted.
pub const FIX_MAX_AGE: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub maximum_age: Duration,
    pub timeout: Duration,
}

/// Device location API as seen by the core.
#[async_trait]
pub trait LocationPlatform: Send + Sync {
    async fn services_enabled(&self) -> bool;
    async fn permission_status(&self) -> PermissionStatus;
    /// Show the foreground permission request and return the outcome.
    async fn request_permission(&self) -> PermissionStatus;
    async fn current_position(&self, opts: PositionOptions) -> Result<LocationFix, LocationError>;
}

/// Anything the aggregator can ask for a fix.
#[async_trait]
pub trait Locator: Send + Sync {
    async fn get_exact_fix(&self) -> Result<LocationFix, LocationError>;
}

pub struct GeoSource<P: LocationPlatform> {
    platform: P,
    timeout: Duration,
    maximum_age: Duration,
}

impl<P: LocationPlatform> GeoSource<P> {
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            timeout: FIX_TIMEOUT,
            maximum_age: FIX_MAX_AGE,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    async fn ensure_permission(&self) -> Result<(), LocationError> {
        if self.platform.permission_status().await == PermissionStatus::Granted {
            return Ok(());
        }
        // Exactly one request; no retry loop.
        match self.platform.request_permission().await {
            PermissionStatus::Granted => Ok(()),
            _ => Err(LocationError::PermissionDenied),
        }
    }
}

#[async_trait]
impl<P: LocationPlatform> Locator for GeoSource<P> {
    async fn get_exact_fix(&self) -> Result<LocationFix, LocationError> {
        if !self.platform.services_enabled().await {
            warn!(target: "location", "location services disabled");
            return Err(LocationError::ServiceDisabled);
        }
        if let Err(e) = self.ensure_permission().await {
            warn!(target: "location", "foreground permission not granted");
            return Err(e);
        }

        let opts = PositionOptions {
            high_accuracy: true,
            maximum_age: self.maximum_age,
            timeout: self.timeout,
        };
        match tokio::time::timeout(self.timeout, self.platform.current_position(opts)).await {
            Ok(Ok(fix)) => {
                debug!(target: "location", accuracy_m = fix.accuracy_meters, "fix acquired");
                Ok(fix)
            }
            Ok(Err(e)) => Err(e),
            Err(_) => {
                warn!(target: "location", timeout_s = self.timeout.as_secs(), "fix timed out");
                Err(LocationError::Timeout {
                    waited_secs: self.timeout.as_secs(),
                })
            }
        }
    }
}

/// Platform backed by a configured position. With no position configured the
/// service reports itself disabled.
#[derive(Debug, Clone, Default)]
pub struct StaticPlatform {
    fix: Option<StaticFixConfig>,
}

impl StaticPlatform {
    pub fn new(fix: Option<StaticFixConfig>) -> Self {
        Self { fix }
    }
}

#[async_trait]
impl LocationPlatform for StaticPlatform {
    async fn services_enabled(&self) -> bool {
        self.fix.is_some()
    }

    async fn permission_status(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn current_position(&self, _opts: PositionOptions) -> Result<LocationFix, LocationError> {
        let cfg = self.fix.ok_or(LocationError::ServiceDisabled)?;
        Ok(LocationFix {
            latitude: cfg.latitude,
            longitude: cfg.longitude,
            accuracy_meters: cfg.accuracy_meters,
            timestamp: Utc::now(),
            altitude: None,
            heading: None,
            speed: None,
        })
    }
}
