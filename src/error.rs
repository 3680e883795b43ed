// src/error.rs
//! Error taxonomy for the two acquisition paths.
//!
//! Location errors are downgraded to "unknown location" at the aggregator
//! boundary. Fetch errors are caught per tier and only advance the fallback
//! chain; neither ever reaches presentation code.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("foreground location permission was not granted")]
    PermissionDenied,

    #[error("location services are disabled on this device")]
    ServiceDisabled,

    #[error("no location fix within {waited_secs}s")]
    Timeout { waited_secs: u64 },
}

impl LocationError {
    /// Remediation hint the caller surfaces next to the failure.
    pub fn remediation(&self) -> &'static str {
        match self {
            LocationError::PermissionDenied => {
                "Allow location access for this app in system settings."
            }
            LocationError::ServiceDisabled => "Turn on location services in system settings.",
            LocationError::Timeout { .. } => {
                "Move to an open area or check location settings, then try again."
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("upstream HTTP error (status {status})")]
    UpstreamHttp { status: u16 },

    #[error("upstream API error: {message}")]
    UpstreamApi { message: String },

    #[error("upstream returned no usable articles")]
    EmptyResult,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed upstream response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

impl FetchError {
    /// Short label used as a metrics/log field.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::UpstreamHttp { .. } => "http",
            FetchError::UpstreamApi { .. } => "api",
            FetchError::EmptyResult => "empty",
            FetchError::Transport(_) => "transport",
            FetchError::Parse(_) => "parse",
        }
    }
}
