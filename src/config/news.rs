// src/config/news.rs
//! Runtime configuration for the news pipeline and location defaults.
//!
//! Lookup order:
//! 1) $NEWSFEED_CONFIG_PATH (must exist when set)
//! 2) config/newsfeed.toml
//! 3) built-in defaults
//!
//! `NEWS_API_KEY` and `NEWS_API_BASE_URL` from the environment (or `.env`)
//! override whatever the file says.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_PATH: &str = "NEWSFEED_CONFIG_PATH";
pub const ENV_API_KEY: &str = "NEWS_API_KEY";
pub const ENV_BASE_URL: &str = "NEWS_API_BASE_URL";
pub const DEFAULT_CONFIG_PATH: &str = "config/newsfeed.toml";

fn default_base_url() -> String {
    "https://newsapi.org".to_string()
}
fn default_country() -> String {
    "in".to_string()
}
fn default_page_size() -> u32 {
    20
}
fn default_max_articles() -> usize {
    15
}
fn default_cache_ttl_secs() -> u64 {
    30 * 60
}
fn default_http_timeout_secs() -> u64 {
    10
}
fn default_civic_query() -> String {
    [
        "infrastructure",
        "municipal",
        "hospital",
        "health",
        "school",
        "education",
        "traffic",
        "transport",
        "metro",
        "water supply",
        "electricity",
    ]
    .iter()
    .map(|t| {
        if t.contains(' ') {
            format!("\"{t}\"")
        } else {
            t.to_string()
        }
    })
    .collect::<Vec<_>>()
    .join(" OR ")
}
fn default_fallbacks() -> Vec<FallbackSpec> {
    vec![
        FallbackSpec::Regional {
            name: "regional".into(),
            query: "India".into(),
        },
        FallbackSpec::Keyword {
            name: "general".into(),
            query: "news".into(),
        },
        FallbackSpec::Keyword {
            name: "topic".into(),
            query: "technology".into(),
        },
        FallbackSpec::Headlines {
            name: "headlines-us".into(),
            country: "us".into(),
        },
    ]
}
fn default_region_label() -> String {
    "India".to_string()
}
fn default_unknown_location_label() -> String {
    "Unknown location".to_string()
}

/// One generic fallback stage, in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FallbackSpec {
    /// `everything?q=<query>`
    Keyword { name: String, query: String },
    /// `everything?q=<hint or query>`; the caller's location hint wins when present.
    Regional { name: String, query: String },
    /// `top-headlines?country=<country>`
    Headlines { name: String, country: String },
}

impl FallbackSpec {
    pub fn name(&self) -> &str {
        match self {
            FallbackSpec::Keyword { name, .. }
            | FallbackSpec::Regional { name, .. }
            | FallbackSpec::Headlines { name, .. } => name,
        }
    }
}

/// Fixed device position for deployments without a live location sensor.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct StaticFixConfig {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_static_accuracy")]
    pub accuracy_meters: f64,
}

fn default_static_accuracy() -> f64 {
    50.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    /// Country for the primary top-headlines query.
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Articles kept per successful tier after filtering.
    #[serde(default = "default_max_articles")]
    pub max_articles: usize,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
    #[serde(default = "default_civic_query")]
    pub civic_query: String,
    #[serde(default = "default_fallbacks")]
    pub fallbacks: Vec<FallbackSpec>,
    /// Label reported when the device fix falls inside the service area.
    #[serde(default = "default_region_label")]
    pub region_label: String,
    #[serde(default = "default_unknown_location_label")]
    pub unknown_location_label: String,
    #[serde(default)]
    pub device_fix: Option<StaticFixConfig>,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            country: default_country(),
            page_size: default_page_size(),
            max_articles: default_max_articles(),
            cache_ttl_secs: default_cache_ttl_secs(),
            http_timeout_secs: default_http_timeout_secs(),
            civic_query: default_civic_query(),
            fallbacks: default_fallbacks(),
            region_label: default_region_label(),
            unknown_location_label: default_unknown_location_label(),
            device_fix: None,
        }
    }
}

impl NewsConfig {
    /// Parse a TOML document, then sanitize ranges.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: NewsConfig = toml::from_str(s).context("parsing newsfeed config")?;
        Ok(cfg.sanitized())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading newsfeed config from {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Resolve the config file by env var + fallbacks, then apply env overrides.
    pub fn load_default() -> Result<Self> {
        let base = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from(&pb)?
        } else {
            let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default_p.exists() {
                Self::load_from(&default_p)?
            } else {
                Self::default()
            }
        };
        Ok(base.with_env_overrides())
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var(ENV_API_KEY) {
            if !key.trim().is_empty() {
                self.api_key = key.trim().to_string();
            }
        }
        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            if !url.trim().is_empty() {
                self.base_url = url.trim().to_string();
            }
        }
        self
    }

    fn sanitized(mut self) -> Self {
        self.base_url = self.base_url.trim_end_matches('/').to_string();
        self.page_size = self.page_size.clamp(1, 100);
        if self.max_articles == 0 {
            self.max_articles = default_max_articles();
        }
        if self.http_timeout_secs == 0 {
            self.http_timeout_secs = default_http_timeout_secs();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs};

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = NewsConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.country, "in");
        assert_eq!(cfg.max_articles, 15);
        assert_eq!(cfg.cache_ttl_secs, 1800);
        assert_eq!(cfg.fallbacks.len(), 4);
        assert!(cfg.civic_query.contains(" OR "));
        assert!(cfg.civic_query.contains("\"water supply\""));
    }

    #[test]
    fn fallbacks_parse_in_order_and_ranges_are_clamped() {
        let toml = r#"
            base_url = "http://localhost:9000/"
            page_size = 500
            max_articles = 0

            [[fallbacks]]
            kind = "headlines"
            name = "gb"
            country = "gb"

            [[fallbacks]]
            kind = "keyword"
            name = "city"
            query = "Delhi"
        "#;
        let cfg = NewsConfig::from_toml_str(toml).unwrap();
        assert_eq!(cfg.base_url, "http://localhost:9000");
        assert_eq!(cfg.page_size, 100);
        assert_eq!(cfg.max_articles, 15);
        let names: Vec<&str> = cfg.fallbacks.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["gb", "city"]);
    }

    #[test]
    fn device_fix_accuracy_has_default() {
        let toml = r#"
            [device_fix]
            latitude = 28.6
            longitude = 77.2
        "#;
        let cfg = NewsConfig::from_toml_str(toml).unwrap();
        let fix = cfg.device_fix.unwrap();
        assert_eq!(fix.accuracy_meters, 50.0);
    }

    #[serial_test::serial]
    #[test]
    fn default_uses_env_path_then_overrides() {
        let old = env::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        env::set_current_dir(tmp.path()).unwrap();

        env::remove_var(ENV_CONFIG_PATH);
        env::remove_var(ENV_API_KEY);
        env::remove_var(ENV_BASE_URL);

        // No file in the temp CWD -> defaults
        let cfg = NewsConfig::load_default().unwrap();
        assert_eq!(cfg.country, "in");
        assert!(cfg.api_key.is_empty());

        // Env path takes precedence; key override applies on top
        let p = tmp.path().join("custom.toml");
        fs::write(&p, "country = \"gb\"\napi_key = \"from-file\"").unwrap();
        env::set_var(ENV_CONFIG_PATH, p.display().to_string());
        env::set_var(ENV_API_KEY, "from-env");
        let cfg = NewsConfig::load_default().unwrap();
        assert_eq!(cfg.country, "gb");
        assert_eq!(cfg.api_key, "from-env");

        // Missing env path is an error
        env::set_var(ENV_CONFIG_PATH, tmp.path().join("nope.toml"));
        assert!(NewsConfig::load_default().is_err());

        env::remove_var(ENV_CONFIG_PATH);
        env::remove_var(ENV_API_KEY);
        env::set_current_dir(&old).unwrap();
    }
}
