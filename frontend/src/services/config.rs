//! Build-time configuration for the browser app.
//!
//! Values are baked in when the bundle is compiled (`RIDEWAVE_*` environment
//! variables); a static bundle has no runtime environment to read from.

use log::LevelFilter;
use std::str::FromStr;

use crate::state::ride_list::RefreshPolicy;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the ride backend, without trailing slash
    pub backend_url: String,
    /// How overlapping listing refreshes are reconciled
    pub refresh_policy: RefreshPolicy,
    /// Whether the listing reloads after a ride is posted
    pub refresh_on_create: bool,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("RIDEWAVE_BACKEND_URL"),
            option_env!("RIDEWAVE_REFRESH_POLICY"),
            option_env!("RIDEWAVE_REFRESH_ON_CREATE"),
            option_env!("RIDEWAVE_LOG"),
        )
    }

    /// Builds a config from raw values; missing or unparseable values fall
    /// back to the defaults.
    pub fn from_values(
        backend_url: Option<&str>,
        refresh_policy: Option<&str>,
        refresh_on_create: Option<&str>,
        log_level: Option<&str>,
    ) -> Self {
        let defaults = Self::default();

        let backend_url = backend_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.backend_url);

        Self {
            backend_url,
            refresh_policy: parse_or(refresh_policy, defaults.refresh_policy),
            refresh_on_create: refresh_on_create
                .and_then(parse_flag)
                .unwrap_or(defaults.refresh_on_create),
            log_level: parse_or(log_level, defaults.log_level),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            refresh_policy: RefreshPolicy::default(),
            refresh_on_create: true,
            log_level: LevelFilter::Info,
        }
    }
}

fn parse_or<T: FromStr>(raw: Option<&str>, fallback: T) -> T {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(fallback)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
