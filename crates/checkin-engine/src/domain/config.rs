//! Scanner configuration with validation.
//!
//! Values come from (in increasing priority) built-in defaults, an optional
//! JSON file, `CHECKIN_*` environment variables and finally CLI flags.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default scan-log cap for the session ledger.
pub const MAX_SESSION_SCAN_LOGS: usize = 900;

/// Default auto-dismiss countdown for the result dialog.
pub const RESULT_COUNTDOWN_SECS: u32 = 30;

/// Main scanner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Base URL of the check-in REST API
    pub base_url: String,
    /// Operator identity sent as `validatedBy`
    pub validated_by: String,
    /// Gate or venue location sent with each validation
    pub location: String,
    /// Sessions older than this are discarded on restore
    pub session_hours: u64,
    /// Cap for the session scan-log ledger
    pub max_session_scan_logs: usize,
    /// Capacity of the activity feed
    pub activity_feed_capacity: usize,
    /// Seconds before the result dialog closes by itself
    pub result_countdown_secs: u32,
    /// Interval between server baseline polls
    #[serde(with = "humantime_serde")]
    pub baseline_poll_interval: Duration,
    /// Page size for the checked-in tickets overlay
    pub tickets_page_limit: u32,
    /// Total request timeout
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// TCP connect timeout
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    /// Directory for persisted session records
    pub store_dir: PathBuf,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000/api".to_string(),
            validated_by: "scanner".to_string(),
            location: "main-gate".to_string(),
            session_hours: 12,
            max_session_scan_logs: MAX_SESSION_SCAN_LOGS,
            activity_feed_capacity: 50,
            result_countdown_secs: RESULT_COUNTDOWN_SECS,
            baseline_poll_interval: Duration::from_secs(30),
            tickets_page_limit: 20,
            request_timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(3),
            store_dir: PathBuf::from(".checkin-scanner"),
        }
    }
}

impl ScannerConfig {
    /// Parse a JSON configuration document. Missing fields take defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply `CHECKIN_*` environment overrides.
    ///
    /// - `CHECKIN_BASE_URL`, `CHECKIN_VALIDATED_BY`, `CHECKIN_LOCATION`
    /// - `CHECKIN_SESSION_HOURS`, `CHECKIN_MAX_SESSION_SCAN_LOGS`
    /// - `CHECKIN_POLL_INTERVAL` (e.g. `30s`, `2m`)
    /// - `CHECKIN_STORE_DIR`
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("CHECKIN_BASE_URL") {
            self.base_url = v;
        }
        if let Ok(v) = env::var("CHECKIN_VALIDATED_BY") {
            self.validated_by = v;
        }
        if let Ok(v) = env::var("CHECKIN_LOCATION") {
            self.location = v;
        }
        if let Some(v) = env::var("CHECKIN_SESSION_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.session_hours = v;
        }
        if let Some(v) = env::var("CHECKIN_MAX_SESSION_SCAN_LOGS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.max_session_scan_logs = v;
        }
        if let Some(v) = env::var("CHECKIN_POLL_INTERVAL")
            .ok()
            .and_then(|v| humantime_serde::parse_duration(&v).ok())
        {
            self.baseline_poll_interval = v;
        }
        if let Ok(v) = env::var("CHECKIN_STORE_DIR") {
            self.store_dir = PathBuf::from(v);
        }
        self
    }

    /// Defaults overridden by the environment.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url cannot be empty".into()));
        }
        if self.session_hours == 0 {
            return Err(ConfigError::InvalidLimit("session_hours cannot be 0".into()));
        }
        // session ages are compared in epoch milliseconds
        if self.session_hours.checked_mul(3_600_000).is_none() {
            return Err(ConfigError::InvalidLimit("session_hours too large".into()));
        }
        if self.max_session_scan_logs == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_session_scan_logs cannot be 0".into(),
            ));
        }
        if self.activity_feed_capacity == 0 {
            return Err(ConfigError::InvalidLimit(
                "activity_feed_capacity cannot be 0".into(),
            ));
        }
        if self.tickets_page_limit == 0 {
            return Err(ConfigError::InvalidLimit(
                "tickets_page_limit cannot be 0".into(),
            ));
        }
        if self.result_countdown_secs == 0 {
            return Err(ConfigError::InvalidTimeout(
                "result_countdown_secs cannot be 0".into(),
            ));
        }
        if self.baseline_poll_interval.is_zero() || self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "poll interval and request timeout must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Session-hours threshold as a duration.
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_hours.saturating_mul(3600))
    }

    /// Base URL without a trailing slash.
    pub fn api_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Configuration errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Invalid size or count limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    /// Invalid timeout value
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    /// Malformed configuration document
    #[error("failed to parse configuration: {0}")]
    Parse(String),
    /// General configuration error
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Durations as `"30s"`, `"500ms"`, `"2m"`, `"1h"` or plain seconds.
mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if duration.subsec_millis() != 0 {
            serializer.serialize_str(&format!("{}ms", duration.as_millis()))
        } else {
            serializer.serialize_str(&format!("{}s", duration.as_secs()))
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_duration(&s).map_err(serde::de::Error::custom)
    }

    pub fn parse_duration(s: &str) -> Result<Duration, &'static str> {
        let scaled = |n: u64, unit: u64| {
            n.checked_mul(unit)
                .map(Duration::from_secs)
                .ok_or("duration too large")
        };
        let s = s.trim();
        if let Some(ms) = s.strip_suffix("ms") {
            ms.trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| "invalid milliseconds")
        } else if let Some(secs) = s.strip_suffix('s') {
            secs.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| "invalid seconds")
        } else if let Some(mins) = s.strip_suffix('m') {
            mins.trim()
                .parse::<u64>()
                .map_err(|_| "invalid minutes")
                .and_then(|m| scaled(m, 60))
        } else if let Some(hours) = s.strip_suffix('h') {
            hours
                .trim()
                .parse::<u64>()
                .map_err(|_| "invalid hours")
                .and_then(|h| scaled(h, 3600))
        } else {
            s.parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| "invalid duration format")
        }
    }
}
