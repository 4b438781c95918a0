//! Telemetry configuration from environment variables.

use serde::{Deserialize, Serialize};
use std::env;

/// Configuration for scanner logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Service name attached to every event
    pub service_name: String,

    /// Gate or device identifier, useful when several scanners ship logs
    pub device_id: String,

    /// Log level filter (trace, debug, info, warn, error) or full directive
    pub log_level: String,

    /// Whether to enable console output
    pub console_output: bool,

    /// Whether to enable JSON formatted logs
    pub json_logs: bool,

    /// ANSI colours in pretty output
    pub ansi: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "checkin-scanner".to_string(),
            device_id: "default".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            ansi: true,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CHECKIN_SERVICE_NAME`: Service name (default: checkin-scanner)
    /// - `CHECKIN_DEVICE_ID`: Device identifier (default: default)
    /// - `CHECKIN_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `CHECKIN_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `CHECKIN_JSON_LOGS`: Enable JSON logs (default: false, true in containers)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("CHECKIN_SERVICE_NAME")
                .unwrap_or_else(|_| "checkin-scanner".to_string()),

            device_id: env::var("CHECKIN_DEVICE_ID").unwrap_or_else(|_| "default".to_string()),

            log_level: env::var("CHECKIN_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            console_output: env::var("CHECKIN_CONSOLE_OUTPUT")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),

            json_logs: env::var("CHECKIN_JSON_LOGS")
                .map(|v| parse_flag(&v))
                .unwrap_or(is_container),

            ansi: !is_container,
        }
    }

    /// Configuration for one named scanner device.
    pub fn for_device(device_id: &str) -> Self {
        let mut config = Self::from_env();
        config.device_id = device_id.to_string();
        config
    }

    /// Service name including the device, e.g. `checkin-scanner@north-gate`.
    pub fn full_service_name(&self) -> String {
        if self.device_id == "default" {
            self.service_name.clone()
        } else {
            format!("{}@{}", self.service_name, self.device_id)
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
