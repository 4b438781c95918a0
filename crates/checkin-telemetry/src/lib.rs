//! # Check-in Telemetry
//!
//! Logging setup for the check-in scanner.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use checkin_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_telemetry(TelemetryConfig::from_env())?;
//!     // scanner runs here
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CHECKIN_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `CHECKIN_JSON_LOGS` | `false` | JSON output instead of pretty |
//! | `CHECKIN_CONSOLE_OUTPUT` | `true` | Emit events at all |
//! | `CHECKIN_SERVICE_NAME` | `checkin-scanner` | Service name |
//! | `CHECKIN_DEVICE_ID` | `default` | Device identifier |

mod config;
mod logging;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::{build_filter, TracingGuard};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Install logging for the process.
///
/// Returns a guard to hold for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let tracing = tracing_setup::init_tracing(&config)?;
    Ok(TelemetryGuard { _tracing: tracing })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _tracing: TracingGuard,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = self._tracing.service(), "Shutting down telemetry...");
    }
}

/// Convenience macro for creating a span with component context.
///
/// ```rust,ignore
/// let _span = checkin_telemetry::scanner_span!("validate", submission_id = 7).entered();
/// ```
#[macro_export]
macro_rules! scanner_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "checkin-scanner");
    }

    #[test]
    fn test_span_macro() {
        let span = scanner_span!("validate", submission_id = 7u64);
        let _entered = span.entered();
    }
}
