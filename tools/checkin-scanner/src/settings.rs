//! Scanner configuration assembled from file, environment and flags.
//!
//! Precedence, lowest to highest: defaults, JSON file, `CHECKIN_*`
//! environment, command-line flags.

use std::path::PathBuf;

use checkin_engine::{ConfigError, ScannerConfig};

/// Command-line overrides. `None` leaves the lower layer in place.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub validated_by: Option<String>,
    pub location: Option<String>,
    pub store_dir: Option<PathBuf>,
}

impl Overrides {
    pub fn apply(self, mut config: ScannerConfig) -> ScannerConfig {
        if let Some(v) = self.base_url {
            config.base_url = v;
        }
        if let Some(v) = self.validated_by {
            config.validated_by = v;
        }
        if let Some(v) = self.location {
            config.location = v;
        }
        if let Some(v) = self.store_dir {
            config.store_dir = v;
        }
        config
    }
}

/// Build and validate the effective configuration.
pub fn resolve(file_contents: Option<&str>, overrides: Overrides) -> Result<ScannerConfig, ConfigError> {
    let base = match file_contents {
        Some(raw) => ScannerConfig::from_json(raw)?,
        None => ScannerConfig::default(),
    };
    let config = overrides.apply(base.with_env_overrides());
    config.validate()?;
    Ok(config)
}
