//! JSON file config store.
//!
//! Implements [`ConfigPort`] over a single JSON file.  Fields missing from
//! the file take their defaults, so a file only needs to list what differs
//! from the stock robot.  Both directions validate.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::RobotConfig;

pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigPort for JsonConfigStore {
    fn load(&self) -> Result<RobotConfig, ConfigError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(ConfigError::NotFound),
            Err(e) => {
                warn!("ConfigStore: reading {} failed: {}", self.path.display(), e);
                return Err(ConfigError::IoError);
            }
        };
        let cfg: RobotConfig = serde_json::from_str(&text).map_err(|e| {
            warn!("ConfigStore: {} is not valid config: {}", self.path.display(), e);
            ConfigError::Corrupted
        })?;
        cfg.validate()?;
        info!(
            "ConfigStore: loaded {} (profile '{}')",
            self.path.display(),
            cfg.profile.name
        );
        Ok(cfg)
    }

    fn save(&self, config: &RobotConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let text = serde_json::to_string_pretty(config).map_err(|_| ConfigError::IoError)?;
        fs::write(&self.path, text).map_err(|e| {
            warn!("ConfigStore: writing {} failed: {}", self.path.display(), e);
            ConfigError::IoError
        })?;
        info!("ConfigStore: saved {}", self.path.display());
        Ok(())
    }
}
