// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, RunwatchError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::RunwatchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw))
    }
}

/// Check the semantic rules `serde` cannot express.
pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_url(cfg)?;
    ensure_channel(cfg)?;
    ensure_mentions(cfg)?;
    Ok(())
}

fn ensure_url(cfg: &RawConfigFile) -> Result<()> {
    if cfg.url.trim().is_empty() {
        return Err(RunwatchError::ConfigError(
            "`url` is required and must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn ensure_channel(cfg: &RawConfigFile) -> Result<()> {
    if cfg.channel.trim().is_empty() {
        return Err(RunwatchError::ConfigError(
            "`channel` is required and must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn ensure_mentions(cfg: &RawConfigFile) -> Result<()> {
    if let Some(pos) = cfg.mentions.iter().position(|m| m.trim().is_empty()) {
        return Err(RunwatchError::ConfigError(format!(
            "`mentions` entry {} is empty",
            pos
        )));
    }
    Ok(())
}
