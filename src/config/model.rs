// src/config/model.rs

use serde::Deserialize;

/// Icon used when the config does not set `emoji`.
pub const DEFAULT_EMOJI: &str = ":sunglasses:";

/// Heartbeat interval (seconds) used when the config does not set `interval`.
pub const DEFAULT_INTERVAL_SECS: u64 = 600;

/// Configuration exactly as read from a TOML file.
///
/// ```toml
/// url = "https://hooks.slack.com/services/T000/B000/XXXX"
/// channel = "ops"
/// emoji = ":robot_face:"
/// mentions = ["<@U012345>"]
/// interval = 300
/// ```
///
/// Nothing is validated here; see [`ConfigFile`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Incoming-webhook endpoint notifications are posted to.
    #[serde(default)]
    pub url: String,

    /// Channel the webhook posts into (with or without a leading `#`).
    #[serde(default)]
    pub channel: String,

    /// Optional icon emoji for the posting user.
    #[serde(default)]
    pub emoji: Option<String>,

    /// Users/groups to mention when the run fails.
    #[serde(default)]
    pub mentions: Vec<String>,

    /// Default heartbeat interval in seconds. `0` disables heartbeats.
    #[serde(default = "default_interval")]
    pub interval: u64,
}

fn default_interval() -> u64 {
    DEFAULT_INTERVAL_SECS
}

impl Default for RawConfigFile {
    fn default() -> Self {
        Self {
            url: String::new(),
            channel: String::new(),
            emoji: None,
            mentions: Vec::new(),
            interval: default_interval(),
        }
    }
}

/// Validated configuration.
///
/// Only constructible through `TryFrom<RawConfigFile>`, so `url` and
/// `channel` are always non-empty.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub url: String,
    pub channel: String,
    pub emoji: String,
    pub mentions: Vec<String>,
    pub interval: u64,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            url: raw.url.trim().to_string(),
            channel: raw.channel.trim().to_string(),
            emoji: raw
                .emoji
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_EMOJI.to_string()),
            mentions: raw.mentions,
            interval: raw.interval,
        }
    }

    /// Effective heartbeat interval given the CLI override.
    pub fn effective_interval(&self, cli_override: u64) -> u64 {
        resolve_interval(cli_override, self.interval)
    }
}

/// A non-zero CLI override wins; `0` falls back to the config default.
pub fn resolve_interval(cli_override: u64, config_default: u64) -> u64 {
    if cli_override == 0 {
        config_default
    } else {
        cli_override
    }
}
