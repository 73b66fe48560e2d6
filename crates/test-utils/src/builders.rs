#![allow(dead_code)]

use runwatch::config::{ConfigFile, RawConfigFile};

/// Builder for `ConfigFile` to simplify test setup.
///
/// Starts from a valid config (`url` and `channel` set) so tests only spell
/// out what they care about.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                url: "https://hooks.example.invalid/services/T000/B000".to_string(),
                channel: "ops".to_string(),
                ..RawConfigFile::default()
            },
        }
    }

    pub fn url(mut self, url: &str) -> Self {
        self.config.url = url.to_string();
        self
    }

    pub fn channel(mut self, channel: &str) -> Self {
        self.config.channel = channel.to_string();
        self
    }

    pub fn emoji(mut self, emoji: &str) -> Self {
        self.config.emoji = Some(emoji.to_string());
        self
    }

    pub fn mention(mut self, mention: &str) -> Self {
        self.config.mentions.push(mention.to_string());
        self
    }

    pub fn interval(mut self, secs: u64) -> Self {
        self.config.interval = secs;
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
