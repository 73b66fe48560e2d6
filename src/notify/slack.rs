// src/notify/slack.rs

//! Slack incoming-webhook client.

use std::future::Future;
use std::pin::Pin;

use serde::Serialize;
use tracing::debug;

use crate::config::ConfigFile;
use crate::errors::{Result, RunwatchError};

use super::format::{escape_message, mention_text, normalize_channel};
use super::{Notification, NotificationSink};

/// Username the webhook posts as.
pub const USERNAME: &str = "runwatch";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Payload {
    pub username: String,
    pub icon_emoji: String,
    pub channel: String,
    pub text: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Attachment {
    pub color: String,
    pub title: String,
    pub text: String,
    pub mrkdwn_in: Vec<String>,
}

/// Posts notifications to one webhook / channel.
#[derive(Debug, Clone)]
pub struct SlackWebhook {
    client: reqwest::Client,
    url: String,
    channel: String,
    icon_emoji: String,
    mentions: Vec<String>,
}

impl SlackWebhook {
    pub fn new(
        url: impl Into<String>,
        channel: &str,
        icon_emoji: impl Into<String>,
        mentions: Vec<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            channel: normalize_channel(channel),
            icon_emoji: icon_emoji.into(),
            mentions,
        }
    }

    pub fn from_config(cfg: &ConfigFile) -> Self {
        Self::new(
            cfg.url.clone(),
            &cfg.channel,
            cfg.emoji.clone(),
            cfg.mentions.clone(),
        )
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// JSON body for `notification`.
    pub fn payload(&self, notification: &Notification) -> Payload {
        Payload {
            username: USERNAME.to_string(),
            icon_emoji: self.icon_emoji.clone(),
            channel: self.channel.clone(),
            text: mention_text(&self.mentions, notification.mention),
            attachments: vec![Attachment {
                color: notification.color.hex().to_string(),
                title: notification.title.clone(),
                text: escape_message(&notification.body),
                mrkdwn_in: vec!["text".to_string()],
            }],
        }
    }
}

impl NotificationSink for SlackWebhook {
    fn send(
        &self,
        notification: Notification,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let payload = self.payload(&notification);

        Box::pin(async move {
            let response = self.client.post(&self.url).json(&payload).send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(RunwatchError::WebhookStatus(status.as_u16()));
            }

            debug!(channel = %self.channel, %status, "notification delivered");
            Ok(())
        })
    }
}
