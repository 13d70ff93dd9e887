//! Operator notifications.
//!
//! Delivery is advisory: failures are logged per recipient and never reach
//! the caller.

use std::time::Duration;

use futures_util::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::LadderError;
use crate::exchange::BoxFuture;

/// Default Telegram Bot API endpoint.
pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Fire-and-forget broadcast of a text message.
pub trait Notifier: Send + Sync {
    fn notify<'a>(&'a self, text: &'a str) -> BoxFuture<'a, ()>;
}

impl<T: Notifier + ?Sized> Notifier for Box<T> {
    fn notify<'a>(&'a self, text: &'a str) -> BoxFuture<'a, ()> {
        (**self).notify(text)
    }
}

/// Settings for [`TelegramNotifier`].
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub api_base: String,
    pub bot_token: String,
    /// Chat ids that receive every message.
    pub recipients: Vec<String>,
    pub timeout: Duration,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

/// Sends each message to every configured chat via the Bot API.
pub struct TelegramNotifier {
    client: reqwest::Client,
    url: String,
    recipients: Vec<String>,
}

impl TelegramNotifier {
    /// # Errors
    ///
    /// Returns [`LadderError::Http`] if the HTTP client cannot be built.
    pub fn new(config: TelegramConfig) -> Result<Self, LadderError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        let url = format!(
            "{}/bot{}/sendMessage",
            config.api_base.trim_end_matches('/'),
            config.bot_token
        );
        Ok(Self {
            client,
            url,
            recipients: config
                .recipients
                .iter()
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .collect(),
        })
    }

    async fn send_to(&self, chat_id: &str, text: &str) -> Result<(), LadderError> {
        let resp = self
            .client
            .post(&self.url)
            .json(&SendMessage {
                chat_id,
                text,
                parse_mode: "Markdown",
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(LadderError::NotifyRejected { status, body });
        }
        Ok(())
    }

    async fn broadcast(&self, text: &str) {
        let sends = self.recipients.iter().map(|chat_id| async move {
            match self.send_to(chat_id, text).await {
                Ok(()) => debug!(chat_id = %chat_id, "notification delivered"),
                Err(e) => warn!(chat_id = %chat_id, error = %e, "telegram error"),
            }
        });
        join_all(sends).await;
    }
}

impl Notifier for TelegramNotifier {
    fn notify<'a>(&'a self, text: &'a str) -> BoxFuture<'a, ()> {
        Box::pin(self.broadcast(text))
    }
}

/// Writes notifications to the log only (messaging disabled).
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify<'a>(&'a self, text: &'a str) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            info!(text, "NOTIFY");
        })
    }
}
