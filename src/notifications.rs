//! Outbound email notifications.
//!
//! Notifications are handed to an HTTP endpoint that performs the actual
//! delivery; this module only knows how to POST the payload.

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::domain::notification::EmailNotification;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("notification request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("notification endpoint responded with status {0}")]
    Status(u16),
}

/// Sends email notifications.
#[async_trait]
pub trait Notifier {
    async fn send_email(&self, notification: &EmailNotification) -> Result<(), NotificationError>;
}

/// [`Notifier`] posting JSON `{to, subject, text}` to a configured endpoint.
#[derive(Clone)]
pub struct HttpNotifier {
    client: Client,
    endpoint: String,
}

impl HttpNotifier {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn send_email(&self, notification: &EmailNotification) -> Result<(), NotificationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(notification)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotificationError::Status(status.as_u16()));
        }
        Ok(())
    }
}
