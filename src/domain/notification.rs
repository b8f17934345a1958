use serde::{Deserialize, Serialize};

use crate::domain::types::{EmailAddress, MessageText};

pub const NEW_MESSAGE_SUBJECT: &str = "You have a new message on Marketplace";

const ANONYMOUS_SENDER: &str = "an interested buyer";

/// Payload accepted by the notification endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailNotification {
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl EmailNotification {
    /// Builds the seller notification for a freshly sent message.
    pub fn new_message(
        seller_email: &EmailAddress,
        sender_email: Option<&EmailAddress>,
        message: &MessageText,
    ) -> Self {
        let sender = sender_email
            .map(EmailAddress::as_str)
            .unwrap_or(ANONYMOUS_SENDER);
        Self {
            to: seller_email.to_string(),
            subject: NEW_MESSAGE_SUBJECT.to_string(),
            text: format!(
                "You received a new message about your listing from {sender}:\n\n{message}"
            ),
        }
    }
}
