use serde::Serialize;

use crate::domain::message::NewMessage as DomainNewMessage;

/// Insertable row of the `messages` table.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewMessage {
    pub listing_id: String,
    pub message: String,
    pub seller_email: String,
    pub sender_email: String,
    /// RFC 3339 timestamp.
    pub sent_at: String,
}

impl From<DomainNewMessage> for NewMessage {
    fn from(message: DomainNewMessage) -> Self {
        Self {
            listing_id: message.listing_id.into_inner(),
            message: message.message.into_inner(),
            seller_email: message.seller_email.into_inner(),
            sender_email: message.sender_email.into_inner(),
            sent_at: message.sent_at.to_rfc3339(),
        }
    }
}
