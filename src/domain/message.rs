use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{EmailAddress, ListingId, MessageText};

/// A buyer-to-seller inquiry about one listing.
///
/// Messages are write-only from the application's point of view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewMessage {
    pub listing_id: ListingId,
    pub message: MessageText,
    pub sender_email: EmailAddress,
    /// Copied from the listing at send time.
    pub seller_email: EmailAddress,
    pub sent_at: DateTime<Utc>,
}
