use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::types::{
    EmailAddress, ImageUrl, ListingDescription, ListingId, ListingLocation, ListingPrice,
    ListingTitle,
};

/// A for-sale item as stored by the hosted backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub id: ListingId,
    pub title: ListingTitle,
    pub description: Option<ListingDescription>,
    pub price: ListingPrice,
    pub category: Category,
    pub seller_email: EmailAddress,
    pub image_url: Option<ImageUrl>,
    pub location: Option<ListingLocation>,
    /// Assigned by the store on insert.
    pub created_at: DateTime<Utc>,
}

/// Data required to insert a new [`Listing`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewListing {
    pub title: ListingTitle,
    pub description: Option<ListingDescription>,
    pub price: ListingPrice,
    pub category: Category,
    pub seller_email: EmailAddress,
    pub image_url: Option<ImageUrl>,
    pub location: Option<ListingLocation>,
}

impl Listing {
    /// Returns `true` when the title contains `needle` ignoring case.
    ///
    /// An empty needle matches every listing.
    pub fn title_contains(&self, needle: &str) -> bool {
        needle.is_empty()
            || self
                .title
                .to_lowercase()
                .contains(needle.to_lowercase().as_str())
    }
}
