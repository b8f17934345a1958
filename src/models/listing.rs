use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::listing::{Listing as DomainListing, NewListing as DomainNewListing};
use crate::domain::types::{
    EmailAddress, ImageUrl, ListingDescription, ListingId, ListingLocation, ListingPrice,
    ListingTitle, TypeConstraintError,
};

/// Store generated ids may be serial integers or UUID strings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RowId {
    Number(i64),
    Text(String),
}

impl From<RowId> for String {
    fn from(value: RowId) -> Self {
        match value {
            RowId::Number(number) => number.to_string(),
            RowId::Text(text) => text,
        }
    }
}

/// Row of the `listings` table as returned by `select=*`.
#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
    pub id: RowId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub seller_email: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub created_at: String,
}

/// Insertable form of [`Listing`].
///
/// Optional text columns are sent as empty strings, matching rows written by
/// other clients of the same table.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub seller_email: String,
    pub image_url: String,
    pub location: String,
}

/// Parses `timestamptz` values (RFC 3339) as well as bare `timestamp` values,
/// which are assumed to be UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, TypeConstraintError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|_| TypeConstraintError::InvalidValue(format!("created_at: {value}")))
}

impl TryFrom<Listing> for DomainListing {
    type Error = TypeConstraintError;

    fn try_from(listing: Listing) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ListingId::new(listing.id)?,
            title: ListingTitle::new(listing.title)?,
            description: listing.description.and_then(ListingDescription::optional),
            price: ListingPrice::new(listing.price)?,
            category: Category::try_from(listing.category)?,
            seller_email: EmailAddress::new(listing.seller_email)?,
            image_url: match listing.image_url {
                Some(url) if !url.trim().is_empty() => Some(ImageUrl::new(url)?),
                _ => None,
            },
            location: listing.location.and_then(ListingLocation::optional),
            created_at: parse_timestamp(&listing.created_at)?,
        })
    }
}

impl From<DomainNewListing> for NewListing {
    fn from(listing: DomainNewListing) -> Self {
        Self {
            title: listing.title.into_inner(),
            description: listing
                .description
                .map(ListingDescription::into_inner)
                .unwrap_or_default(),
            price: listing.price.get(),
            category: listing.category.into(),
            seller_email: listing.seller_email.into_inner(),
            image_url: listing
                .image_url
                .map(ImageUrl::into_inner)
                .unwrap_or_default(),
            location: listing
                .location
                .map(ListingLocation::into_inner)
                .unwrap_or_default(),
        }
    }
}
