use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};

use crate::domain::category::Category;
use crate::domain::listing::{Listing, NewListing};
use crate::domain::message::NewMessage;
use crate::domain::types::{ImageUrl, ListingId};
use crate::models::config::StoreConfig;

pub mod errors;
pub mod listing;
pub mod message;
pub mod storage;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by the hosted REST store.
///
/// `reqwest::Client` keeps its own connection pool and is cheap to clone,
/// allowing the repository to be passed around freely between handlers.
#[derive(Clone)]
pub struct RestRepository {
    client: Client,
    config: Arc<StoreConfig>,
}

impl RestRepository {
    /// Create a new repository for the given store settings.
    pub fn new(config: StoreConfig) -> RepositoryResult<Self> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, config))
    }

    /// Create a repository sharing an existing HTTP client.
    pub fn with_client(client: Client, mut config: StoreConfig) -> Self {
        config.url = config.url.trim_end_matches('/').to_string();
        Self {
            client,
            config: Arc::new(config),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.config.url)
    }

    fn storage_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/{path}", self.config.url)
    }

    /// Attach the API key headers expected by the store.
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }
}

/// Turn non-success responses into [`RepositoryError::Status`].
async fn ensure_success(response: Response) -> RepositoryResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(RepositoryError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Query parameters used when browsing listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingListQuery {
    /// Case-insensitive substring the title must contain.
    pub search: Option<String>,
    /// Exact category the listing must belong to.
    pub category: Option<Category>,
}

impl ListingListQuery {
    /// Restrict to titles containing `search` verbatim. An empty string is
    /// ignored; whitespace is significant.
    pub fn search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = (!search.is_empty()).then_some(search);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Returns `true` if `listing` satisfies every active predicate.
    pub fn matches(&self, listing: &Listing) -> bool {
        let title_matches = self
            .search
            .as_deref()
            .is_none_or(|search| listing.title_contains(search));
        let category_matches = self
            .category
            .is_none_or(|category| listing.category == category);
        title_matches && category_matches
    }

    /// Filters `listings` and orders them by `created_at`, newest first.
    pub fn apply(&self, mut listings: Vec<Listing>) -> Vec<Listing> {
        listings.retain(|listing| self.matches(listing));
        listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        listings
    }

    /// Renders the query in the store's filter dialect.
    ///
    /// Values are returned unencoded; URL encoding is left to the HTTP client.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("select", "*".to_string()),
            ("order", "created_at.desc".to_string()),
        ];
        if let Some(search) = &self.search {
            params.push(("title", format!("ilike.%{}%", escape_like(search))));
        }
        if let Some(category) = self.category {
            params.push(("category", format!("eq.{}", category.as_str())));
        }
        params
    }
}

/// Escapes `LIKE` metacharacters so the pattern matches literally.
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Read-only operations for listing entities.
#[async_trait]
pub trait ListingReader {
    /// List listings matching the query, newest first.
    async fn list_listings(&self, query: ListingListQuery) -> RepositoryResult<Vec<Listing>>;
    /// Retrieve a listing by its identifier.
    async fn get_listing_by_id(&self, id: &ListingId) -> RepositoryResult<Option<Listing>>;
}

/// Write operations for listing entities.
#[async_trait]
pub trait ListingWriter {
    /// Persist a new listing.
    async fn create_listing(&self, listing: &NewListing) -> RepositoryResult<()>;
}

/// Write operations for message entities.
#[async_trait]
pub trait MessageWriter {
    /// Persist a new message.
    async fn create_message(&self, message: &NewMessage) -> RepositoryResult<()>;
}

/// File storage for listing images.
#[async_trait]
pub trait ImageStorage {
    /// Upload `bytes` under `key` and return the stored object path.
    async fn upload_image(
        &self,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> RepositoryResult<String>;
    /// Resolve the public URL of an uploaded object. No network call is made.
    fn public_image_url(&self, path: &str) -> RepositoryResult<ImageUrl>;
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::domain::types::{EmailAddress, ListingPrice, ListingTitle};

    fn listing(id: &str, title: &str, category: Category, created_at: i64) -> Listing {
        Listing {
            id: ListingId::new(id).unwrap(),
            title: ListingTitle::new(title).unwrap(),
            description: None,
            price: ListingPrice::new(10.0).unwrap(),
            category,
            seller_email: EmailAddress::new("s@z.com").unwrap(),
            image_url: None,
            location: None,
            created_at: DateTime::from_timestamp(created_at, 0).unwrap(),
        }
    }

    #[test]
    fn only_empty_search_is_ignored() {
        assert_eq!(ListingListQuery::default().search("").search, None);
        assert_eq!(
            ListingListQuery::default().search(" bike ").search.as_deref(),
            Some(" bike ")
        );
        assert_eq!(
            ListingListQuery::default().search("   ").search.as_deref(),
            Some("   ")
        );
    }

    #[test]
    fn whitespace_in_search_must_match() {
        let listings = vec![
            listing("1", "Xbox", Category::Electronics, 10),
            listing("2", "Red bike", Category::Vehicles, 20),
            listing("3", "Box fan", Category::HomeGoods, 30),
        ];

        let ids = |search: &str| -> Vec<String> {
            ListingListQuery::default()
                .search(search)
                .apply(listings.clone())
                .into_iter()
                .map(|l| l.id.into_inner())
                .collect()
        };

        assert!(ids("x ").is_empty());
        assert_eq!(ids("d b"), vec!["2"]);
        assert_eq!(ids(" "), vec!["3", "2"]);
        assert!(ids("  ").is_empty());
    }

    #[test]
    fn apply_combines_predicates_and_orders_newest_first() {
        let listings = vec![
            listing("1", "Road bike", Category::Vehicles, 10),
            listing("2", "Bike helmet", Category::SportingGoods, 30),
            listing("3", "BIKE rack", Category::Vehicles, 20),
            listing("4", "Sofa", Category::Vehicles, 40),
        ];

        let query = ListingListQuery::default()
            .search("bike")
            .category(Category::Vehicles);
        let ids: Vec<String> = query
            .apply(listings)
            .into_iter()
            .map(|l| l.id.into_inner())
            .collect();

        assert_eq!(ids, vec!["3", "1"]);
    }

    #[test]
    fn params_include_filters_and_ordering() {
        let query = ListingListQuery::default()
            .search("50% off_")
            .category(Category::GardenAndOutdoor);

        let params = query.to_params();

        assert!(params.contains(&("select", "*".to_string())));
        assert!(params.contains(&("order", "created_at.desc".to_string())));
        assert!(params.contains(&("title", "ilike.%50\\% off\\_%".to_string())));
        assert!(params.contains(&("category", "eq.Garden & Outdoor".to_string())));
    }

    #[test]
    fn params_without_filters_only_select_and_order() {
        let params = ListingListQuery::default().to_params();
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn escapes_backslashes() {
        assert_eq!(escape_like(r"a\b"), r"a\\b");
    }
}
