use chrono::Utc;

use crate::domain::listing::Listing;
use crate::domain::types::{ImageUrl, ListingId};
use crate::forms::listings::{
    CreateListingForm, CreateListingPayload, ImageUpload, SearchListingsForm,
    SearchListingsPayload,
};
use crate::repository::{ImageStorage, ListingListQuery, ListingReader, ListingWriter};

use super::{ServiceError, ServiceResult};

/// Result of browsing listings.
///
/// A failed query still yields a (empty) list so pages can render, while
/// `error` tells callers that the emptiness is not a genuine "no results".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingSearch {
    pub listings: Vec<Listing>,
    pub error: Option<ServiceError>,
}

impl ListingSearch {
    fn failed(error: ServiceError) -> Self {
        Self {
            listings: vec![],
            error: Some(error),
        }
    }

    /// Returns `true` when the listings could not be loaded.
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Completion signal of [`create_listing`].
#[derive(Debug, Clone, PartialEq)]
pub struct ListingCreated {
    pub image_url: Option<ImageUrl>,
}

/// Core business logic for the browse page.
///
/// Returns every listing whose title contains the search text
/// (case-insensitive) and whose category equals the selected one, newest
/// first. Invalid filters and store failures never propagate as errors; they
/// are reported through [`ListingSearch::error`] alongside an empty list.
pub async fn search_listings<R>(form: SearchListingsForm, repo: &R) -> ListingSearch
where
    R: ListingReader,
{
    let payload: SearchListingsPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return ListingSearch::failed(ServiceError::from(e)),
    };

    let mut query = ListingListQuery::default();
    if let Some(search) = payload.search {
        query = query.search(search);
    }
    if let Some(category) = payload.category {
        query = query.category(category);
    }

    match repo.list_listings(query).await {
        Ok(listings) => ListingSearch {
            listings,
            error: None,
        },
        Err(e) => {
            log::error!("Failed to list listings: {e}");
            ListingSearch::failed(ServiceError::QueryFailed)
        }
    }
}

/// Fetches a single listing for the detail page.
pub async fn show_listing<R>(listing_id: &str, repo: &R) -> ServiceResult<Listing>
where
    R: ListingReader,
{
    let listing_id = ListingId::new(listing_id).map_err(|_| ServiceError::NotFound)?;

    match repo.get_listing_by_id(&listing_id).await {
        Ok(Some(listing)) => Ok(listing),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get listing {listing_id}: {e}");
            Err(ServiceError::QueryFailed)
        }
    }
}

/// Listing creation workflow.
///
/// 1. Validates the draft; failures return `InvalidInput` before any network
///    call.
/// 2. Uploads the image, if any, and resolves its public URL. Failures return
///    `UploadFailed` and nothing is inserted.
/// 3. Inserts the listing. Failures return `PersistenceFailed`.
///
/// No step is retried.
pub async fn create_listing<R>(
    form: &CreateListingForm,
    image: Option<ImageUpload>,
    repo: &R,
) -> ServiceResult<ListingCreated>
where
    R: ImageStorage + ListingWriter,
{
    let payload = CreateListingPayload::try_from(form)?;

    let image_url = match image {
        Some(image) => Some(upload_listing_image(image, repo).await?),
        None => None,
    };

    let listing = payload.into_new_listing(image_url.clone());
    match repo.create_listing(&listing).await {
        Ok(()) => Ok(ListingCreated { image_url }),
        Err(e) => {
            log::error!("Failed to create listing: {e}");
            Err(ServiceError::PersistenceFailed)
        }
    }
}

async fn upload_listing_image<R>(image: ImageUpload, repo: &R) -> ServiceResult<ImageUrl>
where
    R: ImageStorage,
{
    let key = storage_key(Utc::now().timestamp_millis(), &image.file_name);

    let path = match repo
        .upload_image(&key, &image.content_type, image.bytes)
        .await
    {
        Ok(path) => path,
        Err(e) => {
            log::error!("Failed to upload listing image {key}: {e}");
            return Err(ServiceError::UploadFailed);
        }
    };

    repo.public_image_url(&path).map_err(|e| {
        log::error!("Failed to resolve public URL for {path}: {e}");
        ServiceError::UploadFailed
    })
}

/// Builds a collision-resistant object key: `public/<millis>-<file name>`.
pub fn storage_key(timestamp_millis: i64, file_name: &str) -> String {
    format!("public/{timestamp_millis}-{}", sanitize_file_name(file_name))
}

/// Keeps the final path component and replaces characters outside
/// `[A-Za-z0-9._-]` with `-`.
fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    let sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect();
    if sanitized.trim_matches(['.', '-']).is_empty() {
        "image".to_string()
    } else {
        sanitized
    }
}
