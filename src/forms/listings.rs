use std::io::{Read, Seek, SeekFrom};

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::Category;
use crate::domain::listing::NewListing;
use crate::domain::types::{
    EmailAddress, ImageUrl, ListingDescription, ListingLocation, ListingPrice, ListingTitle,
    TypeConstraintError,
};

/// Sidebar entry meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Largest accepted listing image, in bytes.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Query string accepted by the browse page and the JSON API.
#[derive(Debug, Default, Deserialize)]
pub struct SearchListingsForm {
    pub search: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchListingsPayload {
    pub search: Option<String>,
    pub category: Option<Category>,
}

#[derive(Debug, Error)]
pub enum SearchListingsFormError {
    #[error("Search contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<TypeConstraintError> for SearchListingsFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<SearchListingsForm> for SearchListingsPayload {
    type Error = SearchListingsFormError;

    fn try_from(value: SearchListingsForm) -> Result<Self, Self::Error> {
        let search = value.search.filter(|s| !s.is_empty());
        let category = match value.category.as_deref().map(str::trim) {
            None | Some("") | Some(ALL_CATEGORIES) => None,
            Some(category) => Some(Category::try_from(category)?),
        };
        Ok(Self { search, category })
    }
}

/// Textual draft of a new listing, as typed into the creation form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct CreateListingForm {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: String,
    #[validate(length(min = 1))]
    pub price: String,
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(length(min = 1), email)]
    pub seller_email: String,
    pub location: String,
}

impl Default for CreateListingForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            price: String::new(),
            category: Category::default().as_str().to_string(),
            seller_email: String::new(),
            location: String::new(),
        }
    }
}

impl CreateListingForm {
    /// Resets the draft after a successful submission.
    pub fn settle(&mut self, created: bool) {
        if created {
            *self = Self::default();
        }
    }
}

/// Validated listing draft ready for the creation workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateListingPayload {
    pub title: ListingTitle,
    pub description: Option<ListingDescription>,
    pub price: ListingPrice,
    pub category: Category,
    pub seller_email: EmailAddress,
    pub location: Option<ListingLocation>,
}

impl CreateListingPayload {
    pub fn into_new_listing(self, image_url: Option<ImageUrl>) -> NewListing {
        NewListing {
            title: self.title,
            description: self.description,
            price: self.price,
            category: self.category,
            seller_email: self.seller_email,
            image_url,
            location: self.location,
        }
    }
}

#[derive(Debug, Error)]
pub enum CreateListingFormError {
    #[error("Listing form validation failed: {0}")]
    Validation(String),
    #[error("Listing form contains invalid data: {0}")]
    TypeConstraint(String),
    #[error("Failed to read the uploaded image")]
    ImageRead,
    #[error("Uploaded file is not an image")]
    NotAnImage,
    #[error("Image is too large (max 5 MB)")]
    ImageTooLarge,
}

impl From<ValidationErrors> for CreateListingFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CreateListingFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl From<std::io::Error> for CreateListingFormError {
    fn from(_: std::io::Error) -> Self {
        Self::ImageRead
    }
}

impl TryFrom<&CreateListingForm> for CreateListingPayload {
    type Error = CreateListingFormError;

    fn try_from(value: &CreateListingForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            title: ListingTitle::new(value.title.as_str())?,
            description: ListingDescription::optional(value.description.as_str()),
            price: ListingPrice::parse(&value.price)?,
            category: Category::try_from(value.category.as_str())?,
            seller_email: EmailAddress::new(value.seller_email.as_str())?,
            location: ListingLocation::optional(value.location.as_str()),
        })
    }
}

/// Image attached to a listing draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Returns `true` for `image/*` content types.
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .trim()
        .to_ascii_lowercase()
        .starts_with("image/")
}

/// Multipart body posted by the creation form.
///
/// The image size is checked in [`Self::into_parts`] rather than by the
/// extractor so an oversized file still yields the draft.
#[derive(MultipartForm)]
pub struct CreateListingMultipartForm {
    pub image: Option<TempFile>,
    pub title: Text<String>,
    pub description: Text<String>,
    pub price: Text<String>,
    pub category: Text<String>,
    pub seller_email: Text<String>,
    pub location: Text<String>,
}

impl CreateListingMultipartForm {
    /// Splits the multipart body into the textual draft and the optional image.
    ///
    /// Empty file parts (no file chosen) yield no image. The draft is returned
    /// even when the image cannot be read so it can be shown again.
    pub fn into_parts(
        self,
    ) -> (
        CreateListingForm,
        Result<Option<ImageUpload>, CreateListingFormError>,
    ) {
        let draft = CreateListingForm {
            title: self.title.into_inner(),
            description: self.description.into_inner(),
            price: self.price.into_inner(),
            category: self.category.into_inner(),
            seller_email: self.seller_email.into_inner(),
            location: self.location.into_inner(),
        };

        let image = match self.image {
            Some(file) if file.size > 0 => read_image(file).map(Some),
            _ => Ok(None),
        };

        (draft, image)
    }
}

fn read_image(mut file: TempFile) -> Result<ImageUpload, CreateListingFormError> {
    if file.size > MAX_IMAGE_BYTES {
        return Err(CreateListingFormError::ImageTooLarge);
    }

    let content_type = match file.content_type.as_ref() {
        Some(mime) if !is_image_content_type(mime.essence_str()) => {
            return Err(CreateListingFormError::NotAnImage);
        }
        Some(mime) => mime.essence_str().to_string(),
        None => FALLBACK_CONTENT_TYPE.to_string(),
    };

    let handle = file.file.as_file_mut();
    handle.seek(SeekFrom::Start(0))?;
    let mut bytes = Vec::with_capacity(file.size);
    handle.read_to_end(&mut bytes)?;

    Ok(ImageUpload {
        file_name: file.file_name.unwrap_or_default(),
        content_type,
        bytes,
    })
}
