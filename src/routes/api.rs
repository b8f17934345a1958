use actix_web::{HttpResponse, Responder, get, web};
use serde::Serialize;

use crate::forms::listings::SearchListingsForm;
use crate::repository::RestRepository;
use crate::services::ServiceError;
use crate::services::listings::search_listings;

#[derive(Serialize)]
struct ApiError {
    error: String,
}

/// JSON view of the browse page.
///
/// Responds with `400` for invalid filters and `502` when the store could not
/// be queried.
#[get("/v1/listings")]
pub async fn api_v1_listings(
    params: web::Query<SearchListingsForm>,
    repo: web::Data<RestRepository>,
) -> impl Responder {
    let result = search_listings(params.into_inner(), repo.get_ref()).await;

    match result.error {
        None => HttpResponse::Ok().json(result.listings),
        Some(ServiceError::InvalidInput(message)) => {
            HttpResponse::BadRequest().json(ApiError { error: message })
        }
        Some(err) => HttpResponse::BadGateway().json(ApiError {
            error: err.to_string(),
        }),
    }
}
