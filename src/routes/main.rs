use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::category::Category;
use crate::dto::listings::{ListingDto, category_links};
use crate::forms::listings::SearchListingsForm;
use crate::repository::RestRepository;
use crate::routes::{base_context, render_template};
use crate::services::ServiceError;
use crate::services::listings::search_listings;

const DEFAULT_HEADING: &str = "Today's picks";

#[get("/")]
pub async fn index(
    params: web::Query<SearchListingsForm>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<RestRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let form = params.into_inner();
    let search = form.search.clone().unwrap_or_default();
    let selected = form
        .category
        .as_deref()
        .and_then(|category| Category::try_from(category).ok());

    let result = search_listings(form, repo.get_ref()).await;

    let mut context = base_context(&flash_messages, "index");
    context.insert("search", &search);
    context.insert(
        "heading",
        selected.map_or(DEFAULT_HEADING, Category::as_str),
    );
    context.insert("selected_category", &selected.map(Category::as_str));
    context.insert("categories", &category_links(selected));
    context.insert(
        "listings",
        &result
            .listings
            .into_iter()
            .map(ListingDto::from)
            .collect::<Vec<_>>(),
    );
    if let Some(error) = result.error {
        let message = match error {
            ServiceError::InvalidInput(message) => message,
            _ => "Failed to load listings. Please try again.".to_string(),
        };
        context.insert("error", &message);
    }

    render_template(&tera, "main/index.html", &context)
}
