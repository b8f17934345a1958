use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::category::Category;
use crate::domain::listing::Listing;
use crate::dto::listings::ListingDto;
use crate::forms::listings::{CreateListingForm, CreateListingMultipartForm};
use crate::forms::messages::SendMessageForm;
use crate::notifications::HttpNotifier;
use crate::repository::RestRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::listings::{
    create_listing as create_listing_service, show_listing as show_listing_service,
};
use crate::services::messages::send_message as send_message_service;

fn render_create_form(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    form: &CreateListingForm,
    error: Option<&str>,
) -> HttpResponse {
    let mut context = base_context(flash_messages, "create_listing");
    context.insert("form", form);
    context.insert("categories", &Category::ALL.map(Category::as_str).to_vec());
    if let Some(error) = error {
        context.insert("error", error);
    }
    render_template(tera, "listings/create.html", &context)
}

fn render_listing(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    listing: Listing,
    form: &SendMessageForm,
    error: Option<&str>,
) -> HttpResponse {
    let mut context = base_context(flash_messages, "listing");
    context.insert("listing", &ListingDto::from(listing));
    context.insert("form", form);
    if let Some(error) = error {
        context.insert("error", error);
    }
    render_template(tera, "listings/show.html", &context)
}

fn listing_lookup_failure(listing_id: &str, err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        err => {
            log::error!("Failed to load listing {listing_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/create-listing")]
pub async fn show_create_listing(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_create_form(&tera, &flash_messages, &CreateListingForm::default(), None)
}

#[post("/create-listing")]
pub async fn create_listing(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<RestRepository>,
    tera: web::Data<Tera>,
    MultipartForm(form): MultipartForm<CreateListingMultipartForm>,
) -> impl Responder {
    let (mut draft, image) = form.into_parts();

    let image = match image {
        Ok(image) => image,
        Err(e) => {
            let message = e.to_string();
            return render_create_form(&tera, &flash_messages, &draft, Some(message.as_str()));
        }
    };

    let result = create_listing_service(&draft, image, repo.get_ref()).await;
    draft.settle(result.is_ok());

    match result {
        Ok(_) => {
            FlashMessage::success("Listing created successfully!").send();
            redirect("/create-listing")
        }
        Err(err) => {
            let message = match err {
                ServiceError::InvalidInput(message) => message,
                ServiceError::UploadFailed => {
                    "Failed to upload image. Please try again.".to_string()
                }
                _ => "Failed to create listing. Please try again.".to_string(),
            };
            render_create_form(&tera, &flash_messages, &draft, Some(message.as_str()))
        }
    }
}

#[get("/listing/{listing_id}")]
pub async fn show_listing(
    listing_id: web::Path<String>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<RestRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let listing_id = listing_id.into_inner();

    match show_listing_service(&listing_id, repo.get_ref()).await {
        Ok(listing) => render_listing(
            &tera,
            &flash_messages,
            listing,
            &SendMessageForm::default(),
            None,
        ),
        Err(err) => listing_lookup_failure(&listing_id, err),
    }
}

#[post("/listing/{listing_id}/message")]
pub async fn send_message(
    listing_id: web::Path<String>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<RestRepository>,
    notifier: web::Data<HttpNotifier>,
    tera: web::Data<Tera>,
    web::Form(mut form): web::Form<SendMessageForm>,
) -> impl Responder {
    let listing_id = listing_id.into_inner();

    let listing = match show_listing_service(&listing_id, repo.get_ref()).await {
        Ok(listing) => listing,
        Err(err) => return listing_lookup_failure(&listing_id, err),
    };

    let result = send_message_service(&listing, &form, repo.get_ref(), notifier.get_ref()).await;
    form.settle(result.is_ok());

    match result {
        Ok(_) => {
            FlashMessage::success("Message sent!").send();
            redirect(&format!("/listing/{listing_id}"))
        }
        Err(err) => {
            let message = match err {
                ServiceError::InvalidInput(message) => message,
                _ => "Failed to send message. Please try again.".to_string(),
            };
            render_listing(&tera, &flash_messages, listing, &form, Some(message.as_str()))
        }
    }
}
