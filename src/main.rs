use std::env;

use actix_files::Files;
use actix_multipart::form::MultipartFormConfig;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use config::Config;
use dotenvy::dotenv;
use tera::Tera;

use pushkind_classifieds::models::config::ServerConfig;
use pushkind_classifieds::notifications::HttpNotifier;
use pushkind_classifieds::repository::RestRepository;
use pushkind_classifieds::routes::api::api_v1_listings;
use pushkind_classifieds::routes::listings::{
    create_listing, send_message, show_create_listing, show_listing,
};
use pushkind_classifieds::routes::main::index;

/// Multipart request cap. The 5 MB image limit is checked by the form.
const MAX_REQUEST_BYTES: usize = 20 * 1024 * 1024;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok(); // Load .env file
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {err}");
            std::process::exit(1);
        }
    };

    let server_config = match settings.try_deserialize::<ServerConfig>() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    // `Key::from` panics on short input.
    if server_config.secret_key.len() < 64 {
        log::error!("secret_key must be at least 64 bytes long");
        std::process::exit(1);
    }
    let secret_key = Key::from(server_config.secret_key.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = match Tera::new(&server_config.templates_dir) {
        Ok(tera) => tera,
        Err(err) => {
            log::error!("Parsing error(s): {err}");
            std::process::exit(1);
        }
    };

    let client = match reqwest::Client::builder().build() {
        Ok(client) => client,
        Err(err) => {
            log::error!("Failed to build HTTP client: {err}");
            std::process::exit(1);
        }
    };
    let repo = RestRepository::with_client(client.clone(), server_config.store.clone());
    let notifier = HttpNotifier::new(client, server_config.notification_url.clone());

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!("Starting server on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .wrap(Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(index)
            .service(show_create_listing)
            .service(create_listing)
            .service(show_listing)
            .service(send_message)
            .service(api_v1_listings)
            .app_data(MultipartFormConfig::default().total_limit(MAX_REQUEST_BYTES))
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(notifier.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
