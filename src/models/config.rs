use serde::Deserialize;

/// Connection settings for the hosted backend.
#[derive(Clone, Debug, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the project, e.g. `https://xyz.supabase.co`.
    pub url: String,
    /// API key sent as `apikey` and bearer token.
    pub api_key: String,
    #[serde(default = "default_listings_table")]
    pub listings_table: String,
    #[serde(default = "default_messages_table")]
    pub messages_table: String,
    /// Storage bucket holding listing images.
    #[serde(default = "default_image_bucket")]
    pub image_bucket: String,
}

/// Configuration options specific to the classifieds service.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Key used to sign session and flash message cookies (at least 64 bytes).
    pub secret_key: String,
    /// Glob passed to Tera, e.g. `templates/**/*`.
    pub templates_dir: String,
    pub store: StoreConfig,
    /// Endpoint accepting `{to, subject, text}` email notifications.
    pub notification_url: String,
}

fn default_listings_table() -> String {
    "listings".to_string()
}

fn default_messages_table() -> String {
    "messages".to_string()
}

fn default_image_bucket() -> String {
    "listing-images".to_string()
}
