use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::types::ImageUrl;
use crate::repository::{ImageStorage, RepositoryResult, RestRepository, ensure_success};

/// Body returned by the storage API after an upload.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(rename = "Key")]
    key: Option<String>,
}

#[async_trait]
impl ImageStorage for RestRepository {
    async fn upload_image(
        &self,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> RepositoryResult<String> {
        let bucket = &self.config.image_bucket;
        let request = self
            .client
            .post(self.storage_url(&format!("{bucket}/{key}")))
            .header("Content-Type", content_type)
            .header("x-upsert", "false")
            .body(bytes);

        let response = ensure_success(self.authorized(request).send().await?).await?;
        let body: UploadResponse = response.json().await?;

        // `Key` is prefixed with the bucket name; callers work with bucket-relative paths.
        let path = body
            .key
            .as_deref()
            .and_then(|stored| stored.strip_prefix(&format!("{bucket}/")).map(str::to_string))
            .unwrap_or_else(|| key.to_string());
        Ok(path)
    }

    fn public_image_url(&self, path: &str) -> RepositoryResult<ImageUrl> {
        let url = self.storage_url(&format!("public/{}/{path}", self.config.image_bucket));
        Ok(ImageUrl::new(url)?)
    }
}
