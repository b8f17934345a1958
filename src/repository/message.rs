use async_trait::async_trait;

use crate::domain::message::NewMessage;
use crate::models::message::NewMessage as RowNewMessage;
use crate::repository::{MessageWriter, RepositoryResult, RestRepository, ensure_success};

#[async_trait]
impl MessageWriter for RestRepository {
    async fn create_message(&self, message: &NewMessage) -> RepositoryResult<()> {
        let row: RowNewMessage = message.clone().into();

        let request = self
            .client
            .post(self.table_url(&self.config.messages_table))
            .header("Prefer", "return=minimal")
            .json(&[row]);

        ensure_success(self.authorized(request).send().await?).await?;
        Ok(())
    }
}
