use super::IWebhookSubscriptionRepo;
use crate::repos::shared::json_file::{load_document, save_document};
use std::path::PathBuf;

pub struct FileWebhookSubscriptionRepo {
    path: PathBuf,
}

impl FileWebhookSubscriptionRepo {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait::async_trait]
impl IWebhookSubscriptionRepo for FileWebhookSubscriptionRepo {
    async fn load_all(&self) -> Vec<String> {
        load_document(&self.path).await.unwrap_or_default()
    }

    async fn save_all(&self, webhook_ids: &[String]) -> anyhow::Result<()> {
        save_document(&self.path, &webhook_ids).await
    }
}
