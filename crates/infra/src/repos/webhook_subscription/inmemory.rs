use super::IWebhookSubscriptionRepo;
use crate::repos::shared::inmemory_repo::*;

pub struct InMemoryWebhookSubscriptionRepo {
    webhook_ids: std::sync::Mutex<Vec<String>>,
}

impl InMemoryWebhookSubscriptionRepo {
    pub fn new() -> Self {
        Self {
            webhook_ids: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IWebhookSubscriptionRepo for InMemoryWebhookSubscriptionRepo {
    async fn load_all(&self) -> Vec<String> {
        load_all(&self.webhook_ids)
    }

    async fn save_all(&self, webhook_ids: &[String]) -> anyhow::Result<()> {
        replace_all(webhook_ids, &self.webhook_ids);
        Ok(())
    }
}
