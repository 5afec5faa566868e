mod file;
mod inmemory;

pub use file::FileWebhookSubscriptionRepo;
pub use inmemory::InMemoryWebhookSubscriptionRepo;

/// Ids of the webhooks registered on the task board, kept so that they can
/// be removed on teardown
#[async_trait::async_trait]
pub trait IWebhookSubscriptionRepo: Send + Sync {
    async fn load_all(&self) -> Vec<String>;
    async fn save_all(&self, webhook_ids: &[String]) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_webhook_ids() {
        let dir = tempfile::tempdir().unwrap();
        let repos: Vec<Box<dyn IWebhookSubscriptionRepo>> = vec![
            Box::new(InMemoryWebhookSubscriptionRepo::new()),
            Box::new(FileWebhookSubscriptionRepo::new(
                dir.path().join("webhooks.json"),
            )),
        ];
        for repo in repos {
            assert!(repo.load_all().await.is_empty());
            let ids = vec!["w1".to_string(), "w2".to_string()];
            repo.save_all(&ids).await.unwrap();
            assert_eq!(repo.load_all().await, ids);
            repo.save_all(&[]).await.unwrap();
            assert!(repo.load_all().await.is_empty());
        }
    }
}
