mod reminder;
mod shared;
mod webhook_subscription;

use crate::Config;
pub use reminder::{FileReminderRepo, IReminderRepo, InMemoryReminderRepo};
use std::sync::Arc;
use tracing::info;
pub use webhook_subscription::{
    FileWebhookSubscriptionRepo, IWebhookSubscriptionRepo, InMemoryWebhookSubscriptionRepo,
};

#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<dyn IReminderRepo>,
    pub webhook_subscriptions: Arc<dyn IWebhookSubscriptionRepo>,
}

impl Repos {
    pub fn create_file(config: &Config) -> Self {
        info!(
            "Storing reminders in {} and board webhooks in {}",
            config.reminders_file.display(),
            config.webhook_ids_file.display()
        );
        Self {
            reminders: Arc::new(FileReminderRepo::new(config.reminders_file.clone())),
            webhook_subscriptions: Arc::new(FileWebhookSubscriptionRepo::new(
                config.webhook_ids_file.clone(),
            )),
        }
    }

    pub fn create_inmemory() -> Self {
        Self {
            reminders: Arc::new(InMemoryReminderRepo::new()),
            webhook_subscriptions: Arc::new(InMemoryWebhookSubscriptionRepo::new()),
        }
    }
}
