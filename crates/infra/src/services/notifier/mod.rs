mod logger;
mod recording;
mod webhook;

pub use logger::LogNotifier;
pub use recording::RecordingNotifier;
use remindr_domain::Notification;
pub use webhook::{WebhookNotifier, WEBHOOK_KEY_HEADER};

/// Delivers a `Notification` to its owner
#[async_trait::async_trait]
pub trait INotifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> anyhow::Result<()>;
}
