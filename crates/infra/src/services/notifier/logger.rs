use super::INotifier;
use remindr_domain::Notification;
use tracing::info;

/// Used when no notification transport is configured
pub struct LogNotifier {}

#[async_trait::async_trait]
impl INotifier for LogNotifier {
    async fn send(&self, notification: &Notification) -> anyhow::Result<()> {
        info!(
            owner_id = %notification.owner_id,
            actions = notification.actions.len(),
            "Notification: {}",
            notification.content
        );
        Ok(())
    }
}
