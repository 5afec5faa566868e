use crate::shared::usecase::UseCase;
use futures::future::join_all;
use remindr_domain::{Notification, ID};
use remindr_infra::RemindrContext;
use tracing::{error, info};

/// Outcome of one run of the delivery job
#[derive(Debug, Default, PartialEq)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub failed: usize,
    pub purged: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

/// Delivers every due and unsent `Reminder` and purges the sent ones whose
/// retention has passed.
///
/// The notifications are sent outside of the store lock, between a snapshot
/// and a single update. A `Reminder` is only marked as sent if it still
/// exists with the due date it was delivered for, so a snooze or a deletion
/// made while the notification was in flight wins. Failed deliveries are
/// retried on the next run.
#[derive(Debug)]
pub struct SendDueRemindersUseCase {}

#[async_trait::async_trait(?Send)]
impl UseCase for SendDueRemindersUseCase {
    type Response = DeliveryReport;

    type Error = UseCaseError;

    const NAME: &'static str = "SendDueReminders";

    async fn execute(&mut self, ctx: &RemindrContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let due = ctx
            .store
            .all()
            .await
            .into_iter()
            .filter(|r| r.is_due(now))
            .collect::<Vec<_>>();

        let deliveries = due.iter().map(|reminder| async move {
            let notification = Notification::reminder_due(reminder);
            match ctx.services.notifier.send(&notification).await {
                Ok(_) => {
                    info!("Reminder {} delivered to {}", reminder.id, reminder.owner_id);
                    Some((reminder.id, reminder.due_at))
                }
                Err(e) => {
                    error!("Unable to deliver reminder {}: {:?}", reminder.id, e);
                    None
                }
            }
        });
        let delivered = join_all(deliveries)
            .await
            .into_iter()
            .flatten()
            .collect::<Vec<(ID, i64)>>();

        let sent_at = ctx.sys.get_timestamp_millis();
        let retention = ctx.config.sent_retention_millis;
        let failed = due.len() - delivered.len();
        let report = ctx
            .store
            .update(|reminders| {
                let mut marked = 0;
                for reminder in reminders.iter_mut() {
                    let was_delivered = delivered
                        .iter()
                        .any(|(id, due_at)| reminder.id == *id && reminder.due_at == *due_at);
                    if was_delivered && !reminder.sent {
                        reminder.mark_sent(sent_at);
                        marked += 1;
                    }
                }
                let before = reminders.len();
                reminders.retain(|r| !r.is_expired(sent_at, retention));
                let purged = before - reminders.len();

                let report = DeliveryReport {
                    delivered: delivered.len(),
                    failed,
                    purged,
                };
                (report, marked > 0 || purged > 0)
            })
            .await
            .map_err(|e| {
                error!("Unable to save delivered reminders: {:?}", e);
                UseCaseError::StorageError
            })?;

        if report.purged > 0 {
            info!("Purged {} sent reminders", report.purged);
        }
        Ok(report)
    }
}
