use crate::repos::IReminderRepo;
use remindr_domain::Reminder;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Serializes every load → transform → save cycle on the reminder collection
/// so that concurrent handlers, the board reconciler and the delivery job
/// never overwrite each other's changes.
pub struct ReminderStore {
    repo: Arc<dyn IReminderRepo>,
    lock: Mutex<()>,
}

impl ReminderStore {
    pub fn new(repo: Arc<dyn IReminderRepo>) -> Self {
        Self {
            repo,
            lock: Mutex::new(()),
        }
    }

    /// Snapshot of the collection. It may be stale as soon as it is returned.
    pub async fn all(&self) -> Vec<Reminder> {
        let _guard = self.lock.lock().await;
        self.repo.load_all().await
    }

    /// Applies `transform` to the current collection while holding the lock.
    /// The transform returns its result together with whether it changed the
    /// collection, and only changed collections are written back.
    pub async fn update<R, F>(&self, transform: F) -> anyhow::Result<R>
    where
        F: FnOnce(&mut Vec<Reminder>) -> (R, bool),
    {
        let _guard = self.lock.lock().await;
        let mut reminders = self.repo.load_all().await;
        let (res, changed) = transform(&mut reminders);
        if changed {
            self.repo.save_all(&reminders).await?;
        }
        Ok(res)
    }
}
