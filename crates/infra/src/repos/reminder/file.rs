use super::IReminderRepo;
use crate::repos::shared::json_file::{load_document, save_document};
use remindr_domain::Reminder;
use std::path::PathBuf;

/// Keeps all `Reminder`s as one JSON array document on disk
pub struct FileReminderRepo {
    path: PathBuf,
}

impl FileReminderRepo {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for FileReminderRepo {
    async fn load_all(&self) -> Vec<Reminder> {
        load_document(&self.path).await.unwrap_or_default()
    }

    async fn save_all(&self, reminders: &[Reminder]) -> anyhow::Result<()> {
        save_document(&self.path, &reminders).await
    }
}
