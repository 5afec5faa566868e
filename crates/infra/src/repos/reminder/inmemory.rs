use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use remindr_domain::Reminder;

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn load_all(&self) -> Vec<Reminder> {
        load_all(&self.reminders)
    }

    async fn save_all(&self, reminders: &[Reminder]) -> anyhow::Result<()> {
        replace_all(reminders, &self.reminders);
        Ok(())
    }
}
