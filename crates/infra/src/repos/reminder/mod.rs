mod file;
mod inmemory;

pub use file::FileReminderRepo;
pub use inmemory::InMemoryReminderRepo;
use remindr_domain::Reminder;

/// Storage of the whole `Reminder` collection. There are no partial updates:
/// callers load everything, transform it and save everything back.
#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    /// Never fails, an absent or unreadable collection is empty
    async fn load_all(&self) -> Vec<Reminder>;
    async fn save_all(&self, reminders: &[Reminder]) -> anyhow::Result<()>;
}
