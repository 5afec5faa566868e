use remindr_domain::{Priority, Reminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub owner_id: String,
    pub message: String,
    pub due_at: i64,
    pub created_at: i64,
    pub context: Option<String>,
    pub link: Option<String>,
    pub tag: Option<String>,
    pub priority: Priority,
    pub external_card_id: Option<String>,
    pub sent: bool,
    pub sent_at: Option<i64>,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            owner_id: reminder.owner_id,
            message: reminder.message,
            due_at: reminder.due_at,
            created_at: reminder.created_at,
            context: reminder.context,
            link: reminder.link,
            tag: reminder.tag,
            priority: reminder.priority,
            external_card_id: reminder.external_card_id,
            sent: reminder.sent,
            sent_at: reminder.sent_at,
        }
    }
}

/// Optional metadata given when creating a `Reminder`
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReminderMetadataDTO {
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum SnoozeTarget {
    OneHour,
    Tomorrow,
}
