use crate::dtos::{ReminderDTO, ReminderMetadataDTO, SnoozeTarget};
use remindr_domain::{Reminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminder: ReminderDTO,
}

impl ReminderResponse {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            reminder: ReminderDTO::new(reminder),
        }
    }
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemindersResponse {
    pub reminders: Vec<ReminderDTO>,
}

impl RemindersResponse {
    pub fn new(reminders: Vec<Reminder>) -> Self {
        Self {
            reminders: reminders.into_iter().map(ReminderDTO::new).collect(),
        }
    }
}

pub mod create_reminder {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub message: String,
        #[serde(default)]
        pub days: u32,
        #[serde(default)]
        pub hours: u32,
        #[serde(default)]
        pub minutes: u32,
        #[serde(flatten)]
        pub metadata: ReminderMetadataDTO,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod create_reminder_from_text {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub message: String,
        /// Natural language time like "demain 14h" or "in 2 hours"
        pub when: String,
        #[serde(flatten)]
        pub metadata: ReminderMetadataDTO,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod get_reminders {
    use super::*;

    pub type APIResponse = RemindersResponse;
}

pub mod get_reminders_by_tag {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub tag: String,
    }

    pub type APIResponse = RemindersResponse;
}

pub mod delete_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod clear_reminders {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub deleted: usize,
    }
}

pub mod snooze_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub until: SnoozeTarget,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod complete_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminder: ReminderDTO,
        /// Whether the linked board card was moved to the done list
        pub card_moved: bool,
    }
}

pub mod handle_reminder_action {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub action_id: String,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
        /// The reminder after a snooze, absent when it was completed
        pub reminder: Option<ReminderDTO>,
    }
}
