use crate::{APIResponse, BaseClient};
use remindr_api_structs::dtos::{ReminderMetadataDTO, SnoozeTarget};
use remindr_api_structs::*;
use remindr_domain::ID;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

pub struct CreateReminderInput {
    pub message: String,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub metadata: ReminderMetadataDTO,
}

pub struct CreateReminderFromTextInput {
    pub message: String,
    pub when: String,
    pub metadata: ReminderMetadataDTO,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateReminderInput,
    ) -> APIResponse<create_reminder::APIResponse> {
        let body = create_reminder::RequestBody {
            message: input.message,
            days: input.days,
            hours: input.hours,
            minutes: input.minutes,
            metadata: input.metadata,
        };
        self.base
            .post(body, "api/v1/reminders".into(), StatusCode::CREATED)
            .await
    }

    pub async fn create_from_text(
        &self,
        input: CreateReminderFromTextInput,
    ) -> APIResponse<create_reminder_from_text::APIResponse> {
        let body = create_reminder_from_text::RequestBody {
            message: input.message,
            when: input.when,
            metadata: input.metadata,
        };
        self.base
            .post(body, "api/v1/reminders/quick".into(), StatusCode::CREATED)
            .await
    }

    pub async fn list(&self) -> APIResponse<get_reminders::APIResponse> {
        self.base
            .get("api/v1/reminders".into(), StatusCode::OK)
            .await
    }

    pub async fn list_by_tag(&self, tag: &str) -> APIResponse<get_reminders_by_tag::APIResponse> {
        self.base
            .get(format!("api/v1/reminders/tags/{}", tag), StatusCode::OK)
            .await
    }

    pub async fn delete(&self, reminder_id: ID) -> APIResponse<delete_reminder::APIResponse> {
        self.base
            .delete(format!("api/v1/reminders/{}", reminder_id), StatusCode::OK)
            .await
    }

    pub async fn clear(&self) -> APIResponse<clear_reminders::APIResponse> {
        self.base
            .delete("api/v1/reminders".into(), StatusCode::OK)
            .await
    }

    pub async fn snooze(
        &self,
        reminder_id: ID,
        until: SnoozeTarget,
    ) -> APIResponse<snooze_reminder::APIResponse> {
        let body = snooze_reminder::RequestBody { until };
        self.base
            .post(
                body,
                format!("api/v1/reminders/{}/snooze", reminder_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn complete(&self, reminder_id: ID) -> APIResponse<complete_reminder::APIResponse> {
        self.base
            .post(
                (),
                format!("api/v1/reminders/{}/done", reminder_id),
                StatusCode::OK,
            )
            .await
    }

    /// Triggers an interactive action like `snooze1h_<reminder id>`
    pub async fn handle_action(
        &self,
        action_id: &str,
    ) -> APIResponse<handle_reminder_action::APIResponse> {
        self.base
            .post(
                (),
                format!("api/v1/actions/{}", action_id),
                StatusCode::OK,
            )
            .await
    }
}
