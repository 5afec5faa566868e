mod clear_reminders;
mod complete_reminder;
mod create_reminder;
mod create_reminder_from_text;
mod delete_reminder;
mod get_reminders;
mod handle_reminder_action;
pub mod send_due_reminders;
mod snooze_reminder;

use actix_web::web;
use clear_reminders::clear_reminders_controller;
use complete_reminder::complete_reminder_controller;
use create_reminder::create_reminder_controller;
use create_reminder_from_text::create_reminder_from_text_controller;
use delete_reminder::delete_reminder_controller;
use get_reminders::{get_reminders_by_tag_controller, get_reminders_controller};
use handle_reminder_action::handle_reminder_action_controller;
use remindr_api_structs::dtos::ReminderMetadataDTO;
use remindr_domain::ReminderDraft;
use snooze_reminder::snooze_reminder_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminders", web::post().to(create_reminder_controller));
    cfg.route(
        "/reminders/quick",
        web::post().to(create_reminder_from_text_controller),
    );
    cfg.route("/reminders", web::get().to(get_reminders_controller));
    cfg.route(
        "/reminders/tags/{tag}",
        web::get().to(get_reminders_by_tag_controller),
    );
    cfg.route("/reminders", web::delete().to(clear_reminders_controller));
    cfg.route(
        "/reminders/{reminder_id}",
        web::delete().to(delete_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/snooze",
        web::post().to(snooze_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/done",
        web::post().to(complete_reminder_controller),
    );

    cfg.route(
        "/actions/{action_id}",
        web::post().to(handle_reminder_action_controller),
    );
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn draft_with_metadata(
    owner_id: String,
    message: String,
    due_at: i64,
    metadata: ReminderMetadataDTO,
) -> ReminderDraft {
    let mut draft = ReminderDraft::new(owner_id, message.trim().to_string(), due_at);
    draft.context = non_empty(metadata.context);
    draft.link = non_empty(metadata.link);
    draft.tag = non_empty(metadata.tag);
    draft.priority = metadata.priority.unwrap_or_default();
    draft
}
