use super::complete_reminder::CompleteReminderUseCase;
use super::snooze_reminder::SnoozeReminderUseCase;
use crate::error::RemindrError;
use crate::shared::auth::protect_route;
use crate::shared::usecase::execute;
use actix_web::{web, HttpRequest, HttpResponse};
use remindr_api_structs::dtos::{ReminderDTO, SnoozeTarget};
use remindr_api_structs::handle_reminder_action::{APIResponse, PathParams};
use remindr_domain::date::format_datetime;
use remindr_domain::{ReminderAction, ID};
use remindr_infra::RemindrContext;

/// Entry point of the interactive actions attached to due notifications
pub async fn handle_reminder_action_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<RemindrContext>,
) -> Result<HttpResponse, RemindrError> {
    let owner_id = protect_route(&http_req)?;
    let (action, reminder_id) = ReminderAction::parse_action_id(&path.action_id)
        .ok_or_else(|| RemindrError::BadClientData(format!("Unknown action: `{}`", path.action_id)))?;
    let reminder_id = ID::new(reminder_id);

    let until = match action {
        ReminderAction::Done => {
            let usecase = CompleteReminderUseCase {
                owner_id,
                reminder_id,
            };
            let res = execute(usecase, &ctx)
                .await
                .map_err(RemindrError::from)?;
            let message = if res.card_moved {
                format!(
                    "✅ Reminder done: {} (board card moved to done)",
                    res.reminder.message
                )
            } else {
                format!("✅ Reminder done: {}", res.reminder.message)
            };
            return Ok(HttpResponse::Ok().json(APIResponse {
                message,
                reminder: None,
            }));
        }
        ReminderAction::SnoozeOneHour => SnoozeTarget::OneHour,
        ReminderAction::SnoozeTomorrow => SnoozeTarget::Tomorrow,
    };

    let usecase = SnoozeReminderUseCase {
        owner_id,
        reminder_id,
        until,
    };
    let reminder = execute(usecase, &ctx)
        .await
        .map_err(RemindrError::from)?;
    Ok(HttpResponse::Ok().json(APIResponse {
        message: format!(
            "⏰ Reminder snoozed to {}",
            format_datetime(reminder.due_at, &ctx.config.timezone)
        ),
        reminder: Some(ReminderDTO::new(reminder)),
    }))
}
