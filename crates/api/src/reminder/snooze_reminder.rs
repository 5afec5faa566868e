use crate::error::RemindrError;
use crate::shared::auth::protect_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use remindr_api_structs::dtos::SnoozeTarget;
use remindr_api_structs::snooze_reminder::{APIResponse, PathParams, RequestBody};
use remindr_domain::date::tomorrow_at;
use remindr_domain::{Reminder, ID};
use remindr_infra::RemindrContext;

pub async fn snooze_reminder_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<RemindrContext>,
) -> Result<HttpResponse, RemindrError> {
    let owner_id = protect_route(&http_req)?;

    let usecase = SnoozeReminderUseCase {
        owner_id,
        reminder_id: path.reminder_id,
        until: body.until,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(RemindrError::from)
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for RemindrError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

/// Postpones a `Reminder` and puts it back in the delivery pipeline,
/// also when it was already sent
#[derive(Debug)]
pub struct SnoozeReminderUseCase {
    pub owner_id: String,
    pub reminder_id: ID,
    pub until: SnoozeTarget,
}

impl SnoozeReminderUseCase {
    fn due_at(&self, ctx: &RemindrContext, now: i64) -> i64 {
        match self.until {
            SnoozeTarget::OneHour => now + ctx.config.snooze_millis,
            SnoozeTarget::Tomorrow => {
                tomorrow_at(now, ctx.config.snooze_tomorrow_time, &ctx.config.timezone)
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SnoozeReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "SnoozeReminder";

    async fn execute(&mut self, ctx: &RemindrContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let due_at = self.due_at(ctx, now);
        let owner_id = &self.owner_id;
        let reminder_id = self.reminder_id;

        let snoozed = ctx
            .store
            .update(|reminders| {
                match reminders
                    .iter_mut()
                    .find(|r| r.id == reminder_id && &r.owner_id == owner_id)
                {
                    Some(reminder) => {
                        reminder.snooze_until(due_at);
                        (Some(reminder.clone()), true)
                    }
                    None => (None, false),
                }
            })
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        snoozed.ok_or(UseCaseError::NotFound(reminder_id))
    }
}
