use crate::error::RemindrError;
use crate::shared::auth::protect_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use remindr_api_structs::delete_reminder::{APIResponse, PathParams};
use remindr_domain::{Reminder, ID};
use remindr_infra::RemindrContext;

pub async fn delete_reminder_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<RemindrContext>,
) -> Result<HttpResponse, RemindrError> {
    let owner_id = protect_route(&http_req)?;

    let usecase = DeleteReminderUseCase {
        owner_id,
        reminder_id: path.reminder_id,
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

#[derive(Debug)]
pub struct DeleteReminderUseCase {
    pub owner_id: String,
    pub reminder_id: ID,
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteReminder";

    async fn execute(&mut self, ctx: &RemindrContext) -> Result<Self::Response, Self::Error> {
        let owner_id = &self.owner_id;
        let reminder_id = self.reminder_id;
        let deleted = ctx
            .store
            .update(|reminders| {
                let pos = reminders
                    .iter()
                    .position(|r| r.id == reminder_id && &r.owner_id == owner_id);
                match pos {
                    Some(pos) => (Some(reminders.remove(pos)), true),
                    None => (None, false),
                }
            })
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        deleted.ok_or(UseCaseError::NotFound(reminder_id))
    }
}
