use crate::error::RemindrError;
use crate::shared::auth::protect_route;
use crate::shared::board::configured_board;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use remindr_api_structs::complete_reminder::{APIResponse, PathParams};
use remindr_api_structs::dtos::ReminderDTO;
use remindr_domain::{ListScope, Reminder, ID};
use remindr_infra::RemindrContext;
use tracing::{info, warn};

pub async fn complete_reminder_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<RemindrContext>,
) -> Result<HttpResponse, RemindrError> {
    let owner_id = protect_route(&http_req)?;

    let usecase = CompleteReminderUseCase {
        owner_id,
        reminder_id: path.reminder_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                reminder: ReminderDTO::new(res.reminder),
                card_moved: res.card_moved,
            })
        })
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
pub struct CompletedReminder {
    pub reminder: Reminder,
    pub card_moved: bool,
}

/// Marks a `Reminder` as done by deleting it. When it is linked to a board
/// card, the card is moved to the done list first. Moving the card is best
/// effort and never prevents the deletion.
#[derive(Debug)]
pub struct CompleteReminderUseCase {
    pub owner_id: String,
    pub reminder_id: ID,
}

async fn move_card_to_done(ctx: &RemindrContext, card_id: &str) -> anyhow::Result<bool> {
    let (board, board_id) = match configured_board(ctx) {
        Ok(board) => board,
        Err(e) => {
            warn!("Not moving board card {}: {:?}", card_id, e);
            return Ok(false);
        }
    };
    let lists = board.get_lists(&board_id).await?;
    match ListScope::Done.find_list(&lists) {
        Some(done_list) => {
            board.move_card(card_id, &done_list.id).await?;
            info!("Moved board card {} to list {}", card_id, done_list.name);
            Ok(true)
        }
        None => {
            warn!("Board {} has no done list, card {} stays", board_id, card_id);
            Ok(false)
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CompleteReminderUseCase {
    type Response = CompletedReminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CompleteReminder";

    async fn execute(&mut self, ctx: &RemindrContext) -> Result<Self::Response, Self::Error> {
        let reminder_id = self.reminder_id;
        let reminder = ctx
            .store
            .all()
            .await
            .into_iter()
            .find(|r| r.id == reminder_id && r.owner_id == self.owner_id)
            .ok_or(UseCaseError::NotFound(reminder_id))?;

        let card_moved = match &reminder.external_card_id {
            Some(card_id) => match move_card_to_done(ctx, card_id).await {
                Ok(moved) => moved,
                Err(e) => {
                    warn!("Unable to move board card {} to done: {:?}", card_id, e);
                    false
                }
            },
            None => false,
        };

        ctx.store
            .update(|reminders| {
                let before = reminders.len();
                reminders.retain(|r| r.id != reminder_id);
                ((), reminders.len() != before)
            })
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(CompletedReminder {
            reminder,
            card_moved,
        })
    }
}
