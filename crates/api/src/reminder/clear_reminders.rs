use crate::error::RemindrError;
use crate::shared::auth::protect_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use remindr_api_structs::clear_reminders::APIResponse;
use remindr_infra::RemindrContext;

pub async fn clear_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<RemindrContext>,
) -> Result<HttpResponse, RemindrError> {
    let owner_id = protect_route(&http_req)?;

    let usecase = ClearRemindersUseCase { owner_id };

    execute(usecase, &ctx)
        .await
        .map(|deleted| HttpResponse::Ok().json(APIResponse { deleted }))
        .map_err(RemindrError::from)
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for RemindrError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

/// Deletes every `Reminder` of the owner and returns how many were deleted
#[derive(Debug)]
pub struct ClearRemindersUseCase {
    pub owner_id: String,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ClearRemindersUseCase {
    type Response = usize;

    type Error = UseCaseError;

    const NAME: &'static str = "ClearReminders";

    async fn execute(&mut self, ctx: &RemindrContext) -> Result<Self::Response, Self::Error> {
        let owner_id = &self.owner_id;
        ctx.store
            .update(|reminders| {
                let before = reminders.len();
                reminders.retain(|r| &r.owner_id != owner_id);
                let deleted = before - reminders.len();
                (deleted, deleted > 0)
            })
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::{setup, OWNER};
    use remindr_infra::ISys;
    use remindr_domain::{append_drafts, ReminderDraft};

    #[actix_web::main]
    #[test]
    async fn clears_only_own_reminders() {
        let test = setup();
        let now = test.sys.get_timestamp_millis();
        test.ctx
            .store
            .update(|reminders| {
                let drafts = vec![
                    ReminderDraft::new(OWNER.into(), "a".into(), now + 1000),
                    ReminderDraft::new("other".into(), "b".into(), now + 1000),
                    ReminderDraft::new(OWNER.into(), "c".into(), now + 2000),
                ];
                (append_drafts(reminders, drafts, now), true)
            })
            .await
            .unwrap();

        let mut usecase = ClearRemindersUseCase {
            owner_id: OWNER.into(),
        };
        assert_eq!(usecase.execute(&test.ctx).await.unwrap(), 2);
        let remaining = test.ctx.store.all().await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].owner_id, "other");

        assert_eq!(usecase.execute(&test.ctx).await.unwrap(), 0);
    }
}
