use super::draft_with_metadata;
use crate::error::RemindrError;
use crate::shared::auth::protect_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use remindr_api_structs::create_reminder_from_text::{APIResponse, RequestBody};
use remindr_api_structs::dtos::ReminderMetadataDTO;
use remindr_domain::date::format_datetime;
use remindr_domain::{append_drafts, parse_time_expression, Reminder};
use remindr_infra::RemindrContext;

pub async fn create_reminder_from_text_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<RemindrContext>,
) -> Result<HttpResponse, RemindrError> {
    let owner_id = protect_route(&http_req)?;
    let body = body.0;

    let usecase = CreateReminderFromTextUseCase {
        owner_id,
        message: body.message,
        when: body.when,
        metadata: body.metadata,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Created().json(APIResponse::new(reminder)))
        .map_err(RemindrError::from)
}

#[derive(Debug)]
pub enum UseCaseError {
    EmptyMessage,
    UnrecognizedTime(String),
    NotInFuture(String),
    StorageError,
}

impl From<UseCaseError> for RemindrError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyMessage => {
                Self::BadClientData("The reminder message cannot be empty.".into())
            }
            UseCaseError::UnrecognizedTime(when) => Self::BadClientData(format!(
                "Could not understand the time: `{}`. Try for example `demain 14h`, `in 2 hours` or `2026-10-20 09:00`.",
                when
            )),
            UseCaseError::NotInFuture(due) => Self::BadClientData(format!(
                "The time {} is not in the future.",
                due
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

/// Creates a `Reminder` due at a natural language time expression
#[derive(Debug)]
pub struct CreateReminderFromTextUseCase {
    pub owner_id: String,
    pub message: String,
    pub when: String,
    pub metadata: ReminderMetadataDTO,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderFromTextUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminderFromText";

    async fn execute(&mut self, ctx: &RemindrContext) -> Result<Self::Response, Self::Error> {
        if self.message.trim().is_empty() {
            return Err(UseCaseError::EmptyMessage);
        }
        let now = ctx.sys.get_timestamp_millis();
        let tz = ctx.config.timezone;
        let due_at = parse_time_expression(&self.when, now, &tz)
            .ok_or_else(|| UseCaseError::UnrecognizedTime(self.when.clone()))?;
        if due_at <= now {
            return Err(UseCaseError::NotInFuture(format_datetime(due_at, &tz)));
        }

        let draft = draft_with_metadata(
            self.owner_id.clone(),
            self.message.clone(),
            due_at,
            std::mem::take(&mut self.metadata),
        );
        let mut created = ctx
            .store
            .update(|reminders| (append_drafts(reminders, vec![draft], now), true))
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        created.pop().ok_or(UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::{paris_millis, setup, OWNER};

    fn usecase(when: &str) -> CreateReminderFromTextUseCase {
        CreateReminderFromTextUseCase {
            owner_id: OWNER.into(),
            message: "Send the report".into(),
            when: when.into(),
            metadata: Default::default(),
        }
    }

    #[actix_web::main]
    #[test]
    async fn creates_reminder_from_time_expression() {
        let test = setup();
        let reminder = usecase("demain 14h30").execute(&test.ctx).await.unwrap();
        assert_eq!(reminder.due_at, paris_millis(2026, 10, 20, 14, 30));
        assert_eq!(test.ctx.store.all().await.len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_unknown_expression() {
        let test = setup();
        let res = usecase("whenever").execute(&test.ctx).await;
        assert!(matches!(res, Err(UseCaseError::UnrecognizedTime(_))));
        assert!(test.ctx.store.all().await.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_offset_beyond_supported_range() {
        let test = setup();
        let res = usecase("dans 153722867280912 minutes")
            .execute(&test.ctx)
            .await;
        assert!(matches!(res, Err(UseCaseError::UnrecognizedTime(_))));
        assert!(test.ctx.store.all().await.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_time_in_the_past() {
        let test = setup();
        let res = usecase("2026-10-18 10:00").execute(&test.ctx).await;
        assert!(matches!(res, Err(UseCaseError::NotInFuture(_))));
        assert!(test.ctx.store.all().await.is_empty());
    }
}
