use super::draft_with_metadata;
use crate::error::RemindrError;
use crate::shared::auth::protect_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use remindr_api_structs::create_reminder::{APIResponse, RequestBody};
use remindr_api_structs::dtos::ReminderMetadataDTO;
use remindr_domain::date::{is_supported_timestamp, DAY_MILLIS, HOUR_MILLIS, MINUTE_MILLIS};
use remindr_domain::{append_drafts, Reminder};
use remindr_infra::RemindrContext;

pub async fn create_reminder_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<RemindrContext>,
) -> Result<HttpResponse, RemindrError> {
    let owner_id = protect_route(&http_req)?;
    let body = body.0;

    let usecase = CreateReminderUseCase {
        owner_id,
        message: body.message,
        days: body.days,
        hours: body.hours,
        minutes: body.minutes,
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
    MissingDelay,
    TooFarAhead,
    StorageError,
}

impl From<UseCaseError> for RemindrError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyMessage => {
                Self::BadClientData("The reminder message cannot be empty.".into())
            }
            UseCaseError::MissingDelay => Self::BadClientData(
                "At least one of days, hours or minutes has to be greater than 0.".into(),
            ),
            UseCaseError::TooFarAhead => {
                Self::BadClientData("The reminder cannot be due after the year 2100.".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

/// Creates a `Reminder` due after the given delay
#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub owner_id: String,
    pub message: String,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub metadata: ReminderMetadataDTO,
}

impl CreateReminderUseCase {
    fn delay_millis(&self) -> i64 {
        self.days as i64 * DAY_MILLIS
            + self.hours as i64 * HOUR_MILLIS
            + self.minutes as i64 * MINUTE_MILLIS
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &RemindrContext) -> Result<Self::Response, Self::Error> {
        if self.message.trim().is_empty() {
            return Err(UseCaseError::EmptyMessage);
        }
        let delay = self.delay_millis();
        if delay <= 0 {
            return Err(UseCaseError::MissingDelay);
        }

        let now = ctx.sys.get_timestamp_millis();
        let due_at = now + delay;
        if !is_supported_timestamp(due_at) {
            return Err(UseCaseError::TooFarAhead);
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
    use crate::shared::test_helpers::{setup, OWNER};
    use remindr_infra::ISys;
    use remindr_domain::Priority;

    fn usecase(days: u32, hours: u32, minutes: u32) -> CreateReminderUseCase {
        CreateReminderUseCase {
            owner_id: OWNER.into(),
            message: "Call the bank".into(),
            days,
            hours,
            minutes,
            metadata: Default::default(),
        }
    }

    #[actix_web::main]
    #[test]
    async fn creates_reminder_after_delay() {
        let test = setup();
        let now = test.sys.get_timestamp_millis();

        let mut usecase = usecase(1, 2, 30);
        usecase.metadata.tag = Some("Bank".into());
        usecase.metadata.priority = Some(Priority::High);
        let reminder = usecase.execute(&test.ctx).await.unwrap();

        assert_eq!(
            reminder.due_at,
            now + DAY_MILLIS + 2 * HOUR_MILLIS + 30 * MINUTE_MILLIS
        );
        assert_eq!(reminder.owner_id, OWNER);
        assert_eq!(reminder.tag.as_deref(), Some("Bank"));
        assert_eq!(reminder.priority, Priority::High);
        assert!(!reminder.sent);
        assert_eq!(test.ctx.store.all().await, vec![reminder]);
    }

    #[actix_web::main]
    #[test]
    async fn priority_defaults_to_medium() {
        let test = setup();
        let reminder = usecase(0, 0, 5).execute(&test.ctx).await.unwrap();
        assert_eq!(reminder.priority, Priority::Medium);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_zero_delay_without_writing() {
        let test = setup();
        let res = usecase(0, 0, 0).execute(&test.ctx).await;
        assert!(matches!(res, Err(UseCaseError::MissingDelay)));
        assert!(test.ctx.store.all().await.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_delay_past_year_2100() {
        let test = setup();
        let res = usecase(u32::MAX, 0, 0).execute(&test.ctx).await;
        assert!(matches!(res, Err(UseCaseError::TooFarAhead)));
        assert!(test.ctx.store.all().await.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn reminders_created_at_the_same_instant_get_distinct_ids() {
        let test = setup();
        let first = usecase(0, 1, 0).execute(&test.ctx).await.unwrap();
        let second = usecase(0, 1, 0).execute(&test.ctx).await.unwrap();
        assert_ne!(first.id, second.id);
    }
}
