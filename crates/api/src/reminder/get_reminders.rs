use crate::error::RemindrError;
use crate::shared::auth::protect_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use remindr_api_structs::get_reminders::APIResponse;
use remindr_api_structs::get_reminders_by_tag::PathParams;
use remindr_domain::{sorted_for_listing, Reminder};
use remindr_infra::RemindrContext;

pub async fn get_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<RemindrContext>,
) -> Result<HttpResponse, RemindrError> {
    let owner_id = protect_route(&http_req)?;

    let usecase = GetRemindersUseCase {
        owner_id,
        tag: None,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(RemindrError::from)
}

pub async fn get_reminders_by_tag_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<RemindrContext>,
) -> Result<HttpResponse, RemindrError> {
    let owner_id = protect_route(&http_req)?;

    let usecase = GetRemindersUseCase {
        owner_id,
        tag: Some(path.into_inner().tag),
    };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(RemindrError::from)
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for RemindrError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

/// The `Reminder`s of an owner, optionally only those with the exact `tag`
#[derive(Debug)]
pub struct GetRemindersUseCase {
    pub owner_id: String,
    pub tag: Option<String>,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminders";

    async fn execute(&mut self, ctx: &RemindrContext) -> Result<Self::Response, Self::Error> {
        let reminders = ctx
            .store
            .all()
            .await
            .into_iter()
            .filter(|r| r.owner_id == self.owner_id)
            .filter(|r| match &self.tag {
                Some(tag) => r.tag.as_ref() == Some(tag),
                None => true,
            })
            .collect();
        Ok(sorted_for_listing(reminders))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::{setup, OWNER};
    use remindr_infra::ISys;
    use remindr_domain::{append_drafts, Priority, ReminderDraft};

    fn draft(owner_id: &str, message: &str, due_at: i64, priority: Priority) -> ReminderDraft {
        let mut draft = ReminderDraft::new(owner_id.into(), message.into(), due_at);
        draft.priority = priority;
        draft
    }

    #[actix_web::main]
    #[test]
    async fn lists_own_reminders_by_priority_then_due_date() {
        let test = setup();
        let now = test.sys.get_timestamp_millis();
        let drafts = vec![
            draft(OWNER, "low", now + 10, Priority::Low),
            draft(OWNER, "late high", now + 50, Priority::High),
            draft("someone-else", "other", now + 5, Priority::High),
            draft(OWNER, "early high", now + 20, Priority::High),
        ];
        test.ctx
            .store
            .update(|reminders| (append_drafts(reminders, drafts, now), true))
            .await
            .unwrap();

        let mut usecase = GetRemindersUseCase {
            owner_id: OWNER.into(),
            tag: None,
        };
        let messages = usecase
            .execute(&test.ctx)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.message)
            .collect::<Vec<_>>();
        assert_eq!(messages, vec!["early high", "late high", "low"]);
    }

    #[actix_web::main]
    #[test]
    async fn filters_on_exact_tag() {
        let test = setup();
        let now = test.sys.get_timestamp_millis();
        let mut tagged = draft(OWNER, "tagged", now + 10, Priority::Medium);
        tagged.tag = Some("Work".into());
        let mut other_tag = draft(OWNER, "other tag", now + 10, Priority::Medium);
        other_tag.tag = Some("Workout".into());
        let untagged = draft(OWNER, "untagged", now + 10, Priority::Medium);
        test.ctx
            .store
            .update(|reminders| {
                let created = append_drafts(reminders, vec![tagged, other_tag, untagged], now);
                (created, true)
            })
            .await
            .unwrap();

        let mut usecase = GetRemindersUseCase {
            owner_id: OWNER.into(),
            tag: Some("Work".into()),
        };
        let res = usecase.execute(&test.ctx).await.unwrap();
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].message, "tagged");
    }
}
