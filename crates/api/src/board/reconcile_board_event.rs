use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use remindr_api_structs::receive_board_webhook::RequestBody;
use remindr_domain::date::next_occurrence_of;
use remindr_domain::{
    append_drafts, BoardAction, BoardCard, BoardEvent, Notification, ReminderDraft,
};
use remindr_infra::RemindrContext;
use tracing::{error, info, warn};

const BOARD_TAG: &str = "Trello";

pub async fn board_webhook_head_controller() -> HttpResponse {
    HttpResponse::Ok().finish()
}

/// Always acknowledges, otherwise the board disables the webhook
pub async fn board_webhook_controller(
    body: web::Bytes,
    ctx: web::Data<RemindrContext>,
) -> HttpResponse {
    let payload = match serde_json::from_slice::<RequestBody>(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Ignoring malformed board webhook payload: {:?}", e);
            return HttpResponse::Ok().body("OK");
        }
    };

    let usecase = ReconcileBoardEventUseCase {
        action: payload.into_board_action(),
    };
    match execute(usecase, &ctx).await {
        Ok(dispositions) => info!("Board webhook handled: {:?}", dispositions),
        Err(e) => match e {},
    }

    HttpResponse::Ok().body("OK")
}

/// What reconciling one `BoardEvent` did to the `Reminder`s
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileDisposition {
    Created { card_id: String, count: usize },
    Refreshed { card_id: String },
    Completed { card_id: String, deleted: usize },
    Removed { card_id: String, deleted: usize },
    Ignored,
    Failed { card_id: String },
}

#[derive(Debug)]
pub enum UseCaseError {}

/// Applies a board webhook action to the `Reminder`s.
///
/// Cards entering a to do list get a morning and an afternoon reminder,
/// cards reaching a done list or deleted lose theirs. Repeated or
/// reordered events converge to the same state. This never fails, every
/// problem is logged and reported as a disposition.
#[derive(Debug)]
pub struct ReconcileBoardEventUseCase {
    pub action: Option<BoardAction>,
}

enum Upsert {
    Created(usize),
    Refreshed,
}

async fn upsert_card_reminders(
    ctx: &RemindrContext,
    owner_id: &str,
    card: &BoardCard,
    now: i64,
) -> anyhow::Result<Upsert> {
    let tz = ctx.config.timezone;
    let slots = [
        (ctx.config.morning_reminder, "Board task - morning reminder"),
        (ctx.config.afternoon_reminder, "Board task - afternoon reminder"),
    ];

    ctx.store
        .update(|reminders| {
            let linked = reminders
                .iter_mut()
                .filter(|r| r.is_linked_to(&card.id))
                .collect::<Vec<_>>();
            if !linked.is_empty() {
                let mut changed = false;
                for reminder in linked {
                    changed |= reminder.refresh_from_card(card);
                }
                return (Upsert::Refreshed, changed);
            }

            let drafts = slots
                .iter()
                .map(|(time, context)| {
                    let due_at = next_occurrence_of(now, *time, &tz);
                    let mut draft =
                        ReminderDraft::new(owner_id.to_string(), card.name.clone(), due_at);
                    draft.context = Some(context.to_string());
                    draft.link = card.url.clone();
                    draft.tag = Some(BOARD_TAG.to_string());
                    draft.external_card_id = Some(card.id.clone());
                    draft
                })
                .collect();
            let created = append_drafts(reminders, drafts, now);
            (Upsert::Created(created.len()), true)
        })
        .await
}

async fn delete_card_reminders(ctx: &RemindrContext, card_id: &str) -> anyhow::Result<usize> {
    ctx.store
        .update(|reminders| {
            let before = reminders.len();
            reminders.retain(|r| !r.is_linked_to(card_id));
            let deleted = before - reminders.len();
            (deleted, deleted > 0)
        })
        .await
}

async fn notify(ctx: &RemindrContext, notification: Notification) {
    if let Err(e) = ctx.services.notifier.send(&notification).await {
        error!("Unable to send board notification: {:?}", e);
    }
}

impl ReconcileBoardEventUseCase {
    async fn card_entered(
        &self,
        ctx: &RemindrContext,
        card: BoardCard,
        announce: bool,
    ) -> ReconcileDisposition {
        let owner_id = match &ctx.config.board.owner_id {
            Some(owner_id) => owner_id,
            None => {
                warn!("TRELLO_USER_ID is not configured, ignoring board card {}", card.id);
                return ReconcileDisposition::Ignored;
            }
        };
        let now = ctx.sys.get_timestamp_millis();

        let disposition = match upsert_card_reminders(ctx, owner_id, &card, now).await {
            Ok(Upsert::Created(count)) => ReconcileDisposition::Created {
                card_id: card.id.clone(),
                count,
            },
            Ok(Upsert::Refreshed) => ReconcileDisposition::Refreshed {
                card_id: card.id.clone(),
            },
            Err(e) => {
                error!("Unable to store reminders of board card {}: {:?}", card.id, e);
                return ReconcileDisposition::Failed { card_id: card.id };
            }
        };

        if announce && ctx.dedup.should_notify(&card.id, now) {
            notify(ctx, Notification::card_added(owner_id, &card)).await;
        }
        disposition
    }

    async fn card_done(&self, ctx: &RemindrContext, card: BoardCard) -> ReconcileDisposition {
        let deleted = match delete_card_reminders(ctx, &card.id).await {
            Ok(deleted) => deleted,
            Err(e) => {
                error!("Unable to delete reminders of board card {}: {:?}", card.id, e);
                return ReconcileDisposition::Failed { card_id: card.id };
            }
        };
        if deleted > 0 {
            match &ctx.config.board.owner_id {
                Some(owner_id) => {
                    notify(ctx, Notification::card_completed(owner_id, &card, deleted)).await
                }
                None => warn!("TRELLO_USER_ID is not configured, not announcing done card"),
            }
        }
        ReconcileDisposition::Completed {
            card_id: card.id,
            deleted,
        }
    }

    async fn card_deleted(&self, ctx: &RemindrContext, card_id: String) -> ReconcileDisposition {
        match delete_card_reminders(ctx, &card_id).await {
            Ok(deleted) => ReconcileDisposition::Removed { card_id, deleted },
            Err(e) => {
                error!("Unable to delete reminders of board card {}: {:?}", card_id, e);
                ReconcileDisposition::Failed { card_id }
            }
        }
    }

    async fn reconcile(&self, ctx: &RemindrContext, event: BoardEvent) -> ReconcileDisposition {
        match event {
            BoardEvent::CardCreatedInScopeList(card) | BoardEvent::CardMovedIntoScopeList(card) => {
                self.card_entered(ctx, card, true).await
            }
            BoardEvent::CardUpdatedInScopeList(card) => self.card_entered(ctx, card, false).await,
            BoardEvent::CardMovedToDoneList(card) => self.card_done(ctx, card).await,
            BoardEvent::CardDeleted { card_id } => self.card_deleted(ctx, card_id).await,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ReconcileBoardEventUseCase {
    type Response = Vec<ReconcileDisposition>;

    type Error = UseCaseError;

    const NAME: &'static str = "ReconcileBoardEvent";

    async fn execute(&mut self, ctx: &RemindrContext) -> Result<Self::Response, Self::Error> {
        let events = match self.action.take() {
            Some(action) => BoardEvent::from_action(action),
            None => Vec::new(),
        };
        if events.is_empty() {
            return Ok(vec![ReconcileDisposition::Ignored]);
        }

        let mut dispositions = Vec::with_capacity(events.len());
        for event in events {
            dispositions.push(self.reconcile(ctx, event).await);
        }
        Ok(dispositions)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::{paris_millis, setup, TestContext, BOARD_OWNER};
    use remindr_domain::date::MINUTE_MILLIS;
    use remindr_domain::{BoardActionKind, BoardList, Reminder};

    fn card(name: &str) -> BoardCard {
        BoardCard {
            id: "C1".into(),
            name: name.into(),
            url: Some("https://trello.com/c/abc".into()),
        }
    }

    fn list(name: &str) -> Option<BoardList> {
        Some(BoardList {
            id: format!("list-{}", name),
            name: name.into(),
        })
    }

    fn created(card: BoardCard, list_name: &str) -> BoardAction {
        BoardAction {
            kind: BoardActionKind::CreateCard,
            card,
            list: list(list_name),
            list_after: None,
        }
    }

    fn moved(card: BoardCard, list_name: &str) -> BoardAction {
        BoardAction {
            kind: BoardActionKind::UpdateCard,
            card,
            list: None,
            list_after: list(list_name),
        }
    }

    async fn reconcile(test: &TestContext, action: BoardAction) -> Vec<ReconcileDisposition> {
        ReconcileBoardEventUseCase {
            action: Some(action),
        }
        .execute(&test.ctx)
        .await
        .unwrap()
    }

    fn card_reminders(reminders: &[Reminder]) -> Vec<&Reminder> {
        reminders.iter().filter(|r| r.is_linked_to("C1")).collect()
    }

    #[actix_web::main]
    #[test]
    async fn card_created_in_to_do_gets_two_reminders() {
        let test = setup();
        let res = reconcile(&test, created(card("Write report"), "To Do")).await;
        assert_eq!(
            res,
            vec![ReconcileDisposition::Created {
                card_id: "C1".into(),
                count: 2
            }]
        );

        let reminders = test.ctx.store.all().await;
        let linked = card_reminders(&reminders);
        assert_eq!(linked.len(), 2);
        assert_eq!(linked[0].due_at, paris_millis(2026, 10, 19, 10, 0));
        assert_eq!(linked[1].due_at, paris_millis(2026, 10, 19, 15, 0));
        assert_ne!(linked[0].id, linked[1].id);
        for reminder in linked {
            assert_eq!(reminder.owner_id, BOARD_OWNER);
            assert_eq!(reminder.tag.as_deref(), Some("Trello"));
            assert_eq!(reminder.link.as_deref(), Some("https://trello.com/c/abc"));
        }

        let sent = test.notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].owner_id, BOARD_OWNER);
    }

    #[actix_web::main]
    #[test]
    async fn reminder_times_roll_over_to_tomorrow() {
        let test = setup();
        test.sys.set(paris_millis(2026, 10, 19, 16, 0));
        reconcile(&test, created(card("Write report"), "To Do")).await;

        let reminders = test.ctx.store.all().await;
        let due = card_reminders(&reminders)
            .iter()
            .map(|r| r.due_at)
            .collect::<Vec<_>>();
        assert_eq!(
            due,
            vec![
                paris_millis(2026, 10, 20, 10, 0),
                paris_millis(2026, 10, 20, 15, 0)
            ]
        );
    }

    #[actix_web::main]
    #[test]
    async fn repeated_entry_events_upsert() {
        let test = setup();
        reconcile(&test, created(card("Write report"), "To Do")).await;
        test.sys.advance(MINUTE_MILLIS);
        let res = reconcile(&test, moved(card("Write the report"), "To Do")).await;
        assert_eq!(
            res,
            vec![ReconcileDisposition::Refreshed {
                card_id: "C1".into()
            }]
        );

        let reminders = test.ctx.store.all().await;
        let linked = card_reminders(&reminders);
        assert_eq!(linked.len(), 2);
        assert!(linked.iter().all(|r| r.message == "Write the report"));
        // Second entry inside the dedup window is not announced
        assert_eq!(test.notifier.sent().len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn entry_after_dedup_window_is_announced_again() {
        let test = setup();
        reconcile(&test, created(card("Write report"), "To Do")).await;
        test.sys.advance(6 * MINUTE_MILLIS);
        reconcile(&test, moved(card("Write report"), "To Do")).await;
        assert_eq!(test.notifier.sent().len(), 2);
    }

    #[actix_web::main]
    #[test]
    async fn update_in_scope_is_silent() {
        let test = setup();
        let action = BoardAction {
            kind: BoardActionKind::UpdateCard,
            card: card("Renamed"),
            list: list("To Do"),
            list_after: None,
        };
        reconcile(&test, action).await;
        assert_eq!(card_reminders(&test.ctx.store.all().await).len(), 2);
        assert!(test.notifier.sent().is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn card_moved_to_done_removes_reminders_and_announces() {
        let test = setup();
        reconcile(&test, created(card("Write report"), "To Do")).await;

        let res = reconcile(&test, moved(card("Write report"), "Done")).await;
        assert_eq!(
            res,
            vec![ReconcileDisposition::Completed {
                card_id: "C1".into(),
                deleted: 2
            }]
        );
        assert!(test.ctx.store.all().await.is_empty());
        let sent = test.notifier.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent[1].content.contains("2 reminder(s) removed"));

        // Nothing left to delete, nothing to announce
        reconcile(&test, moved(card("Write report"), "Done")).await;
        assert_eq!(test.notifier.sent().len(), 2);
    }

    #[actix_web::main]
    #[test]
    async fn deleted_card_removes_reminders_silently() {
        let test = setup();
        reconcile(&test, created(card("Write report"), "To Do")).await;
        let action = BoardAction {
            kind: BoardActionKind::DeleteCard,
            card: card(""),
            list: None,
            list_after: None,
        };
        let res = reconcile(&test, action).await;
        assert_eq!(
            res,
            vec![ReconcileDisposition::Removed {
                card_id: "C1".into(),
                deleted: 2
            }]
        );
        assert!(test.ctx.store.all().await.is_empty());
        assert_eq!(test.notifier.sent().len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn unrelated_lists_and_missing_owner_are_ignored() {
        let mut test = setup();
        let res = reconcile(&test, created(card("Write report"), "Backlog")).await;
        assert_eq!(res, vec![ReconcileDisposition::Ignored]);

        test.ctx.config.board.owner_id = None;
        let res = reconcile(&test, created(card("Write report"), "To Do")).await;
        assert_eq!(res, vec![ReconcileDisposition::Ignored]);
        assert!(test.ctx.store.all().await.is_empty());
        assert!(test.notifier.sent().is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn missing_action_is_ignored() {
        let test = setup();
        let res = ReconcileBoardEventUseCase { action: None }
            .execute(&test.ctx)
            .await
            .unwrap();
        assert_eq!(res, vec![ReconcileDisposition::Ignored]);
    }
}
