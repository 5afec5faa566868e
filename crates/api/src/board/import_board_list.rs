use crate::error::RemindrError;
use crate::shared::auth::protect_route;
use crate::shared::board::{configured_board, BoardError};
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use remindr_api_structs::dtos::ReminderDTO;
use remindr_api_structs::import_board_list::{APIResponse, RequestBody};
use remindr_domain::date::format_datetime;
use remindr_domain::{append_drafts, parse_time_expression, Reminder, ReminderDraft};
use remindr_infra::RemindrContext;

pub async fn import_board_list_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<RemindrContext>,
) -> Result<HttpResponse, RemindrError> {
    let owner_id = protect_route(&http_req)?;
    let body = body.0;

    let usecase = ImportBoardListUseCase {
        owner_id,
        list_name: body.list_name,
        when: body.when,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Created().json(APIResponse {
                list_name: res.list_name,
                reminders: res.reminders.into_iter().map(ReminderDTO::new).collect(),
            })
        })
        .map_err(RemindrError::from)
}

#[derive(Debug)]
pub enum UseCaseError {
    UnrecognizedTime(String),
    NotInFuture(String),
    ListNotFound {
        list_name: String,
        available: Vec<String>,
    },
    Board(BoardError),
    StorageError,
}

impl From<UseCaseError> for RemindrError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::UnrecognizedTime(when) => {
                Self::BadClientData(format!("Could not understand the time: `{}`.", when))
            }
            UseCaseError::NotInFuture(due) => {
                Self::BadClientData(format!("The time {} is not in the future.", due))
            }
            UseCaseError::ListNotFound {
                list_name,
                available,
            } => Self::NotFound(format!(
                "The board list: {}, was not found. Available lists: {}",
                list_name,
                available.join(", ")
            )),
            UseCaseError::Board(e) => e.into(),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct ImportedList {
    pub list_name: String,
    pub reminders: Vec<Reminder>,
}

/// Creates one `Reminder` per card of a board list, all due at the same time
#[derive(Debug)]
pub struct ImportBoardListUseCase {
    pub owner_id: String,
    pub list_name: String,
    pub when: String,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ImportBoardListUseCase {
    type Response = ImportedList;

    type Error = UseCaseError;

    const NAME: &'static str = "ImportBoardList";

    async fn execute(&mut self, ctx: &RemindrContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let tz = ctx.config.timezone;
        let due_at = parse_time_expression(&self.when, now, &tz)
            .ok_or_else(|| UseCaseError::UnrecognizedTime(self.when.clone()))?;
        if due_at <= now {
            return Err(UseCaseError::NotInFuture(format_datetime(due_at, &tz)));
        }

        let (board, board_id) = configured_board(ctx).map_err(UseCaseError::Board)?;
        let lists = board
            .get_lists(&board_id)
            .await
            .map_err(|e| UseCaseError::Board(BoardError::Unreachable(e)))?;
        let wanted = self.list_name.trim().to_lowercase();
        let list = match lists.iter().find(|l| l.name.to_lowercase() == wanted) {
            Some(list) => list.clone(),
            None => {
                return Err(UseCaseError::ListNotFound {
                    list_name: self.list_name.clone(),
                    available: lists.into_iter().map(|l| l.name).collect(),
                })
            }
        };

        let cards = board
            .get_cards(&list.id)
            .await
            .map_err(|e| UseCaseError::Board(BoardError::Unreachable(e)))?;
        let drafts = cards
            .into_iter()
            .map(|card| {
                let mut draft = ReminderDraft::new(self.owner_id.clone(), card.name, due_at);
                draft.context = Some(format!("Imported from board: {}", list.name));
                draft.link = card.url;
                draft.tag = Some("Trello".into());
                draft.external_card_id = Some(card.id);
                draft
            })
            .collect::<Vec<_>>();

        let reminders = ctx
            .store
            .update(|reminders| {
                let changed = !drafts.is_empty();
                (append_drafts(reminders, drafts, now), changed)
            })
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(ImportedList {
            list_name: list.name,
            reminders,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::{paris_millis, setup, OWNER};
    use remindr_domain::BoardCard;

    fn usecase(list_name: &str) -> ImportBoardListUseCase {
        ImportBoardListUseCase {
            owner_id: OWNER.into(),
            list_name: list_name.into(),
            when: "demain 10h".into(),
        }
    }

    fn card(id: &str) -> BoardCard {
        BoardCard {
            id: id.into(),
            name: format!("Card {}", id),
            url: Some(format!("https://trello.com/c/{}", id)),
        }
    }

    #[actix_web::main]
    #[test]
    async fn imports_every_card_of_the_list() {
        let test = setup();
        test.board.set_cards("L1", vec![card("C1"), card("C2")]);

        let res = usecase("backlog").execute(&test.ctx).await.unwrap();
        assert_eq!(res.list_name, "Backlog");
        assert_eq!(res.reminders.len(), 2);
        for reminder in &res.reminders {
            assert_eq!(reminder.owner_id, OWNER);
            assert_eq!(reminder.due_at, paris_millis(2026, 10, 20, 10, 0));
            assert_eq!(reminder.context.as_deref(), Some("Imported from board: Backlog"));
            assert!(reminder.is_board_linked());
        }
        assert_eq!(test.ctx.store.all().await, res.reminders);
    }

    #[actix_web::main]
    #[test]
    async fn importing_twice_creates_new_reminders() {
        let test = setup();
        test.board.set_cards("L1", vec![card("C1")]);
        usecase("Backlog").execute(&test.ctx).await.unwrap();
        usecase("Backlog").execute(&test.ctx).await.unwrap();
        assert_eq!(test.ctx.store.all().await.len(), 2);
    }

    #[actix_web::main]
    #[test]
    async fn empty_list_creates_nothing() {
        let test = setup();
        let res = usecase("Done").execute(&test.ctx).await.unwrap();
        assert!(res.reminders.is_empty());
        assert!(test.ctx.store.all().await.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn unknown_list_reports_available_lists() {
        let test = setup();
        match usecase("Someday").execute(&test.ctx).await {
            Err(UseCaseError::ListNotFound { available, .. }) => {
                assert_eq!(available, vec!["Backlog", "To Do", "Done"])
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[actix_web::main]
    #[test]
    async fn requires_board_configuration() {
        let mut test = setup();
        test.ctx.config.board.board_id = None;
        assert!(matches!(
            usecase("Backlog").execute(&test.ctx).await,
            Err(UseCaseError::Board(BoardError::MissingConfiguration(_)))
        ));
    }
}
