use super::BOARD_WEBHOOK_PATH;
use crate::error::RemindrError;
use crate::shared::auth::protect_route;
use crate::shared::board::{configured_board, BoardError};
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use remindr_api_structs::dtos::BoardWebhookDTO;
use remindr_api_structs::setup_board_webhook::APIResponse;
use remindr_domain::BoardWebhook;
use remindr_infra::RemindrContext;
use tracing::{error, info};

pub async fn setup_board_webhook_controller(
    http_req: HttpRequest,
    ctx: web::Data<RemindrContext>,
) -> Result<HttpResponse, RemindrError> {
    protect_route(&http_req)?;

    execute(SetupBoardWebhookUseCase {}, &ctx)
        .await
        .map(|res| {
            HttpResponse::Created().json(APIResponse {
                webhook: BoardWebhookDTO::new(res.webhook),
                callback_url: res.callback_url,
            })
        })
        .map_err(RemindrError::from)
}

#[derive(Debug)]
pub enum UseCaseError {
    Board(BoardError),
    StorageError,
}

impl From<UseCaseError> for RemindrError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::Board(e) => e.into(),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct RegisteredWebhook {
    pub webhook: BoardWebhook,
    pub callback_url: String,
}

/// Registers this server as webhook receiver of the synchronized board
#[derive(Debug)]
pub struct SetupBoardWebhookUseCase {}

#[async_trait::async_trait(?Send)]
impl UseCase for SetupBoardWebhookUseCase {
    type Response = RegisteredWebhook;

    type Error = UseCaseError;

    const NAME: &'static str = "SetupBoardWebhook";

    async fn execute(&mut self, ctx: &RemindrContext) -> Result<Self::Response, Self::Error> {
        let (board, board_id) = configured_board(ctx).map_err(UseCaseError::Board)?;
        let public_url = ctx
            .config
            .board
            .public_url
            .as_ref()
            .ok_or(UseCaseError::Board(BoardError::MissingConfiguration(
                "WEBHOOK_URL",
            )))?;
        if ctx.config.board.owner_id.is_none() {
            return Err(UseCaseError::Board(BoardError::MissingConfiguration(
                "TRELLO_USER_ID",
            )));
        }

        let callback_url = format!("{}{}", public_url, BOARD_WEBHOOK_PATH);
        let webhook = board
            .create_webhook(&callback_url, &board_id, "remindr - board sync")
            .await
            .map_err(|e| UseCaseError::Board(BoardError::Unreachable(e)))?;
        info!("Board webhook {} registered for {}", webhook.id, callback_url);

        let mut webhook_ids = ctx.repos.webhook_subscriptions.load_all().await;
        webhook_ids.push(webhook.id.clone());
        if let Err(e) = ctx.repos.webhook_subscriptions.save_all(&webhook_ids).await {
            error!("Unable to remember board webhook {}: {:?}", webhook.id, e);
            return Err(UseCaseError::StorageError);
        }

        Ok(RegisteredWebhook {
            webhook,
            callback_url,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::setup;

    #[actix_web::main]
    #[test]
    async fn registers_webhook_and_remembers_it() {
        let test = setup();
        let res = SetupBoardWebhookUseCase {}.execute(&test.ctx).await.unwrap();
        assert_eq!(res.callback_url, "https://remindr.test/webhook/trello");
        assert_eq!(test.board.webhooks(), vec![res.webhook.clone()]);
        assert_eq!(
            test.ctx.repos.webhook_subscriptions.load_all().await,
            vec![res.webhook.id]
        );
    }

    #[actix_web::main]
    #[test]
    async fn requires_public_url_and_owner() {
        let mut test = setup();
        test.ctx.config.board.public_url = None;
        assert!(matches!(
            SetupBoardWebhookUseCase {}.execute(&test.ctx).await,
            Err(UseCaseError::Board(BoardError::MissingConfiguration("WEBHOOK_URL")))
        ));

        test.ctx.config.board.public_url = Some("https://remindr.test".into());
        test.ctx.config.board.owner_id = None;
        assert!(matches!(
            SetupBoardWebhookUseCase {}.execute(&test.ctx).await,
            Err(UseCaseError::Board(BoardError::MissingConfiguration("TRELLO_USER_ID")))
        ));
        assert!(test.board.webhooks().is_empty());
    }
}
