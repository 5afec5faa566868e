use crate::error::RemindrError;
use crate::shared::auth::protect_route;
use crate::shared::board::{board_client, BoardError};
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use remindr_api_structs::delete_board_webhooks::APIResponse;
use remindr_infra::RemindrContext;
use tracing::{error, info};

pub async fn delete_board_webhooks_controller(
    http_req: HttpRequest,
    ctx: web::Data<RemindrContext>,
) -> Result<HttpResponse, RemindrError> {
    protect_route(&http_req)?;

    execute(DeleteBoardWebhooksUseCase {}, &ctx)
        .await
        .map(|deleted| HttpResponse::Ok().json(APIResponse { deleted }))
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

/// Removes every webhook registered with the board token. Webhooks that
/// cannot be removed are skipped.
#[derive(Debug)]
pub struct DeleteBoardWebhooksUseCase {}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteBoardWebhooksUseCase {
    type Response = usize;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteBoardWebhooks";

    async fn execute(&mut self, ctx: &RemindrContext) -> Result<Self::Response, Self::Error> {
        let board = board_client(ctx).map_err(UseCaseError::Board)?;
        let webhooks = board
            .list_webhooks()
            .await
            .map_err(|e| UseCaseError::Board(BoardError::Unreachable(e)))?;

        let mut deleted = 0;
        for webhook in webhooks {
            match board.delete_webhook(&webhook.id).await {
                Ok(_) => {
                    info!("Board webhook {} deleted", webhook.id);
                    deleted += 1;
                }
                Err(e) => error!("Unable to delete board webhook {}: {:?}", webhook.id, e),
            }
        }

        ctx.repos
            .webhook_subscriptions
            .save_all(&[])
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        Ok(deleted)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::setup;

    #[actix_web::main]
    #[test]
    async fn deletes_all_webhooks() {
        let test = setup();
        test.board.add_webhook("W1");
        test.board.add_webhook("W2");
        test.ctx
            .repos
            .webhook_subscriptions
            .save_all(&["W1".to_string()])
            .await
            .unwrap();

        let deleted = DeleteBoardWebhooksUseCase {}.execute(&test.ctx).await.unwrap();
        assert_eq!(deleted, 2);
        assert!(test.board.webhooks().is_empty());
        assert!(test.ctx.repos.webhook_subscriptions.load_all().await.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn nothing_to_delete() {
        let test = setup();
        let deleted = DeleteBoardWebhooksUseCase {}.execute(&test.ctx).await.unwrap();
        assert_eq!(deleted, 0);
    }
}
