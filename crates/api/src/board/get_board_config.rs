use crate::error::RemindrError;
use crate::shared::auth::protect_route;
use crate::shared::board::{configured_board, BoardError};
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use remindr_api_structs::dtos::BoardListDTO;
use remindr_api_structs::get_board_config::APIResponse;
use remindr_domain::{Board, BoardList};
use remindr_infra::RemindrContext;

pub async fn get_board_config_controller(
    http_req: HttpRequest,
    ctx: web::Data<RemindrContext>,
) -> Result<HttpResponse, RemindrError> {
    protect_route(&http_req)?;

    execute(GetBoardConfigUseCase {}, &ctx)
        .await
        .map(|(board, lists)| {
            HttpResponse::Ok().json(APIResponse {
                board_id: board.id,
                name: board.name,
                url: board.url,
                lists: lists.into_iter().map(BoardListDTO::new).collect(),
            })
        })
        .map_err(RemindrError::from)
}

#[derive(Debug)]
pub enum UseCaseError {
    Board(BoardError),
}

impl From<UseCaseError> for RemindrError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::Board(e) => e.into(),
        }
    }
}

/// The synchronized board and its lists
#[derive(Debug)]
pub struct GetBoardConfigUseCase {}

#[async_trait::async_trait(?Send)]
impl UseCase for GetBoardConfigUseCase {
    type Response = (Board, Vec<BoardList>);

    type Error = UseCaseError;

    const NAME: &'static str = "GetBoardConfig";

    async fn execute(&mut self, ctx: &RemindrContext) -> Result<Self::Response, Self::Error> {
        let (client, board_id) = configured_board(ctx).map_err(UseCaseError::Board)?;
        let board = client
            .get_board(&board_id)
            .await
            .map_err(|e| UseCaseError::Board(BoardError::Unreachable(e)))?;
        let lists = client
            .get_lists(&board_id)
            .await
            .map_err(|e| UseCaseError::Board(BoardError::Unreachable(e)))?;
        Ok((board, lists))
    }
}
