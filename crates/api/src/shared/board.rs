use crate::error::RemindrError;
use remindr_infra::{IBoardClient, RemindrContext};
use std::sync::Arc;

/// Reasons a board operation could not be carried out
#[derive(Debug)]
pub enum BoardError {
    MissingConfiguration(&'static str),
    Unreachable(anyhow::Error),
}

impl From<BoardError> for RemindrError {
    fn from(e: BoardError) -> Self {
        match e {
            BoardError::MissingConfiguration(what) => Self::MissingConfiguration(format!(
                "The task board integration needs {} to be configured.",
                what
            )),
            BoardError::Unreachable(e) => Self::BadGateway(e.to_string()),
        }
    }
}

pub fn board_client(ctx: &RemindrContext) -> Result<Arc<dyn IBoardClient>, BoardError> {
    ctx.services
        .board
        .clone()
        .ok_or(BoardError::MissingConfiguration("TRELLO_API_KEY and TRELLO_TOKEN"))
}

/// The board client together with the id of the synchronized board
pub fn configured_board(
    ctx: &RemindrContext,
) -> Result<(Arc<dyn IBoardClient>, String), BoardError> {
    let client = board_client(ctx)?;
    let board_id = ctx
        .config
        .board
        .board_id
        .clone()
        .ok_or(BoardError::MissingConfiguration("TRELLO_BOARD_ID"))?;
    Ok((client, board_id))
}
