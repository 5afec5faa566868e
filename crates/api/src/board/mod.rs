mod delete_board_webhooks;
mod get_board_config;
mod import_board_list;
mod reconcile_board_event;
mod setup_board_webhook;

use actix_web::web;
use delete_board_webhooks::delete_board_webhooks_controller;
use get_board_config::get_board_config_controller;
use import_board_list::import_board_list_controller;
pub use reconcile_board_event::{board_webhook_controller, board_webhook_head_controller};
use setup_board_webhook::setup_board_webhook_controller;

/// Path of the webhook callback registered on the board, outside of the api scope
pub const BOARD_WEBHOOK_PATH: &str = "/webhook/trello";

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/board", web::get().to(get_board_config_controller));
    cfg.route("/board/import", web::post().to(import_board_list_controller));
    cfg.route(
        "/board/webhooks",
        web::post().to(setup_board_webhook_controller),
    );
    cfg.route(
        "/board/webhooks",
        web::delete().to(delete_board_webhooks_controller),
    );
}

pub fn configure_webhook_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        BOARD_WEBHOOK_PATH,
        web::head().to(board_webhook_head_controller),
    );
    cfg.route(BOARD_WEBHOOK_PATH, web::post().to(board_webhook_controller));
}
