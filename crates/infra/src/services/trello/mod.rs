mod inmemory;
mod rest_api;

pub use inmemory::InMemoryBoardClient;
use remindr_domain::{Board, BoardCard, BoardList, BoardWebhook};
pub use rest_api::TrelloRestApi;

/// Operations used on the external task board
#[async_trait::async_trait]
pub trait IBoardClient: Send + Sync {
    async fn get_board(&self, board_id: &str) -> anyhow::Result<Board>;
    async fn get_lists(&self, board_id: &str) -> anyhow::Result<Vec<BoardList>>;
    async fn get_cards(&self, list_id: &str) -> anyhow::Result<Vec<BoardCard>>;
    async fn move_card(&self, card_id: &str, list_id: &str) -> anyhow::Result<()>;
    async fn create_webhook(
        &self,
        callback_url: &str,
        model_id: &str,
        description: &str,
    ) -> anyhow::Result<BoardWebhook>;
    async fn delete_webhook(&self, webhook_id: &str) -> anyhow::Result<()>;
    /// All webhooks registered with the current token
    async fn list_webhooks(&self) -> anyhow::Result<Vec<BoardWebhook>>;
}
