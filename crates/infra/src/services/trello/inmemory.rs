use super::IBoardClient;
use remindr_domain::{Board, BoardCard, BoardList, BoardWebhook};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
struct BoardState {
    board: Option<Board>,
    lists: Vec<BoardList>,
    cards: HashMap<String, Vec<BoardCard>>,
    webhooks: Vec<BoardWebhook>,
    moves: Vec<(String, String)>,
    failing: bool,
}

/// Board living in memory, used when testing. It can be switched into a
/// failing mode where every call errors.
#[derive(Default)]
pub struct InMemoryBoardClient {
    state: Mutex<BoardState>,
}

impl InMemoryBoardClient {
    pub fn new(board: Board, lists: Vec<BoardList>) -> Self {
        let client = Self::default();
        {
            let mut state = client.state();
            state.board = Some(board);
            state.lists = lists;
        }
        client
    }

    fn state(&self) -> std::sync::MutexGuard<'_, BoardState> {
        match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn check(&self) -> anyhow::Result<std::sync::MutexGuard<'_, BoardState>> {
        let state = self.state();
        if state.failing {
            return Err(anyhow::Error::msg("Board is unavailable"));
        }
        Ok(state)
    }

    pub fn set_cards(&self, list_id: &str, cards: Vec<BoardCard>) {
        self.state().cards.insert(list_id.to_string(), cards);
    }

    pub fn set_failing(&self, failing: bool) {
        self.state().failing = failing;
    }

    pub fn add_webhook(&self, webhook_id: &str) {
        self.state().webhooks.push(BoardWebhook {
            id: webhook_id.to_string(),
        });
    }

    pub fn webhooks(&self) -> Vec<BoardWebhook> {
        self.state().webhooks.clone()
    }

    /// (card id, list id) of every successful move
    pub fn moves(&self) -> Vec<(String, String)> {
        self.state().moves.clone()
    }
}

#[async_trait::async_trait]
impl IBoardClient for InMemoryBoardClient {
    async fn get_board(&self, board_id: &str) -> anyhow::Result<Board> {
        self.check()?
            .board
            .clone()
            .filter(|b| b.id == board_id)
            .ok_or_else(|| anyhow::Error::msg(format!("Board {} not found", board_id)))
    }

    async fn get_lists(&self, _board_id: &str) -> anyhow::Result<Vec<BoardList>> {
        Ok(self.check()?.lists.clone())
    }

    async fn get_cards(&self, list_id: &str) -> anyhow::Result<Vec<BoardCard>> {
        Ok(self.check()?.cards.get(list_id).cloned().unwrap_or_default())
    }

    async fn move_card(&self, card_id: &str, list_id: &str) -> anyhow::Result<()> {
        self.check()?
            .moves
            .push((card_id.to_string(), list_id.to_string()));
        Ok(())
    }

    async fn create_webhook(
        &self,
        _callback_url: &str,
        _model_id: &str,
        _description: &str,
    ) -> anyhow::Result<BoardWebhook> {
        let mut state = self.check()?;
        let webhook = BoardWebhook {
            id: format!("webhook-{}", state.webhooks.len() + 1),
        };
        state.webhooks.push(webhook.clone());
        Ok(webhook)
    }

    async fn delete_webhook(&self, webhook_id: &str) -> anyhow::Result<()> {
        let mut state = self.check()?;
        let before = state.webhooks.len();
        state.webhooks.retain(|w| w.id != webhook_id);
        if state.webhooks.len() == before {
            return Err(anyhow::Error::msg(format!("Webhook {} not found", webhook_id)));
        }
        Ok(())
    }

    async fn list_webhooks(&self) -> anyhow::Result<Vec<BoardWebhook>> {
        Ok(self.check()?.webhooks.clone())
    }
}
