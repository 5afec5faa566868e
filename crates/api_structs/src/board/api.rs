use crate::dtos::{BoardListDTO, BoardWebhookDTO, ReminderDTO};
use serde::{Deserialize, Serialize};

pub mod import_board_list {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// Name of the board list, matched case-insensitively
        pub list_name: String,
        /// Natural language time at which every imported card is reminded
        pub when: String,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub list_name: String,
        pub reminders: Vec<ReminderDTO>,
    }
}

pub mod get_board_config {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub board_id: String,
        pub name: String,
        pub url: Option<String>,
        pub lists: Vec<BoardListDTO>,
    }
}

pub mod setup_board_webhook {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub webhook: BoardWebhookDTO,
        pub callback_url: String,
    }
}

pub mod delete_board_webhooks {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub deleted: usize,
    }
}

/// Payload posted by Trello to the webhook callback
pub mod receive_board_webhook {
    use remindr_domain::{BoardAction, BoardCard, BoardList};

    use super::*;

    #[derive(Debug, Deserialize, Serialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub action: Option<WebhookAction>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct WebhookAction {
        #[serde(rename = "type")]
        pub action_type: String,
        #[serde(default)]
        pub data: WebhookActionData,
    }

    #[derive(Debug, Deserialize, Serialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct WebhookActionData {
        #[serde(default)]
        pub card: Option<WebhookCard>,
        #[serde(default)]
        pub list: Option<WebhookList>,
        #[serde(default)]
        pub list_after: Option<WebhookList>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct WebhookCard {
        pub id: String,
        #[serde(default)]
        pub name: String,
        #[serde(default)]
        pub short_link: Option<String>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct WebhookList {
        pub id: String,
        pub name: String,
    }

    impl From<WebhookList> for BoardList {
        fn from(list: WebhookList) -> Self {
            Self {
                id: list.id,
                name: list.name,
            }
        }
    }

    impl RequestBody {
        /// The action carried by the payload, if it concerns a card
        pub fn into_board_action(self) -> Option<BoardAction> {
            let action = self.action?;
            let card = action.data.card?;
            let url = card
                .short_link
                .map(|link| format!("https://trello.com/c/{}", link));
            Some(BoardAction {
                kind: action.action_type.as_str().into(),
                card: BoardCard {
                    id: card.id,
                    name: card.name,
                    url,
                },
                list: action.data.list.map(BoardList::from),
                list_after: action.data.list_after.map(BoardList::from),
            })
        }
    }

}
