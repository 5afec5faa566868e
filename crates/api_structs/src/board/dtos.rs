use remindr_domain::{BoardList, BoardWebhook};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoardListDTO {
    pub id: String,
    pub name: String,
}

impl BoardListDTO {
    pub fn new(list: BoardList) -> Self {
        Self {
            id: list.id,
            name: list.name,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoardWebhookDTO {
    pub id: String,
}

impl BoardWebhookDTO {
    pub fn new(webhook: BoardWebhook) -> Self {
        Self { id: webhook.id }
    }
}
