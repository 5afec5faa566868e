use crate::{APIResponse, BaseClient};
use remindr_api_structs::*;
use reqwest::{Method, StatusCode};
use std::sync::Arc;

#[derive(Clone)]
pub struct BoardClient {
    base: Arc<BaseClient>,
}

impl BoardClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get_config(&self) -> APIResponse<get_board_config::APIResponse> {
        self.base.get("api/v1/board".into(), StatusCode::OK).await
    }

    pub async fn import_list(
        &self,
        list_name: String,
        when: String,
    ) -> APIResponse<import_board_list::APIResponse> {
        let body = import_board_list::RequestBody { list_name, when };
        self.base
            .post(body, "api/v1/board/import".into(), StatusCode::CREATED)
            .await
    }

    pub async fn setup_webhook(&self) -> APIResponse<setup_board_webhook::APIResponse> {
        self.base
            .post((), "api/v1/board/webhooks".into(), StatusCode::CREATED)
            .await
    }

    pub async fn delete_webhooks(&self) -> APIResponse<delete_board_webhooks::APIResponse> {
        self.base
            .delete("api/v1/board/webhooks".into(), StatusCode::OK)
            .await
    }

    /// The probe the board makes before accepting a webhook callback
    pub async fn probe_webhook(&self) -> APIResponse<String> {
        self.base
            .send_raw(
                Method::HEAD,
                String::new(),
                "webhook/trello".into(),
                StatusCode::OK,
            )
            .await
    }

    /// Delivers a raw board webhook payload as the board would
    pub async fn deliver_webhook(&self, payload: String) -> APIResponse<String> {
        self.base
            .send_raw(Method::POST, payload, "webhook/trello".into(), StatusCode::OK)
            .await
    }
}
