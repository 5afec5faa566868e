use super::IBoardClient;
use remindr_domain::{Board, BoardCard, BoardList, BoardWebhook};
use reqwest::{Client, Method, RequestBuilder};
use crate::services::http_client;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::error;

const TRELLO_API_BASE_URL: &str = "https://api.trello.com/1";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MoveCardRequest<'a> {
    id_list: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateWebhookRequest<'a> {
    #[serde(rename = "callbackURL")]
    callback_url: &'a str,
    id_model: &'a str,
    description: &'a str,
}

pub struct TrelloRestApi {
    client: Client,
    base_url: String,
    api_key: String,
    token: String,
}

impl TrelloRestApi {
    pub fn new(api_key: String, token: String, timeout: Duration) -> Self {
        Self::with_base_url(TRELLO_API_BASE_URL.to_string(), api_key, token, timeout)
    }

    pub fn with_base_url(
        base_url: String,
        api_key: String,
        token: String,
        timeout: Duration,
    ) -> Self {
        Self {
            client: http_client(timeout),
            base_url,
            api_key,
            token,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, &format!("{}/{}", self.base_url, path))
            .query(&[("key", &self.api_key), ("token", &self.token)])
    }

    async fn send(
        &self,
        method: Method,
        request: RequestBuilder,
    ) -> anyhow::Result<reqwest::Response> {
        match request.send().await {
            Ok(res) => res.error_for_status().map_err(|e| {
                error!(
                    "[Unexpected Response] Trello API {} error. Error message: {:?}",
                    method, e
                );
                anyhow::Error::new(e)
            }),
            Err(e) => {
                error!(
                    "[Network Error] Trello API {} error. Error message: {:?}",
                    method, e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: String) -> anyhow::Result<T> {
        let res = self.send(Method::GET, self.request(Method::GET, &path)).await?;
        res.json::<T>().await.map_err(|e| {
            error!(
                "[Unexpected Response] Trello API GET error. Error message: {:?}",
                e
            );
            anyhow::Error::new(e)
        })
    }
}

#[async_trait::async_trait]
impl IBoardClient for TrelloRestApi {
    async fn get_board(&self, board_id: &str) -> anyhow::Result<Board> {
        self.get(format!("boards/{}", board_id)).await
    }

    async fn get_lists(&self, board_id: &str) -> anyhow::Result<Vec<BoardList>> {
        self.get(format!("boards/{}/lists", board_id)).await
    }

    async fn get_cards(&self, list_id: &str) -> anyhow::Result<Vec<BoardCard>> {
        self.get(format!("lists/{}/cards", list_id)).await
    }

    async fn move_card(&self, card_id: &str, list_id: &str) -> anyhow::Result<()> {
        let request = self
            .request(Method::PUT, &format!("cards/{}", card_id))
            .json(&MoveCardRequest { id_list: list_id });
        self.send(Method::PUT, request).await?;
        Ok(())
    }

    async fn create_webhook(
        &self,
        callback_url: &str,
        model_id: &str,
        description: &str,
    ) -> anyhow::Result<BoardWebhook> {
        let request = self
            .request(Method::POST, "webhooks")
            .json(&CreateWebhookRequest {
                callback_url,
                id_model: model_id,
                description,
            });
        let res = self.send(Method::POST, request).await?;
        Ok(res.json::<BoardWebhook>().await?)
    }

    async fn delete_webhook(&self, webhook_id: &str) -> anyhow::Result<()> {
        let request = self.request(Method::DELETE, &format!("webhooks/{}", webhook_id));
        self.send(Method::DELETE, request).await?;
        Ok(())
    }

    async fn list_webhooks(&self) -> anyhow::Result<Vec<BoardWebhook>> {
        self.get(format!("tokens/{}/webhooks", self.token)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> TrelloRestApi {
        TrelloRestApi::with_base_url(
            server.uri(),
            "key".into(),
            "token".into(),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn fetches_lists_with_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/boards/B1/lists"))
            .and(query_param("key", "key"))
            .and(query_param("token", "token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "L1", "name": "To Do", "closed": false },
                { "id": "L2", "name": "Done", "closed": false }
            ])))
            .mount(&server)
            .await;

        let lists = client(&server).get_lists("B1").await.unwrap();
        assert_eq!(lists.len(), 2);
        assert_eq!(lists[1].name, "Done");
    }

    #[tokio::test]
    async fn moves_card_to_list() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/cards/C1"))
            .and(body_partial_json(json!({ "idList": "L2" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "C1" })))
            .expect(1)
            .mount(&server)
            .await;

        client(&server).move_card("C1", "L2").await.unwrap();
    }

    #[tokio::test]
    async fn creates_webhook() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/webhooks"))
            .and(body_partial_json(json!({
                "callbackURL": "https://remindr.test/webhook/trello",
                "idModel": "B1"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "W1" })))
            .mount(&server)
            .await;

        let webhook = client(&server)
            .create_webhook("https://remindr.test/webhook/trello", "B1", "remindr")
            .await
            .unwrap();
        assert_eq!(webhook.id, "W1");
    }

    #[tokio::test]
    async fn error_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/webhooks/W1"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        assert!(client(&server).delete_webhook("W1").await.is_err());
    }

    #[tokio::test]
    async fn hanging_api_fails_after_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/boards/B1/lists"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
            .mount(&server)
            .await;

        let client = TrelloRestApi::with_base_url(
            server.uri(),
            "key".into(),
            "token".into(),
            Duration::from_millis(200),
        );
        let res = tokio::time::timeout(Duration::from_secs(5), client.get_lists("B1")).await;
        assert!(matches!(res, Ok(Err(_))));
    }
}
