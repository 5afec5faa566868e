use super::INotifier;
use remindr_domain::Notification;
use crate::services::http_client;
use reqwest::Client;
use std::time::Duration;
use tracing::error;

pub const WEBHOOK_KEY_HEADER: &str = "remindr-webhook-key";

/// Posts notifications as JSON to an http endpoint, typically a chat bot
/// relaying them to the user
pub struct WebhookNotifier {
    client: Client,
    url: String,
    key: String,
}

impl WebhookNotifier {
    pub fn new(url: String, key: String, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            url,
            key,
        }
    }
}

#[async_trait::async_trait]
impl INotifier for WebhookNotifier {
    async fn send(&self, notification: &Notification) -> anyhow::Result<()> {
        match self
            .client
            .post(&self.url)
            .header(WEBHOOK_KEY_HEADER, &self.key)
            .json(notification)
            .send()
            .await
        {
            Ok(res) if res.status().is_success() => Ok(()),
            Ok(res) => {
                error!(
                    "[Unexpected Response] Notifier webhook responded with status: {}",
                    res.status()
                );
                Err(anyhow::Error::msg(format!(
                    "Notifier webhook responded with status {}",
                    res.status()
                )))
            }
            Err(e) => {
                error!(
                    "[Network Error] Notifier webhook error. Error message: {:?}",
                    e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remindr_domain::NotificationAction;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn notification() -> Notification {
        Notification {
            owner_id: "42".into(),
            content: "Pay invoice".into(),
            actions: vec![NotificationAction {
                id: "done_1".into(),
                label: "Done".into(),
            }],
        }
    }

    #[tokio::test]
    async fn posts_notification_with_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/notify"))
            .and(header(WEBHOOK_KEY_HEADER, "secret"))
            .and(body_partial_json(json!({
                "ownerId": "42",
                "content": "Pay invoice",
                "actions": [{ "id": "done_1", "label": "Done" }]
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = WebhookNotifier::new(
            format!("{}/notify", server.uri()),
            "secret".into(),
            Duration::from_secs(5),
        );
        assert!(notifier.send(&notification()).await.is_ok());
    }

    #[tokio::test]
    async fn error_status_is_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let notifier = WebhookNotifier::new(server.uri(), "secret".into(), Duration::from_secs(5));
        assert!(notifier.send(&notification()).await.is_err());
    }

    #[tokio::test]
    async fn hanging_endpoint_fails_after_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(204).set_delay(Duration::from_secs(30)))
            .mount(&server)
            .await;

        let notifier =
            WebhookNotifier::new(server.uri(), "secret".into(), Duration::from_millis(200));
        let res = tokio::time::timeout(Duration::from_secs(5), notifier.send(&notification())).await;
        assert!(matches!(res, Ok(Err(_))));
    }
}
