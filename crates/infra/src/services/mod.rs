mod notifier;
mod trello;

pub use notifier::*;
use reqwest::Client;
use std::time::Duration;
use tracing::error;
pub use trello::*;

/// Http client whose requests fail after `timeout`
fn http_client(timeout: Duration) -> Client {
    Client::builder().timeout(timeout).build().unwrap_or_else(|e| {
        error!(
            "Unable to build http client with a {:?} timeout. Error message: {:?}",
            timeout, e
        );
        Client::new()
    })
}
