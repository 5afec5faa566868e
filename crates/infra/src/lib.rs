mod config;
mod dedup;
mod repos;
mod services;
mod store;
mod system;

pub use config::{create_random_secret, BoardConfig, Config, NotifierConfig};
pub use dedup::NotificationDedupCache;
pub use repos::{IReminderRepo, IWebhookSubscriptionRepo, Repos};
pub use services::*;
use std::sync::Arc;
use std::time::Duration;
pub use store::ReminderStore;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::info;

#[derive(Clone)]
pub struct Services {
    /// Absent when the board credentials are not configured
    pub board: Option<Arc<dyn IBoardClient>>,
    pub notifier: Arc<dyn INotifier>,
}

#[derive(Clone)]
pub struct RemindrContext {
    pub repos: Repos,
    pub store: Arc<ReminderStore>,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub services: Services,
    pub dedup: Arc<NotificationDedupCache>,
}

impl RemindrContext {
    pub fn new(config: Config, repos: Repos, services: Services, sys: Arc<dyn ISys>) -> Self {
        Self {
            store: Arc::new(ReminderStore::new(repos.reminders.clone())),
            dedup: Arc::new(NotificationDedupCache::new(config.notification_dedup_millis)),
            repos,
            config,
            sys,
            services,
        }
    }

    /// Context where nothing leaves the process: in memory repositories,
    /// no board and notifications that are only recorded
    pub fn create_inmemory() -> Self {
        Self::new(
            Config::default(),
            Repos::create_inmemory(),
            Services {
                board: None,
                notifier: Arc::new(RecordingNotifier::new()),
            },
            Arc::new(RealSys {}),
        )
    }
}

fn create_services(config: &Config) -> Services {
    let timeout = Duration::from_secs(config.http_timeout_secs);
    let board = config.board.credentials().map(|(api_key, token)| {
        let client: Arc<dyn IBoardClient> = Arc::new(TrelloRestApi::new(api_key, token, timeout));
        client
    });
    let notifier: Arc<dyn INotifier> = match &config.notifier.webhook_url {
        Some(url) => {
            info!("Notifications are posted to {}", url);
            Arc::new(WebhookNotifier::new(
                url.clone(),
                config.notifier.webhook_key.clone(),
                timeout,
            ))
        }
        None => {
            info!("NOTIFIER_WEBHOOK_URL is not set, notifications are only logged.");
            Arc::new(LogNotifier {})
        }
    };
    Services { board, notifier }
}

/// Will setup the infrastructure context given the environment
pub fn setup_context() -> RemindrContext {
    let config = Config::new();
    let repos = Repos::create_file(&config);
    let services = create_services(&config);
    RemindrContext::new(config, repos, services, Arc::new(RealSys {}))
}
