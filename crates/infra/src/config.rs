use rand::Rng;
use remindr_domain::{LocalTime, Tz};
use std::path::PathBuf;
use tracing::{info, warn};

const SECRET_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                                abcdefghijklmnopqrstuvwxyz\
                                0123456789";

pub fn create_random_secret(secret_len: usize) -> String {
    let mut rng = rand::thread_rng();

    (0..secret_len)
        .map(|_| {
            let idx = rng.gen_range(0..SECRET_CHARSET.len());
            SECRET_CHARSET[idx] as char
        })
        .collect()
}

/// Credentials and identifiers needed to talk to the task board.
/// Every field is optional so that the server can run without the board
/// integration; operations needing a missing field report it to the caller.
#[derive(Debug, Clone, Default)]
pub struct BoardConfig {
    pub api_key: Option<String>,
    pub token: Option<String>,
    /// The board that is synchronized with the reminders
    pub board_id: Option<String>,
    /// Owner of the `Reminder`s created from board events
    pub owner_id: Option<String>,
    /// Publicly reachable base url of this server, used as webhook callback
    pub public_url: Option<String>,
}

impl BoardConfig {
    pub fn credentials(&self) -> Option<(String, String)> {
        match (&self.api_key, &self.token) {
            (Some(key), Some(token)) => Some((key.clone(), token.clone())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// Url receiving notifications. Notifications are only logged when absent.
    pub webhook_url: Option<String>,
    /// Sent in the `remindr-webhook-key` header so that the receiver can
    /// verify the origin of the notification
    pub webhook_key: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    pub reminders_file: PathBuf,
    pub webhook_ids_file: PathBuf,
    /// Timezone used for wall clock times like "tomorrow at 9"
    pub timezone: Tz,
    pub board: BoardConfig,
    pub notifier: NotifierConfig,
    /// Seconds between two runs of the delivery job
    pub delivery_interval_secs: u64,
    /// Timeout of every outgoing http request, kept below
    /// `delivery_interval_secs` so a hanging endpoint cannot stall a delivery run
    pub http_timeout_secs: u64,
    /// How long a sent `Reminder` is kept so that its notification actions
    /// (done / snooze) keep working. Tied to how long the transport keeps
    /// interactive components alive.
    pub sent_retention_millis: i64,
    /// Window in which repeated notifications about the same board card are dropped
    pub notification_dedup_millis: i64,
    pub morning_reminder: LocalTime,
    pub afternoon_reminder: LocalTime,
    /// Target of the "snooze to tomorrow" action
    pub snooze_tomorrow_time: LocalTime,
    pub snooze_millis: i64,
}

fn env_var(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => None,
    }
}

fn valid_url(name: &str) -> Option<String> {
    let value = env_var(name)?;
    match url::Url::parse(&value) {
        Ok(parsed) if parsed.scheme() == "https" || parsed.scheme() == "http" => {
            Some(value.trim_end_matches('/').to_string())
        }
        _ => {
            warn!("The given {}: {} is not a valid http(s) url, ignoring it.", name, value);
            None
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let default_port = 5000;
        let port = match env_var("PORT") {
            None => default_port,
            Some(port) => match port.parse::<usize>() {
                Ok(port) => port,
                Err(_) => {
                    warn!(
                        "The given PORT: {} is not valid, falling back to the default port: {}.",
                        port, default_port
                    );
                    default_port
                }
            },
        };

        let default_timezone = chrono_tz::Europe::Paris;
        let timezone = match env_var("TIMEZONE") {
            None => default_timezone,
            Some(tz) => match tz.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => {
                    warn!(
                        "The given TIMEZONE: {} is not valid, falling back to: {:?}.",
                        tz, default_timezone
                    );
                    default_timezone
                }
            },
        };

        let webhook_key = match env_var("NOTIFIER_WEBHOOK_KEY") {
            Some(key) => key,
            None => {
                info!("Did not find NOTIFIER_WEBHOOK_KEY environment variable. Going to create one.");
                let key = create_random_secret(32);
                info!("Notifier webhook key was generated and set to: {}", key);
                key
            }
        };

        let board = BoardConfig {
            api_key: env_var("TRELLO_API_KEY"),
            token: env_var("TRELLO_TOKEN"),
            board_id: env_var("TRELLO_BOARD_ID"),
            owner_id: env_var("TRELLO_USER_ID"),
            public_url: valid_url("WEBHOOK_URL"),
        };
        if board.credentials().is_none() {
            info!("TRELLO_API_KEY and TRELLO_TOKEN are not both set, board integration is disabled.");
        }

        Self {
            port,
            reminders_file: env_var("REMINDERS_FILE")
                .unwrap_or_else(|| "reminders.json".into())
                .into(),
            webhook_ids_file: env_var("WEBHOOK_IDS_FILE")
                .unwrap_or_else(|| "board-webhooks.json".into())
                .into(),
            timezone,
            board,
            notifier: NotifierConfig {
                webhook_url: valid_url("NOTIFIER_WEBHOOK_URL"),
                webhook_key,
            },
            delivery_interval_secs: 30,
            http_timeout_secs: 10,
            sent_retention_millis: 1000 * 60 * 60,    // 1 hour
            notification_dedup_millis: 1000 * 60 * 5, // 5 minutes
            morning_reminder: LocalTime { hour: 10, minute: 0 },
            afternoon_reminder: LocalTime { hour: 15, minute: 0 },
            snooze_tomorrow_time: LocalTime { hour: 9, minute: 0 },
            snooze_millis: 1000 * 60 * 60, // 1 hour
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
