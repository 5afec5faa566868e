use std::collections::HashMap;
use std::sync::Mutex;

/// Remembers when a notification was last sent for a board card so that a
/// burst of webhook deliveries for the same card produces one notification.
/// Process local and advisory only, it is empty after a restart.
pub struct NotificationDedupCache {
    window_millis: i64,
    last_notified: Mutex<HashMap<String, i64>>,
}

impl NotificationDedupCache {
    pub fn new(window_millis: i64) -> Self {
        Self {
            window_millis,
            last_notified: Mutex::new(HashMap::new()),
        }
    }

    /// Returns true and records `now` when no notification was sent for `key`
    /// during the last window, false otherwise.
    pub fn should_notify(&self, key: &str, now: i64) -> bool {
        let mut last_notified = match self.last_notified.lock() {
            Ok(map) => map,
            Err(poisoned) => poisoned.into_inner(),
        };
        let window = self.window_millis;
        last_notified.retain(|_, last| now - *last <= window);

        if last_notified.contains_key(key) {
            return false;
        }
        last_notified.insert(key.to_string(), now);
        true
    }
}
