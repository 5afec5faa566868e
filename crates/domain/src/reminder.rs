use crate::board::BoardCard;
use crate::shared::entity::ID;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl Priority {
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::High => "🔴",
            Self::Medium => "🟡",
            Self::Low => "🟢",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Priority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" | "haute" => Ok(Self::High),
            "medium" | "moyenne" => Ok(Self::Medium),
            "low" | "basse" => Ok(Self::Low),
            _ => Err(anyhow::Error::msg(format!("Unknown priority: {}", s))),
        }
    }
}

/// A `Reminder` is a message that should be delivered to its owner at `due_at`.
///
/// When `external_card_id` is set the reminder is linked to a card on the
/// task board and its lifecycle is partly driven by board events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: ID,
    /// The user that receives the notification and the only one allowed
    /// to see or modify this `Reminder`
    pub owner_id: String,
    pub message: String,
    /// Timestamp in millis at which the `Reminder` becomes due
    pub due_at: i64,
    pub created_at: i64,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub external_card_id: Option<String>,
    /// Set once the notification has been handed over to the transport
    #[serde(default)]
    pub sent: bool,
    #[serde(default)]
    pub sent_at: Option<i64>,
}

impl Reminder {
    pub fn is_due(&self, now: i64) -> bool {
        !self.sent && self.due_at <= now
    }

    pub fn is_board_linked(&self) -> bool {
        self.external_card_id.is_some()
    }

    pub fn is_linked_to(&self, card_id: &str) -> bool {
        self.external_card_id.as_deref() == Some(card_id)
    }

    /// A sent `Reminder` stays around for `retention` millis so that the
    /// actions attached to its notification keep working.
    pub fn is_expired(&self, now: i64, retention: i64) -> bool {
        if !self.sent {
            return false;
        }
        match self.sent_at {
            Some(sent_at) => now - sent_at > retention,
            None => true,
        }
    }

    pub fn mark_sent(&mut self, now: i64) {
        self.sent = true;
        self.sent_at = Some(now);
    }

    /// Moves the `Reminder` back into the delivery pipeline
    pub fn snooze_until(&mut self, due_at: i64) {
        self.due_at = due_at;
        self.sent = false;
        self.sent_at = None;
    }

    /// Returns true when the card changed something on this `Reminder`
    pub fn refresh_from_card(&mut self, card: &BoardCard) -> bool {
        let link = card.url.clone();
        if self.message == card.name && self.link == link {
            return false;
        }
        self.message = card.name.clone();
        self.link = link;
        true
    }
}

/// Everything needed to create a `Reminder` except the values assigned by the store
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderDraft {
    pub owner_id: String,
    pub message: String,
    pub due_at: i64,
    pub context: Option<String>,
    pub link: Option<String>,
    pub tag: Option<String>,
    pub priority: Priority,
    pub external_card_id: Option<String>,
}

impl ReminderDraft {
    pub fn new(owner_id: String, message: String, due_at: i64) -> Self {
        Self {
            owner_id,
            message,
            due_at,
            context: None,
            link: None,
            tag: None,
            priority: Priority::default(),
            external_card_id: None,
        }
    }

    pub fn into_reminder(self, id: ID, created_at: i64) -> Reminder {
        Reminder {
            id,
            owner_id: self.owner_id,
            message: self.message,
            due_at: self.due_at,
            created_at,
            context: self.context,
            link: self.link,
            tag: self.tag,
            priority: self.priority,
            external_card_id: self.external_card_id,
            sent: false,
            sent_at: None,
        }
    }
}

/// Appends new `Reminder`s to `reminders`, assigning each a fresh id
pub fn append_drafts(
    reminders: &mut Vec<Reminder>,
    drafts: Vec<ReminderDraft>,
    now: i64,
) -> Vec<Reminder> {
    let mut created = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let id = ID::next(reminders.iter().map(|r| &r.id), now);
        let reminder = draft.into_reminder(id, now);
        reminders.push(reminder.clone());
        created.push(reminder);
    }
    created
}

/// Listing order: highest priority first, then earliest due
pub fn sorted_for_listing(reminders: Vec<Reminder>) -> Vec<Reminder> {
    reminders
        .into_iter()
        .sorted_by_key(|r| (r.priority, r.due_at))
        .collect()
}
