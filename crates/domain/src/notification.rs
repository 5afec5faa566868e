use crate::board::BoardCard;
use crate::reminder::Reminder;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReminderAction {
    Done,
    SnoozeOneHour,
    SnoozeTomorrow,
}

impl ReminderAction {
    fn prefix(&self) -> &'static str {
        match self {
            Self::Done => "done",
            Self::SnoozeOneHour => "snooze1h",
            Self::SnoozeTomorrow => "snoozetomorrow",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Done => "✅ Done",
            Self::SnoozeOneHour => "⏰ +1h",
            Self::SnoozeTomorrow => "📅 Tomorrow",
        }
    }

    /// Parses an action id of the form `<action>_<reminder id>`
    pub fn parse_action_id(action_id: &str) -> Option<(Self, i64)> {
        let mut parts = action_id.splitn(2, '_');
        let action = match parts.next()? {
            "done" => Self::Done,
            "snooze1h" => Self::SnoozeOneHour,
            "snoozetomorrow" => Self::SnoozeTomorrow,
            _ => return None,
        };
        let id = parts.next()?.parse().ok()?;
        Some((action, id))
    }
}

/// An interactive affordance attached to a notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub id: String,
    pub label: String,
}

impl NotificationAction {
    pub fn for_reminder(action: ReminderAction, reminder: &Reminder) -> Self {
        Self {
            id: format!("{}_{}", action.prefix(), reminder.id),
            label: action.label().to_string(),
        }
    }
}

/// A message addressed to a single user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub owner_id: String,
    pub content: String,
    #[serde(default)]
    pub actions: Vec<NotificationAction>,
}

impl Notification {
    pub fn reminder_due(reminder: &Reminder) -> Self {
        let mut content = format!(
            "⏰ **REMINDER** {}\n\n📋 **Task:** {}",
            reminder.priority.emoji(),
            reminder.message
        );
        if let Some(tag) = &reminder.tag {
            content.push_str(&format!("\n🏷️ **Tag:** {}", tag));
        }
        if let Some(context) = &reminder.context {
            content.push_str(&format!("\n\n👤 **Context:** {}", context));
        }
        if let Some(link) = &reminder.link {
            content.push_str(&format!("\n\n🔗 **Link:** {}", link));
        }

        let actions = [
            ReminderAction::Done,
            ReminderAction::SnoozeOneHour,
            ReminderAction::SnoozeTomorrow,
        ]
        .iter()
        .map(|action| NotificationAction::for_reminder(*action, reminder))
        .collect();

        Self {
            owner_id: reminder.owner_id.clone(),
            content,
            actions,
        }
    }

    pub fn card_added(owner_id: &str, card: &BoardCard) -> Self {
        let mut content = format!(
            "🆕 **New board task**\n\n📋 {}\n\n⏰ You will get 2 reminders: at 10:00 and 15:00",
            card.name
        );
        if let Some(url) = &card.url {
            content.push_str(&format!("\n🔗 {}", url));
        }
        Self {
            owner_id: owner_id.to_string(),
            content,
            actions: Vec::new(),
        }
    }

    pub fn card_completed(owner_id: &str, card: &BoardCard, deleted: usize) -> Self {
        Self {
            owner_id: owner_id.to_string(),
            content: format!(
                "✅ **Board task done**\n\n📋 {}\n\n{} reminder(s) removed",
                card.name, deleted
            ),
            actions: Vec::new(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{ReminderDraft, ID};

    #[test]
    fn due_notification_carries_actions() {
        let mut draft = ReminderDraft::new("42".into(), "Pay invoice".into(), 10);
        draft.tag = Some("Accounting".into());
        let reminder = draft.into_reminder(ID::new(1234), 0);

        let notification = Notification::reminder_due(&reminder);
        assert_eq!(notification.owner_id, "42");
        assert!(notification.content.contains("Pay invoice"));
        assert!(notification.content.contains("Accounting"));
        let ids = notification
            .actions
            .iter()
            .map(|a| a.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["done_1234", "snooze1h_1234", "snoozetomorrow_1234"]);
    }

    #[test]
    fn parses_action_ids() {
        assert_eq!(
            ReminderAction::parse_action_id("snooze1h_1234"),
            Some((ReminderAction::SnoozeOneHour, 1234))
        );
        assert_eq!(ReminderAction::parse_action_id("done_x"), None);
        assert_eq!(ReminderAction::parse_action_id("archive_1"), None);
    }
}
