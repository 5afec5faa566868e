mod board;
pub mod date;
mod notification;
mod reminder;
mod shared;
mod time_expression;

pub use board::{
    Board, BoardAction, BoardActionKind, BoardCard, BoardEvent, BoardList, BoardWebhook, ListScope,
};
pub use date::LocalTime;
pub use notification::{Notification, NotificationAction, ReminderAction};
pub use reminder::{append_drafts, sorted_for_listing, Priority, Reminder, ReminderDraft};
pub use shared::entity::ID;
pub use time_expression::parse_time_expression;

pub use chrono_tz::Tz;
