mod base;
mod board;
mod reminder;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
use board::BoardClient;
pub use reminder::{CreateReminderFromTextInput, CreateReminderInput};
use reminder::ReminderClient;
pub use remindr_api_structs::dtos::*;
pub use remindr_domain::{Priority, ID};
use status::StatusClient;
use std::sync::Arc;

// Domain
pub use remindr_api_structs::dtos::ReminderDTO as Reminder;

/// Remindr Server SDK
///
/// The SDK contains methods for interacting with the Remindr server API on
/// behalf of one owner.
#[derive(Clone)]
pub struct RemindrSDK {
    pub board: BoardClient,
    pub reminder: ReminderClient,
    pub status: StatusClient,
}

impl RemindrSDK {
    pub fn new<T: Into<String>>(address: String, owner_id: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_owner_id(owner_id.into());
        let base = Arc::new(base);
        let board = BoardClient::new(base.clone());
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base);

        Self {
            board,
            reminder,
            status,
        }
    }
}
