mod board;
mod reminder;
mod status;

pub mod dtos {
    pub use crate::board::dtos::*;
    pub use crate::reminder::dtos::*;
}

pub use crate::board::api::*;
pub use crate::reminder::api::*;
pub use crate::status::api::*;
