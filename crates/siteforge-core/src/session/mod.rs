//! Session domain module.
//!
//! - `id`: session identity resolution and backend affinity (`SessionId`)
//! - `message`: conversation message types (`MessageRole`, `ConversationMessage`)

mod id;
mod message;

pub use id::{PROJECT_PREFIX, SessionId};
pub use message::{ConversationMessage, MessageRole, first_user_message, latest_user_message};
