//! Application use cases

pub mod dispatch;
pub mod register_tool;

pub use dispatch::{ConversationDispatcher, DispatchError, FALLBACK_INSTRUCTION};
pub use register_tool::{RegistrationWarnings, register_tool};
