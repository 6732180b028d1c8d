//! Application layer for toolbridge
//!
//! This crate contains use cases and port definitions. It depends only on
//! the domain layer; adapters for the ports live in the infrastructure
//! layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    doc_extraction::{DocExtraction, ExtractionError},
    model_endpoint::{EndpointError, ModelEndpoint},
};
pub use use_cases::{
    dispatch::{ConversationDispatcher, DispatchError, FALLBACK_INSTRUCTION},
    register_tool::{RegistrationWarnings, register_tool},
};
