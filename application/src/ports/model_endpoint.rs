//! Model Endpoint port
//!
//! Defines the interface for communicating with the model provider. The
//! adapter owns the conversation history: it submits the system instruction
//! plus the accumulated user/assistant turns and returns one assistant text
//! per call, opaquely managing token and context limits.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while talking to the model provider.
///
/// An unparsable response envelope is deliberately *not* represented here:
/// adapters degrade it to the literal body text (no structured content exists
/// to substitute), so the caller still receives some text.
#[derive(Error, Debug)]
pub enum EndpointError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,
}

/// Gateway to the model provider.
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ModelEndpoint: Send + Sync {
    /// Submit the next user turn and return the assistant's reply text.
    async fn send(&self, prompt: &str) -> Result<String, EndpointError>;
}
