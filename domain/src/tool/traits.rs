//! Tool trait and invocation error type
//!
//! The [`Tool`] trait is the integrator contract: a statically declared
//! signature, the raw docstring the signature was documented with, and an
//! async invocation entry point. Implementations live wherever the tool's
//! I/O lives (usually the infrastructure layer).

use async_trait::async_trait;
use thiserror::Error;

use super::entities::ToolSignature;

/// Error raised by a tool's own execution.
///
/// Invocation failures are caught at the dispatch boundary and degrade to an
/// empty result; they never abort the conversation.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// A developer-provided function exposed to the model for structured
/// invocation.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Declared signature: name, typed parameter list, return flag.
    fn signature(&self) -> &ToolSignature;

    /// Raw documentation: a summary sentence plus one description line per
    /// parameter. Validation checks the extracted summary against this text
    /// verbatim.
    fn docstring(&self) -> &str;

    /// Execute the tool with the (already coerced) call arguments.
    async fn invoke(
        &self,
        arguments: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<serde_json::Value, ToolError>;
}
