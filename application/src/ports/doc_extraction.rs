//! Doc Extraction port
//!
//! Turns a cleaned docstring into a summary plus per-argument descriptions.
//! The implementation may itself be model-backed and is not guaranteed
//! deterministic; tool validation catches its failures (fabricated
//! summaries, missing argument entries).

use async_trait::async_trait;
use thiserror::Error;
use toolbridge_domain::ParsedDoc;

use super::model_endpoint::EndpointError;

/// Errors that can occur during documentation extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error(transparent)]
    Endpoint(#[from] EndpointError),

    #[error("Invalid extraction payload: {0}")]
    InvalidPayload(String),
}

/// Extracts `{summary, args}` from a tool's free-form docstring.
#[async_trait]
pub trait DocExtraction: Send + Sync {
    async fn extract(&self, docstring: &str) -> Result<ParsedDoc, ExtractionError>;
}
