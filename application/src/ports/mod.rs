//! Port definitions (interfaces to external collaborators)

pub mod doc_extraction;
pub mod model_endpoint;

pub use doc_extraction::{DocExtraction, ExtractionError};
pub use model_endpoint::{EndpointError, ModelEndpoint};
