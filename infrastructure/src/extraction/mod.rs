//! Doc extraction adapters

pub mod llm_extractor;

pub use llm_extractor::LlmDocExtractor;
