//! Infrastructure layer for toolbridge
//!
//! Adapters for the application ports: the chat completions client, the
//! model-backed docstring extractor, configuration loading, prompt
//! templates, and the bundled demo tools.

pub mod config;
pub mod extraction;
pub mod llm;
pub mod prompt;
pub mod tools;

// Re-export commonly used types
pub use config::{AppConfig, ConfigLoader, DispatchConfig, EndpointConfig};
pub use extraction::LlmDocExtractor;
pub use llm::{ChatClient, ChatMessage};
pub use prompt::{ASSISTANT_TEMPLATE, DOC_EXTRACTOR_PROMPT, render_assistant_prompt};
pub use tools::WeatherForecastTool;
