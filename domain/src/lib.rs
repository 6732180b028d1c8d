//! Domain layer for toolbridge
//!
//! This crate contains the core entities and logic of the tool-calling
//! engine. It has no dependencies on infrastructure or transport concerns.
//!
//! # Core Concepts
//!
//! - **Tool**: a developer-provided function exposed to the model, declared
//!   with a static [`ToolSignature`] and documented with a docstring.
//! - **Registry**: the catalog of tools that passed validation; projects
//!   itself into the schema markup embedded in the model's instructions.
//! - **Tool call**: a model-emitted JSON object naming a tool and its
//!   arguments, detected by [`ToolCall::parse`].
//! - **Coercion**: permissive conversion of raw call arguments to the
//!   declared parameter types.

pub mod tool;

// Re-export commonly used types
pub use tool::{
    DocArg, ParamType, ParsedDoc, RegisteredTool, SchemaEntry, Tool, ToolCall, ToolError,
    ToolParameter, ToolRegistry, ToolSignature, coerce_argument,
};
