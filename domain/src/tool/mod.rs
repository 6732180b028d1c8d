//! Tool System domain module
//!
//! Everything a registered tool is made of: the declared signature and
//! parsed documentation ([`entities`]), the integrator contract ([`traits`]),
//! permissive inbound argument conversion ([`coerce`]), and the catalog with
//! its schema markup projection ([`registry`]).

pub mod coerce;
pub mod entities;
pub mod registry;
pub mod traits;

pub use coerce::{DATE_FORMAT, coerce_argument};
pub use entities::{DocArg, ParamType, ParsedDoc, ToolCall, ToolParameter, ToolSignature};
pub use registry::{FunctionSchema, ParameterSchema, RegisteredTool, SchemaEntry, ToolRegistry};
pub use traits::{Tool, ToolError};
