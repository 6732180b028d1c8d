//! Tool registry and schema markup generation
//!
//! The [`ToolRegistry`] is the in-memory catalog of accepted tools. An entry
//! exists iff the candidate passed validation; rejected candidates are never
//! partially registered. The registry is an explicit instance handed to the
//! dispatch loop at construction, so independent tool sets can coexist in one
//! process; it is read-mostly at request time and mutated during bootstrap.
//!
//! [`ToolRegistry::generate_markup`] projects the catalog into the
//! function-calling schema format the model consumes, regenerated on demand
//! and never cached across mutation:
//!
//! ```json
//! [{
//!   "type": "function",
//!   "function": {
//!     "name": "get_weather_forecast",
//!     "description": "Returns the weather forecast for a specified date",
//!     "parameters": {
//!       "type": "object",
//!       "properties": { "lat": { "type": "float", "description": "..." } },
//!       "required": ["lat", "lon"]
//!     }
//!   }
//! }]
//! ```

use std::sync::Arc;

use serde::Serialize;

use super::entities::ParsedDoc;
use super::traits::Tool;

/// An accepted tool together with its parsed documentation.
#[derive(Clone)]
pub struct RegisteredTool {
    tool: Arc<dyn Tool>,
    doc: ParsedDoc,
}

impl RegisteredTool {
    pub fn new(tool: Arc<dyn Tool>, doc: ParsedDoc) -> Self {
        Self { tool, doc }
    }

    pub fn name(&self) -> &str {
        &self.tool.signature().name
    }

    pub fn tool(&self) -> &Arc<dyn Tool> {
        &self.tool
    }

    pub fn doc(&self) -> &ParsedDoc {
        &self.doc
    }
}

/// One entry of the generated schema markup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaEntry {
    #[serde(rename = "type")]
    pub entry_type: &'static str,
    pub function: FunctionSchema,
}

/// The `function` object of a schema entry.
///
/// `parameters` serializes as `null` for tools without documented arguments,
/// so the field is kept even when `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionSchema {
    pub name: String,
    pub description: String,
    pub parameters: Option<ParameterSchema>,
}

/// Object schema describing a tool's parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSchema {
    #[serde(rename = "type")]
    pub schema_type: &'static str,
    /// Property order follows the documentation's argument order
    pub properties: serde_json::Map<String, serde_json::Value>,
    /// Exactly the parameters lacking a default value, in declaration order
    pub required: Vec<String>,
}

/// In-memory catalog of accepted tools.
///
/// Entries keep registration order (markup is emitted in that order) and a
/// re-registration under the same name overwrites in place.
#[derive(Default)]
pub struct ToolRegistry {
    entries: Vec<RegisteredTool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register an accepted tool. Last registration wins; a name collision
    /// replaces the existing entry without moving it.
    pub fn register(&mut self, tool: Arc<dyn Tool>, doc: ParsedDoc) {
        let name = tool.signature().name.clone();
        let entry = RegisteredTool::new(tool, doc);
        match self.entries.iter_mut().find(|e| e.name() == name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&RegisteredTool> {
        self.entries.iter().find(|e| e.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all tools. Primarily a testing affordance to isolate repeated
    /// registration runs.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Project the catalog into function-calling schema markup.
    pub fn generate_markup(&self) -> Vec<SchemaEntry> {
        self.entries.iter().map(Self::entry_markup).collect()
    }

    /// Markup as a JSON string, ready to embed verbatim in a system prompt.
    pub fn markup_json(&self) -> String {
        serde_json::to_string(&self.generate_markup()).unwrap_or_else(|_| "[]".to_string())
    }

    fn entry_markup(entry: &RegisteredTool) -> SchemaEntry {
        let signature = entry.tool().signature();
        let doc = entry.doc();

        let parameters = if doc.args.is_empty() {
            None
        } else {
            let mut properties = serde_json::Map::new();
            for arg in &doc.args {
                // Only declared parameters become properties; a stray doc
                // entry the extractor invented is skipped.
                let Some(param) = signature.parameter(&arg.name) else {
                    continue;
                };
                let type_name = param
                    .param_type
                    .as_ref()
                    .map(|t| t.schema_name().to_string())
                    .unwrap_or_else(|| "string".to_string());
                properties.insert(
                    arg.name.clone(),
                    serde_json::json!({
                        "type": type_name,
                        "description": arg.description,
                    }),
                );
            }
            Some(ParameterSchema {
                schema_type: "object",
                properties,
                required: signature
                    .required_parameters()
                    .into_iter()
                    .map(String::from)
                    .collect(),
            })
        };

        SchemaEntry {
            entry_type: "function",
            function: FunctionSchema {
                name: signature.name.clone(),
                description: doc.summary.clone(),
                parameters,
            },
        }
    }
}
