//! Tool domain entities
//!
//! A tool is described by a statically declared [`ToolSignature`] (the
//! integrator writes it out by hand, there is no runtime reflection) plus a
//! [`ParsedDoc`] extracted from its free-form docstring. Model responses that
//! encode an invocation are parsed into [`ToolCall`] values.

use serde::{Deserialize, Serialize};

/// Semantic type of a tool parameter.
///
/// The fixed vocabulary maps to the canonical type names embedded in schema
/// markup (`string`, `integer`, ...). Declared types outside the vocabulary
/// use [`ParamType::Other`] and pass their own name through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
    Float,
    Boolean,
    Dictionary,
    Array,
    Enumeration,
    Date,
    Other(String),
}

impl ParamType {
    /// Canonical name used in schema markup.
    pub fn schema_name(&self) -> &str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Float => "float",
            ParamType::Boolean => "boolean",
            ParamType::Dictionary => "dictionary",
            ParamType::Array => "array",
            ParamType::Enumeration => "enumeration",
            ParamType::Date => "date",
            ParamType::Other(name) => name,
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.schema_name())
    }
}

/// One declared parameter of a tool.
///
/// `param_type` is optional so that a candidate missing a type declaration
/// can still be described and named individually in validation warnings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Declared semantic type, if any
    pub param_type: Option<ParamType>,
    /// Whether the parameter carries a default value
    pub has_default: bool,
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            param_type: Some(param_type),
            has_default: false,
        }
    }

    /// A parameter declared without a type. Such a candidate never passes
    /// validation; the variant exists so the warning can name it.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: None,
            has_default: false,
        }
    }

    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }
}

/// Statically declared signature of a tool: ordered parameters plus whether
/// a return type was declared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSignature {
    /// Unique tool name (e.g. "get_weather_forecast")
    pub name: String,
    /// Parameters in declaration order
    pub parameters: Vec<ToolParameter>,
    /// Whether the tool declares a return type
    pub has_return_type: bool,
}

impl ToolSignature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            has_return_type: false,
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn with_return_type(mut self) -> Self {
        self.has_return_type = true;
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Names of parameters without a declared type, in declaration order.
    pub fn untyped_parameters(&self) -> Vec<&str> {
        self.parameters
            .iter()
            .filter(|p| p.param_type.is_none())
            .map(|p| p.name.as_str())
            .collect()
    }

    /// Names of parameters lacking a default value, in declaration order.
    /// These become the `required` list of the schema markup, independent of
    /// documentation.
    pub fn required_parameters(&self) -> Vec<&str> {
        self.parameters
            .iter()
            .filter(|p| !p.has_default)
            .map(|p| p.name.as_str())
            .collect()
    }
}

/// One documented argument: name plus free-form description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocArg {
    pub name: String,
    pub description: String,
}

/// Summary and per-argument descriptions extracted from a tool's docstring.
///
/// Argument order is preserved; schema markup properties follow it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDoc {
    /// Summary sentence describing what the tool does
    pub summary: String,
    /// Per-argument descriptions in documentation order
    #[serde(default)]
    pub args: Vec<DocArg>,
}

impl ParsedDoc {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            args: Vec::new(),
        }
    }

    pub fn with_arg(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.args.push(DocArg {
            name: name.into(),
            description: description.into(),
        });
        self
    }

    pub fn arg(&self, name: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.description.as_str())
    }

    pub fn has_arg(&self, name: &str) -> bool {
        self.args.iter().any(|a| a.name == name)
    }
}

/// A model-emitted instruction naming a tool and its arguments.
///
/// Transient: constructed by [`ToolCall::parse`], consumed once by the
/// dispatch loop, discarded after invocation or rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to invoke
    pub name: String,
    /// Raw arguments as received in the call payload
    pub parameters: serde_json::Map<String, serde_json::Value>,
}

impl ToolCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: serde_json::Map::new(),
        }
    }

    pub fn with_parameter(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Detect and parse a tool call from raw model response text.
    ///
    /// A response is an invocable call iff it parses as a single JSON object
    /// carrying a string `name` and an object `parameters`. Anything else
    /// yields `None`: a parse failure just means the model answered in
    /// natural language.
    pub fn parse(response: &str) -> Option<ToolCall> {
        let value: serde_json::Value = serde_json::from_str(response).ok()?;
        let object = value.as_object()?;
        let name = object.get("name")?.as_str()?.to_string();
        let parameters = object.get("parameters")?.as_object()?.clone();
        Some(ToolCall { name, parameters })
    }

    /// Whether the response carries the two-key call shape, regardless of
    /// whether the values make an invocable call. A shaped response that
    /// fails [`ToolCall::parse`] is a call attempt with unusable values, not
    /// natural language.
    pub fn is_call_shaped(response: &str) -> bool {
        serde_json::from_str::<serde_json::Value>(response)
            .ok()
            .and_then(|value| {
                value
                    .as_object()
                    .map(|o| o.contains_key("name") && o.contains_key("parameters"))
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_type_schema_names() {
        assert_eq!(ParamType::String.schema_name(), "string");
        assert_eq!(ParamType::Integer.schema_name(), "integer");
        assert_eq!(ParamType::Dictionary.schema_name(), "dictionary");
        assert_eq!(ParamType::Array.schema_name(), "array");
        assert_eq!(ParamType::Boolean.schema_name(), "boolean");
        assert_eq!(ParamType::Enumeration.schema_name(), "enumeration");
        assert_eq!(ParamType::Float.schema_name(), "float");
        assert_eq!(ParamType::Date.schema_name(), "date");
        // Names outside the fixed vocabulary pass through unchanged
        assert_eq!(ParamType::Other("tuple".into()).schema_name(), "tuple");
    }

    #[test]
    fn test_signature_required_parameters() {
        let sig = ToolSignature::new("join")
            .with_parameter(ToolParameter::new("some_string", ParamType::String))
            .with_parameter(ToolParameter::new("some_other_string", ParamType::String))
            .with_parameter(ToolParameter::new("glue", ParamType::Integer).with_default())
            .with_return_type();

        assert_eq!(
            sig.required_parameters(),
            vec!["some_string", "some_other_string"]
        );
        assert!(sig.untyped_parameters().is_empty());
    }

    #[test]
    fn test_signature_untyped_parameters() {
        let sig = ToolSignature::new("mystery")
            .with_parameter(ToolParameter::untyped("a"))
            .with_parameter(ToolParameter::new("b", ParamType::String))
            .with_parameter(ToolParameter::untyped("c"));

        assert_eq!(sig.untyped_parameters(), vec!["a", "c"]);
    }

    #[test]
    fn test_parsed_doc_lookup() {
        let doc = ParsedDoc::new("Says hello.")
            .with_arg("user", "Name of the user")
            .with_arg("loud", "Whether to shout");

        assert_eq!(doc.arg("user"), Some("Name of the user"));
        assert!(doc.has_arg("loud"));
        assert!(!doc.has_arg("missing"));
    }

    #[test]
    fn test_parse_tool_call() {
        let call = ToolCall::parse(r#"{ "name": "x", "parameters": {} }"#).unwrap();
        assert_eq!(call.name, "x");
        assert!(call.parameters.is_empty());
    }

    #[test]
    fn test_parse_tool_call_with_arguments() {
        let call = ToolCall::parse(
            r#"{ "name": "get_weather_forecast", "parameters": { "lat": "37.7749", "lon": "-122.4194" } }"#,
        )
        .unwrap();
        assert_eq!(call.name, "get_weather_forecast");
        assert_eq!(call.parameters["lat"], "37.7749");
        assert_eq!(call.parameters["lon"], "-122.4194");
    }

    #[test]
    fn test_parse_rejects_prose() {
        assert!(ToolCall::parse("The first president was George Washington.").is_none());
    }

    #[test]
    fn test_parse_rejects_missing_keys() {
        assert!(ToolCall::parse(r#"{ "name": "x" }"#).is_none());
        assert!(ToolCall::parse(r#"{ "parameters": { "year": "2020" } }"#).is_none());
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(ToolCall::parse(r#"["name", "parameters"]"#).is_none());
        assert!(ToolCall::parse("42").is_none());
    }

    #[test]
    fn test_call_shape_ignores_value_types() {
        // Both keys present makes it a call attempt, even with unusable values
        assert!(ToolCall::is_call_shaped(r#"{ "name": 5, "parameters": {} }"#));
        assert!(ToolCall::is_call_shaped(r#"{ "name": "x", "parameters": null }"#));
        assert!(ToolCall::is_call_shaped(r#"{ "name": "x", "parameters": {} }"#));
    }

    #[test]
    fn test_call_shape_rejects_prose_and_partial_objects() {
        assert!(!ToolCall::is_call_shaped("The first president was George Washington."));
        assert!(!ToolCall::is_call_shaped(r#"{ "name": "x" }"#));
        assert!(!ToolCall::is_call_shaped(r#"{ "parameters": {} }"#));
        assert!(!ToolCall::is_call_shaped(r#"["name", "parameters"]"#));
    }
}
