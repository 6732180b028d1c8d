//! Tool registration use case
//!
//! Validates a candidate tool against its declared signature and extracted
//! documentation, then hands it to the registry. The checks are independent
//! and never short-circuited, so every failure is reported together.
//! Acceptance requires zero warnings; a rejected candidate is logged and
//! discarded, never partially registered.
//!
//! Registration is explicit and ordered, performed during application
//! bootstrap before any dispatch runs; each attempt returns its warning list
//! in addition to logging it.

use std::sync::Arc;

use tracing::{info, warn};

use toolbridge_domain::{Tool, ToolRegistry};

use crate::ports::doc_extraction::DocExtraction;

/// The itemized reasons a candidate tool was rejected.
#[derive(Debug, Clone)]
pub struct RegistrationWarnings {
    pub tool_name: String,
    pub warnings: Vec<String>,
}

impl std::fmt::Display for RegistrationWarnings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Tool `{}` not added. It may not work as expected when included in prompt.",
            self.tool_name
        )?;
        for warning in &self.warnings {
            write!(f, "\n * {}", warning)?;
        }
        Ok(())
    }
}

impl std::error::Error for RegistrationWarnings {}

/// Validate a candidate tool and register it on success.
///
/// Checks:
/// 1. the signature declares a return type;
/// 2. every parameter carries a declared type (missing ones named
///    individually);
/// 3. documentation is present and non-empty;
/// 4. the extracted summary is non-empty and appears verbatim in the raw
///    docstring (guards against the extractor fabricating one), and every
///    declared parameter has a documentation entry.
pub async fn register_tool(
    registry: &mut ToolRegistry,
    extractor: &dyn DocExtraction,
    tool: Arc<dyn Tool>,
) -> Result<(), RegistrationWarnings> {
    let signature = tool.signature();
    let name = signature.name.clone();
    let mut warnings = Vec::new();

    if !signature.has_return_type {
        warnings.push(
            "Missing return type. All tool functions should return a value, \
             to be subsequently used by the model."
                .to_string(),
        );
    }

    let untyped = signature.untyped_parameters();
    if !untyped.is_empty() {
        warnings.push(format!(
            "Missing argument type{} for: `{}`",
            plural_s(untyped.len()),
            untyped.join(", ")
        ));
    }

    let docstring = tool.docstring();
    let mut parsed = None;

    if docstring.trim().is_empty() {
        warnings.push("Missing documentation.".to_string());
    } else {
        match extractor.extract(docstring).await {
            Ok(doc) => {
                if doc.summary.trim().is_empty() {
                    warnings.push("Missing or invalid function summary.".to_string());
                } else if !docstring.contains(&doc.summary) {
                    warnings.push(format!(
                        "Function summary does not match documentation: `{}`",
                        doc.summary
                    ));
                }

                let missing: Vec<&str> = signature
                    .parameters
                    .iter()
                    .filter(|p| !doc.has_arg(&p.name))
                    .map(|p| p.name.as_str())
                    .collect();
                if !missing.is_empty() {
                    warnings.push(format!(
                        "Missing argument summar{} for: `{}`",
                        if missing.len() > 1 { "ies" } else { "y" },
                        missing.join(", ")
                    ));
                }

                parsed = Some(doc);
            }
            Err(e) => {
                warnings.push(format!("Documentation could not be parsed: {}", e));
            }
        }
    }

    if let Some(doc) = parsed
        && warnings.is_empty()
    {
        registry.register(tool, doc);
        info!(tool = %name, "tool passed all checks and was registered");
        Ok(())
    } else {
        let rejection = RegistrationWarnings {
            tool_name: name,
            warnings,
        };
        warn!(tool = %rejection.tool_name, "{}", rejection);
        Err(rejection)
    }
}

fn plural_s(count: usize) -> &'static str {
    if count > 1 { "s" } else { "" }
}
