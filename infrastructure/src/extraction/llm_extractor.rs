//! Model-backed docstring extraction
//!
//! Implements the [`DocExtraction`] port by asking a (small, cheap) model to
//! pull `{summary, args}` out of a free-form docstring. The reply is not
//! trusted: code fences are stripped, a stray `returns` entry is dropped,
//! and anything unparsable surfaces as an [`ExtractionError`] for the
//! validator to turn into a rejection warning.

use async_trait::async_trait;
use tracing::debug;

use toolbridge_application::ports::doc_extraction::{DocExtraction, ExtractionError};
use toolbridge_domain::ParsedDoc;

use crate::llm::ChatClient;
use crate::prompt::DOC_EXTRACTOR_PROMPT;

/// Doc extraction adapter backed by a chat model.
pub struct LlmDocExtractor {
    client: ChatClient,
}

impl LlmDocExtractor {
    /// Wrap a pre-configured client (model, credentials, endpoint url); the
    /// extraction system prompt is applied here.
    pub fn new(client: ChatClient) -> Self {
        Self {
            client: client.with_system_message(DOC_EXTRACTOR_PROMPT),
        }
    }
}

#[async_trait]
impl DocExtraction for LlmDocExtractor {
    async fn extract(&self, docstring: &str) -> Result<ParsedDoc, ExtractionError> {
        let reply = self.client.request(docstring).await?;
        let payload = strip_code_fence(&reply);
        debug!(%payload, "extraction payload");
        parse_payload(payload)
    }
}

/// Cut a ```` ```json ```` fenced block out of a model reply, if present.
fn strip_code_fence(reply: &str) -> &str {
    let Some(start) = reply.find("```json") else {
        return reply.trim();
    };
    let rest = &reply[start + "```json".len()..];
    let end = rest.find("```").unwrap_or(rest.len());
    rest[..end].trim()
}

/// Parse `{summary, args}` from the extraction reply. Argument order is
/// preserved; a `returns` entry is dropped since only call arguments matter.
fn parse_payload(payload: &str) -> Result<ParsedDoc, ExtractionError> {
    let value: serde_json::Value = serde_json::from_str(payload)
        .map_err(|e| ExtractionError::InvalidPayload(e.to_string()))?;

    let summary = value
        .get("summary")
        .and_then(|s| s.as_str())
        .unwrap_or_default();
    let mut doc = ParsedDoc::new(summary);

    if let Some(args) = value.get("args").and_then(|a| a.as_object()) {
        for (name, description) in args {
            if name == "returns" {
                continue;
            }
            let description = description
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| description.to_string());
            doc = doc.with_arg(name, description);
        }
    }

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fence() {
        let reply = "Here you go:\n```json\n{ \"summary\": \"x\" }\n```\nDone.";
        assert_eq!(strip_code_fence(reply), r#"{ "summary": "x" }"#);
    }

    #[test]
    fn test_strip_code_fence_unterminated() {
        let reply = "```json\n{ \"summary\": \"x\" }";
        assert_eq!(strip_code_fence(reply), r#"{ "summary": "x" }"#);
    }

    #[test]
    fn test_strip_code_fence_absent() {
        assert_eq!(strip_code_fence(" { \"a\": 1 } "), r#"{ "a": 1 }"#);
    }

    #[test]
    fn test_parse_payload_preserves_arg_order() {
        let doc = parse_payload(
            r#"{ "summary": "Prints hello to the user.",
                 "args": { "zeta": "last name first", "alpha": "but order kept" } }"#,
        )
        .unwrap();

        assert_eq!(doc.summary, "Prints hello to the user.");
        assert_eq!(doc.args[0].name, "zeta");
        assert_eq!(doc.args[1].name, "alpha");
    }

    #[test]
    fn test_parse_payload_drops_returns_entry() {
        let doc = parse_payload(
            r#"{ "summary": "Connects to the next available port.",
                 "args": { "minimum": "A port value", "returns": "The new minimum port." } }"#,
        )
        .unwrap();

        assert!(doc.has_arg("minimum"));
        assert!(!doc.has_arg("returns"));
    }

    #[test]
    fn test_parse_payload_malformed() {
        assert!(parse_payload("not json at all").is_err());
    }

    #[test]
    fn test_parse_payload_missing_summary_is_empty() {
        let doc = parse_payload(r#"{ "args": {} }"#).unwrap();
        assert!(doc.summary.is_empty());
    }
}
