//! Prompt templates
//!
//! Templates ship beside the code and are embedded at compile time. The
//! assistant template carries `{date}` and `{tools}` placeholders; the
//! generated schema markup is embedded verbatim into the latter.

use chrono::NaiveDate;

/// System prompt for the conversational assistant.
pub const ASSISTANT_TEMPLATE: &str = include_str!("../prompts/assistant.md");

/// System prompt for the docstring extraction model.
pub const DOC_EXTRACTOR_PROMPT: &str = include_str!("../prompts/doc_extractor.md");

/// Render the assistant system prompt for today's tool set.
pub fn render_assistant_prompt(date: NaiveDate, tools_markup: &str) -> String {
    ASSISTANT_TEMPLATE
        .replace("{date}", &date.format("%Y-%m-%d").to_string())
        .replace("{tools}", tools_markup)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_are_substituted() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 29).unwrap();
        let rendered = render_assistant_prompt(date, r#"[{"type":"function"}]"#);

        assert!(rendered.contains("2024-07-29"));
        assert!(rendered.contains(r#"[{"type":"function"}]"#));
        assert!(!rendered.contains("{date}"));
        assert!(!rendered.contains("{tools}"));
    }

    #[test]
    fn test_templates_are_nonempty() {
        assert!(!ASSISTANT_TEMPLATE.trim().is_empty());
        assert!(!DOC_EXTRACTOR_PROMPT.trim().is_empty());
    }
}
