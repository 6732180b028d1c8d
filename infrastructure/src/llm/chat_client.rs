//! OpenAI-compatible chat completions adapter
//!
//! Implements the [`ModelEndpoint`] port against any `/chat/completions`
//! style API (Groq, OpenAI, local Ollama). The client owns the conversation
//! history: the system message plus every exchanged turn is resubmitted with
//! each request, and the assistant's reply is appended before returning.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, error};

use toolbridge_application::ports::model_endpoint::{EndpointError, ModelEndpoint};

/// One message of the conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

/// Chat completions client for one conversation.
pub struct ChatClient {
    http: reqwest::Client,
    url: String,
    model: String,
    temperature: Option<f64>,
    bearer_token: Option<String>,
    history: Mutex<Vec<ChatMessage>>,
}

impl ChatClient {
    pub fn new(url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
            model: model.into(),
            temperature: None,
            bearer_token: None,
            history: Mutex::new(Vec::new()),
        }
    }

    /// System instruction submitted as the first message of every request.
    pub fn with_system_message(mut self, content: impl Into<String>) -> Self {
        let history = self.history.get_mut();
        history.retain(|m| m.role != "system");
        history.insert(0, ChatMessage::system(content));
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Submit the next user turn and return the assistant's reply.
    ///
    /// If the provider replies with an envelope no content can be extracted
    /// from, the raw body is returned instead.
    pub async fn request(&self, prompt: &str) -> Result<String, EndpointError> {
        let mut history = self.history.lock().await;
        history.push(ChatMessage::user(prompt));

        let body = ChatRequest {
            model: &self.model,
            messages: &history,
            stream: false,
            temperature: self.temperature,
        };

        let mut request = self.http.post(&self.url).json(&body);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| EndpointError::ConnectionError(e.to_string()))?;
        let body_text = response
            .text()
            .await
            .map_err(|e| EndpointError::RequestFailed(e.to_string()))?;
        debug!(body = %body_text, "completion response");

        match extract_content(&body_text) {
            Some(content) => {
                history.push(ChatMessage::assistant(&content));
                Ok(content)
            }
            None => {
                error!(body = %body_text, "no content in completion envelope, returning raw body");
                Ok(body_text)
            }
        }
    }

    /// Number of messages accumulated so far (including the system message).
    pub async fn history_len(&self) -> usize {
        self.history.lock().await.len()
    }
}

/// Pull the assistant text out of a completion envelope.
///
/// Accepts the OpenAI shape (`choices[0].message.content`) and the bare
/// Ollama shape (`message.content`). If multiple choices are returned the
/// first is used.
fn extract_content(body: &str) -> Option<String> {
    let envelope: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = match envelope.get("choices") {
        Some(choices) => choices.get(0)?.get("message")?,
        None => envelope.get("message")?,
    };
    Some(message.get("content")?.as_str()?.to_string())
}

#[async_trait]
impl ModelEndpoint for ChatClient {
    async fn send(&self, prompt: &str) -> Result<String, EndpointError> {
        self.request(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_content_openai_shape() {
        let body = r#"{ "choices": [ { "message": { "role": "assistant", "content": "hello" } } ] }"#;
        assert_eq!(extract_content(body), Some("hello".to_string()));
    }

    #[test]
    fn test_extract_content_first_choice_wins() {
        let body = r#"{ "choices": [
            { "message": { "content": "first" } },
            { "message": { "content": "second" } }
        ] }"#;
        assert_eq!(extract_content(body), Some("first".to_string()));
    }

    #[test]
    fn test_extract_content_bare_message_shape() {
        let body = r#"{ "message": { "role": "assistant", "content": "local reply" } }"#;
        assert_eq!(extract_content(body), Some("local reply".to_string()));
    }

    #[test]
    fn test_extract_content_unparsable_envelope() {
        assert_eq!(extract_content("Internal Server Error"), None);
        assert_eq!(extract_content(r#"{ "error": "rate limited" }"#), None);
    }

    #[tokio::test]
    async fn test_system_message_leads_history() {
        let client = ChatClient::new("http://localhost/v1/chat/completions", "test-model")
            .with_system_message("You are helpful.");
        assert_eq!(client.history_len().await, 1);

        let history = client.history.lock().await;
        assert_eq!(history[0].role, "system");
        assert_eq!(history[0].content, "You are helpful.");
    }

    #[test]
    fn test_chat_request_serialization() {
        let messages = vec![ChatMessage::system("sys"), ChatMessage::user("hi")];
        let body = ChatRequest {
            model: "test-model",
            messages: &messages,
            stream: false,
            temperature: Some(0.1),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "test-model");
        assert_eq!(value["stream"], false);
        assert_eq!(value["temperature"], 0.1);
        assert_eq!(value["messages"][1]["role"], "user");
    }
}
