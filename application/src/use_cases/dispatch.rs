//! Conversation dispatch loop
//!
//! One [`ConversationDispatcher`] per in-flight client session. It submits
//! the caller's message to the model endpoint, inspects the reply for a tool
//! call, and loops invoke-and-resubmit until the model produces a final,
//! non-tool answer:
//!
//! ```text
//! Start ──> AwaitingResponse ──(no-tool pattern / unknown tool)──> fallback (once)
//!              │        ▲
//!              │        └── resubmit tool result as next user turn
//!              └──(registered call)──> Dispatching: coerce + invoke
//!              └──(plain text)──> Done
//! ```
//!
//! Dispatch is strictly sequential per conversation; each step blocks on the
//! endpoint's reply. Independent conversations run concurrently, each owning
//! its dispatcher and sharing the registry read-only.

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use regex::Regex;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use toolbridge_domain::{RegisteredTool, ToolCall, ToolRegistry, coerce_argument};

use crate::ports::model_endpoint::{EndpointError, ModelEndpoint};

/// Fixed instruction resubmitted when the model claims no tool applies or
/// names a tool that does not exist.
pub const FALLBACK_INSTRUCTION: &str = "Use your training data to respond.";

/// Matches explicit "no tool applies" replies, anchored at the start:
/// "No function available…", "No tool available…", "No function call
/// available…", any casing.
static NO_TOOL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^no.(function|tool).*.available").expect("no-tool pattern is valid")
});

const DEFAULT_MAX_TURNS: usize = 8;
const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors surfaced to the caller of a dispatch.
///
/// Everything else degrades internally: malformed model output is treated as
/// prose, unknown tools trigger the one-shot fallback, and invocation
/// failures become an empty tool result.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error(transparent)]
    Endpoint(#[from] EndpointError),

    #[error("Conversation cancelled")]
    Cancelled,

    #[error("Dispatch loop exhausted after {turns} tool turns")]
    TurnsExhausted {
        turns: usize,
        /// The model's last response, for operator inspection.
        last_response: String,
    },
}

/// Orchestrates one conversation: endpoint calls, tool-call detection,
/// argument coercion, invocation, and result re-submission.
pub struct ConversationDispatcher {
    endpoint: Arc<dyn ModelEndpoint>,
    registry: Arc<ToolRegistry>,
    max_turns: usize,
    call_timeout: Duration,
    cancellation: CancellationToken,
}

impl ConversationDispatcher {
    pub fn new(endpoint: Arc<dyn ModelEndpoint>, registry: Arc<ToolRegistry>) -> Self {
        Self {
            endpoint,
            registry,
            max_turns: DEFAULT_MAX_TURNS,
            call_timeout: DEFAULT_CALL_TIMEOUT,
            cancellation: CancellationToken::new(),
        }
    }

    /// Bound on consecutive tool turns before the loop gives up.
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Per-call deadline applied to every endpoint send and tool invocation.
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Token observed between and during calls so a session can be cancelled
    /// mid-flight.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Handle one caller message and return the model's final text.
    pub async fn handle(&self, user_message: &str) -> Result<String, DispatchError> {
        let mut response = self.send(user_message).await?;
        debug!(%response, "initial model response");

        // If the model claims no tool applies, or calls a tool that is not
        // registered, force it onto its training data. This happens at most
        // once; a second unresolvable reply is returned as-is.
        if NO_TOOL_PATTERN.is_match(&response) || self.is_unresolvable_call(&response) {
            debug!("no usable tool for this request, forcing a training-data answer");
            response = self.send(FALLBACK_INSTRUCTION).await?;
        }

        let mut turns = 0;
        loop {
            let Some(call) = ToolCall::parse(&response) else {
                break;
            };
            let Some(entry) = self.registry.lookup(&call.name) else {
                break;
            };

            if turns >= self.max_turns {
                return Err(DispatchError::TurnsExhausted {
                    turns,
                    last_response: response,
                });
            }
            turns += 1;

            let result = self.invoke_tool(entry, &call).await;
            debug!(tool = %call.name, %result, "tool result");
            response = self.send(&result.to_string()).await?;
            debug!(%response, "model response after tool result");
        }

        Ok(response)
    }

    /// A call attempt that cannot be dispatched: the response carries the
    /// two-key call shape but either the values are unusable (e.g. a
    /// non-string name) or the named tool is not registered. Ordinary prose
    /// never matches.
    fn is_unresolvable_call(&self, response: &str) -> bool {
        ToolCall::is_call_shaped(response)
            && !ToolCall::parse(response).is_some_and(|call| self.registry.contains(&call.name))
    }

    async fn send(&self, prompt: &str) -> Result<String, DispatchError> {
        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => Err(DispatchError::Cancelled),
            result = tokio::time::timeout(self.call_timeout, self.endpoint.send(prompt)) => {
                match result {
                    Ok(reply) => Ok(reply?),
                    Err(_) => Err(EndpointError::Timeout.into()),
                }
            }
        }
    }

    /// Coerce each argument to its declared type and invoke the tool. Any
    /// invocation failure (including timeout) is caught and logged; the
    /// result degrades to `null` and the conversation continues.
    async fn invoke_tool(&self, entry: &RegisteredTool, call: &ToolCall) -> serde_json::Value {
        let signature = entry.tool().signature();
        let mut arguments = serde_json::Map::new();
        for (key, value) in &call.parameters {
            let coerced = match signature.parameter(key).and_then(|p| p.param_type.as_ref()) {
                Some(declared) => coerce_argument(value.clone(), declared),
                None => value.clone(),
            };
            arguments.insert(key.clone(), coerced);
        }

        match tokio::time::timeout(self.call_timeout, entry.tool().invoke(&arguments)).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                warn!(tool = %call.name, error = %e, "tool invocation failed, continuing with empty result");
                serde_json::Value::Null
            }
            Err(_) => {
                warn!(tool = %call.name, "tool invocation timed out, continuing with empty result");
                serde_json::Value::Null
            }
        }
    }
}
