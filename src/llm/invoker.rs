//! Model invoker: one chat call, validated into a partial record.
//!
//! [`ModelInvoker::invoke`] sends the prompt with the fixed system
//! instruction, then checks the reply is non-empty and parses as a JSON
//! object.  Every failure comes back as `Err(LlmError)`; the caller decides
//! what to do with it (the extractor switches to the rule-based fallback).
//! There is exactly one attempt per call.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::llm::client::{LlmError, ModelClient};
use crate::llm::prompt::PromptBuilder;

/// Wraps a [`ModelClient`] with reply validation.
pub struct ModelInvoker {
    client: Arc<dyn ModelClient>,
    system: &'static str,
}

impl ModelInvoker {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self {
            client,
            system: PromptBuilder::new().system_instruction(),
        }
    }

    /// Send `prompt` and return the reply as a JSON object.
    pub async fn invoke(&self, prompt: &str) -> Result<Map<String, Value>, LlmError> {
        let reply = self.client.chat(self.system, prompt).await?;
        parse_reply(&reply)
    }
}

/// Validate and parse a raw assistant reply.
pub fn parse_reply(reply: &str) -> Result<Map<String, Value>, LlmError> {
    let body = strip_code_fence(reply.trim());
    if body.is_empty() {
        return Err(LlmError::EmptyResponse);
    }

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(LlmError::Parse(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => {
            let preview: String = body.chars().take(100).collect();
            log::debug!("llm: unparseable reply: {preview}");
            Err(LlmError::Parse(e.to_string()))
        }
    }
}

/// Body of the first Markdown code fence (```json … ```) in the reply.
///
/// Text before or after the fence is ignored. A reply that already starts
/// with `{` is returned unchanged, so backticks inside JSON strings are safe.
/// An unterminated fence yields everything after the opening marker.
fn strip_code_fence(reply: &str) -> &str {
    if reply.starts_with('{') {
        return reply;
    }
    let Some(start) = reply.find("```") else {
        return reply;
    };
    let after_fence = &reply[start + 3..];
    // Info string such as "json" on the opening line.
    let after_fence = after_fence.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    match after_fence.find("```") {
        Some(end) => after_fence[..end].trim(),
        None => after_fence.trim(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
