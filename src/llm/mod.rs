//! Language-model access for meeting extraction.
//!
//! This module provides:
//! * [`ModelClient`]: async trait implemented by all chat backends.
//! * [`ApiClient`]: Ollama / OpenAI-compatible REST client.
//! * [`ModelInvoker`]: single call + reply validation into a JSON object.
//! * [`PromptBuilder`]: type-specific extraction prompts.
//! * [`LlmError`]: error variants for model operations.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use meeting_record::config::AppConfig;
//! use meeting_record::llm::{ApiClient, ModelInvoker, PromptBuilder};
//! use meeting_record::meeting::MeetingType;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let invoker = ModelInvoker::new(Arc::new(ApiClient::from_config(&config.llm)));
//!
//!     let prompt = PromptBuilder::new().build_prompt(MeetingType::TeamMeeting, "周一上午开周会");
//!     match invoker.invoke(&prompt).await {
//!         Ok(partial) => println!("{}", serde_json::Value::Object(partial)),
//!         Err(e) => eprintln!("model unavailable: {e}"),
//!     }
//! }
//! ```

pub mod client;
pub mod invoker;
pub mod prompt;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{ApiClient, LlmError, ModelClient};
pub use invoker::{parse_reply, ModelInvoker};
pub use prompt::PromptBuilder;
