//! Extraction pipeline for meeting descriptions.
//!
//! # Architecture
//!
//! ```text
//! text
//!   │
//!   ▼
//! MeetingClassifier ──▶ PromptBuilder ──▶ ModelInvoker ──Ok──┐
//!                                              │              │
//!                                             Err             │
//!                                              ▼              │
//!                                      FallbackGenerator ─────┤
//!                                                             ▼
//!                                          annotate type ──▶ normalize ──▶ MeetingRecord
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use meeting_record::config::AppConfig;
//! use meeting_record::pipeline::MeetingExtractor;
//!
//! #[tokio::main]
//! async fn main() {
//!     let extractor = MeetingExtractor::from_config(&AppConfig::default());
//!     let record = extractor
//!         .extract("2025年03月10日 14:00-16:00 在会议室开项目周会，张三、李四参加")
//!         .await
//!         .unwrap();
//!     println!("{}", serde_json::to_string_pretty(&record).unwrap());
//! }
//! ```

pub mod extractor;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use extractor::{ExtractError, ExtractionSource, MeetingExtractor};
