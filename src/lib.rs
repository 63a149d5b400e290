//! Meeting-record extraction.
//!
//! Turns a free-form meeting description into a structured
//! [`MeetingRecord`](meeting::MeetingRecord) using a language model when one
//! is reachable and a deterministic rule-based fallback when it is not.

pub mod cli;
pub mod config;
pub mod fallback;
pub mod llm;
pub mod meeting;
pub mod pipeline;
