//! Configuration module for the meeting-record extractor.
//!
//! Provides `AppConfig` (top-level settings), the `LlmConfig` and
//! `FallbackConfig` sections, `AppPaths` for the platform config directory,
//! and TOML persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{
    AppConfig, FallbackConfig, LlmConfig, LlmProvider, ENV_API_KEY, ENV_BASE_URL, ENV_MODEL,
};
