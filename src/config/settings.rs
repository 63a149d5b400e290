//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files.  Sections missing from a
//! file fall back to their defaults.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

/// Environment variable overriding [`LlmConfig::base_url`].
pub const ENV_BASE_URL: &str = "MEETING_RECORD_LLM_BASE_URL";
/// Environment variable overriding [`LlmConfig::model`].
pub const ENV_MODEL: &str = "MEETING_RECORD_LLM_MODEL";
/// Environment variable overriding [`LlmConfig::api_key`].
pub const ENV_API_KEY: &str = "MEETING_RECORD_LLM_API_KEY";

// ---------------------------------------------------------------------------
// LlmProvider
// ---------------------------------------------------------------------------

/// Selects which chat endpoint the model client talks to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LlmProvider {
    /// Ollama running locally, native `/api/chat` endpoint.
    Ollama,
    /// Any OpenAI-compatible REST API (OpenAI, Groq, LM Studio, vLLM …).
    OpenAiCompatible,
    /// No model at all: every extraction uses the rule-based fallback.
    Disabled,
}

impl Default for LlmProvider {
    fn default() -> Self {
        Self::Ollama
    }
}

// ---------------------------------------------------------------------------
// LlmConfig
// ---------------------------------------------------------------------------

/// Settings for the external language-model call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Whether the model is consulted at all.
    pub enabled: bool,

    /// Which backend to use.
    pub provider: LlmProvider,

    /// Base URL of the API endpoint.
    ///
    /// - Ollama default: `http://localhost:11434`
    /// - OpenAI: `https://api.openai.com`
    pub base_url: String,

    /// API key: `None` for local providers.
    pub api_key: Option<String>,

    /// Model identifier sent to the API (e.g. `"llama3:8b"`, `"gpt-4o-mini"`).
    pub model: String,

    /// Sampling temperature (0.0 – 1.0).  Lower = more deterministic.
    pub temperature: f32,

    /// Maximum seconds to wait for a reply before treating the call as failed.
    pub timeout_secs: u64,

    /// Upper bound on generated tokens (OpenAI-compatible only).
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: LlmProvider::default(),
            base_url: "http://localhost:11434".into(),
            api_key: None,
            model: "llama3:8b".into(),
            temperature: 0.3,
            timeout_secs: 60,
            max_tokens: 1024,
        }
    }
}

impl LlmConfig {
    /// `true` when a model call should actually be attempted.
    pub fn is_active(&self) -> bool {
        self.enabled && self.provider != LlmProvider::Disabled
    }
}

// ---------------------------------------------------------------------------
// FallbackConfig
// ---------------------------------------------------------------------------

/// Constants used by the rule-based fallback generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Year assumed for dates written without one (e.g. `3月10日 14:00-15:00`).
    pub default_year: u16,

    /// Duration reported whenever a concrete meeting time was found.
    pub default_duration: String,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            default_year: 2025,
            default_duration: "1-2小时".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use meeting_record::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Language-model settings.
    pub llm: LlmConfig,
    /// Rule-based fallback settings.
    pub fallback: FallbackConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet so
    /// callers never need to special-case a missing file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `MEETING_RECORD_LLM_*` environment overrides.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup (the environment in
    /// production, a map in tests).  Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_BASE_URL) {
            self.llm.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(model) = get(ENV_MODEL) {
            self.llm.model = model;
        }
        if let Some(key) = get(ENV_API_KEY) {
            self.llm.api_key = Some(key);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    /// Verify that a default `AppConfig` can be serialised to TOML and
    /// deserialised back without any data loss.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.llm.provider, loaded.llm.provider);
        assert_eq!(original.llm.base_url, loaded.llm.base_url);
        assert_eq!(original.llm.api_key, loaded.llm.api_key);
        assert_eq!(original.llm.model, loaded.llm.model);
        assert_eq!(original.llm.timeout_secs, loaded.llm.timeout_secs);
        assert_eq!(original.llm.temperature, loaded.llm.temperature);
        assert_eq!(original.fallback, loaded.fallback);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        let default = AppConfig::default();

        assert_eq!(config.llm.model, default.llm.model);
        assert_eq!(config.fallback, default.fallback);
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.llm.provider, LlmProvider::Ollama);
        assert_eq!(cfg.llm.base_url, "http://localhost:11434");
        assert_eq!(cfg.llm.model, "llama3:8b");
        assert!(cfg.llm.api_key.is_none());
        assert!(cfg.llm.is_active());
        assert_eq!(cfg.fallback.default_year, 2025);
        assert_eq!(cfg.fallback.default_duration, "1-2小时");
    }

    /// A file containing only some keys keeps defaults for the rest.
    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[llm]\nmodel = \"qwen2.5:7b\"\n").unwrap();

        let cfg = AppConfig::load_from(&path).expect("load");
        assert_eq!(cfg.llm.model, "qwen2.5:7b");
        assert_eq!(cfg.llm.base_url, "http://localhost:11434");
        assert_eq!(cfg.fallback.default_year, 2025);
    }

    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.llm.provider = LlmProvider::OpenAiCompatible;
        cfg.llm.base_url = "https://api.openai.com".into();
        cfg.llm.api_key = Some("sk-test".into());
        cfg.llm.model = "gpt-4o-mini".into();
        cfg.fallback.default_year = 2026;
        cfg.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");
        assert_eq!(loaded.llm.provider, LlmProvider::OpenAiCompatible);
        assert_eq!(loaded.llm.api_key, Some("sk-test".into()));
        assert_eq!(loaded.llm.model, "gpt-4o-mini");
        assert_eq!(loaded.fallback.default_year, 2026);
    }

    #[test]
    fn disabled_provider_is_inactive() {
        let mut cfg = LlmConfig::default();
        cfg.provider = LlmProvider::Disabled;
        assert!(!cfg.is_active());

        let mut cfg = LlmConfig::default();
        cfg.enabled = false;
        assert!(!cfg.is_active());
    }

    #[test]
    fn overrides_replace_llm_settings() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_BASE_URL, "http://gpu-box:11434/"),
            (ENV_MODEL, "qwen2.5:14b"),
            (ENV_API_KEY, ""),
        ]);
        let mut cfg = AppConfig::default();
        cfg.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(cfg.llm.base_url, "http://gpu-box:11434");
        assert_eq!(cfg.llm.model, "qwen2.5:14b");
        assert!(cfg.llm.api_key.is_none(), "empty override must be ignored");
    }
}
