//! Command-line front end.
//!
//! The CLI is the synchronous caller of the extraction core: it reads the
//! description (argument, `--file` or stdin), rejects empty input before the
//! core ever sees it, and prints the normalised record as JSON on stdout.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use thiserror::Error;

use crate::config::{AppConfig, AppPaths, LlmProvider};
use crate::llm::PromptBuilder;
use crate::meeting::{MeetingClassifier, MeetingType};
use crate::pipeline::MeetingExtractor;

#[derive(Parser, Debug)]
#[command(name = "meeting-record")]
#[command(about = "Extract structured meeting records from free-form descriptions", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use this settings file instead of the platform default
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Extract a meeting record and print it as JSON
    Extract(ExtractCliArgs),
    /// Print the detected meeting type
    Classify(InputArgs),
    /// Print the prompt that would be sent to the model
    Prompt(PromptCliArgs),
    /// Inspect or create the settings file
    Config(ConfigCliArgs),
}

/// Where the meeting description comes from.
#[derive(ClapArgs, Debug)]
pub struct InputArgs {
    /// Meeting description (reads stdin when omitted and no --file is given)
    pub text: Option<String>,
    /// Read the description from a file
    #[arg(short, long, conflicts_with = "text")]
    pub file: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct ExtractCliArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Skip the language model and use the rule-based fallback only
    #[arg(long)]
    pub offline: bool,
    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(ClapArgs, Debug)]
pub struct PromptCliArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Build the prompt for this type key instead of the detected one
    #[arg(long = "type", value_name = "KEY")]
    pub meeting_type: Option<MeetingType>,
}

#[derive(ClapArgs, Debug)]
pub struct ConfigCliArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration as TOML
    Show,
    /// Print the settings file path
    Path,
    /// Write a default settings file if none exists
    Init,
}

// ---------------------------------------------------------------------------
// InputError
// ---------------------------------------------------------------------------

/// Client-side input problems; reported with exit code 2.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("请传递会议描述文本 (meeting description is empty)")]
    Empty,
    #[error("cannot read input: {0}")]
    Read(#[from] io::Error),
}

impl InputArgs {
    /// Resolve the description text, rejecting empty input.
    pub fn read(&self) -> Result<String, InputError> {
        let text = match (&self.text, &self.file) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)?,
            (None, None) => {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };
        validate_input(text)
    }
}

/// Trim surrounding whitespace and reject blank descriptions.
pub fn validate_input(text: String) -> Result<String, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Load settings from `path` (or the platform default) plus env overrides.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let mut config = match path {
        Some(p) => AppConfig::load_from(p)
            .with_context(|| format!("failed to load config from {}", p.display()))?,
        None => AppConfig::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config ({e}); using defaults");
            AppConfig::default()
        }),
    };
    config.apply_env();
    Ok(config)
}

pub async fn handle_extract_command(args: ExtractCliArgs, mut config: AppConfig) -> Result<()> {
    let text = args.input.read()?;
    if args.offline {
        config.llm.provider = LlmProvider::Disabled;
    }

    let extractor = MeetingExtractor::from_config(&config);
    let (record, source) = extractor.extract_with_source(&text).await?;
    log::info!("record source: {}", source.label());

    let json = if args.pretty {
        serde_json::to_string_pretty(&record)?
    } else {
        serde_json::to_string(&record)?
    };
    println!("{json}");
    Ok(())
}

pub fn handle_classify_command(args: InputArgs) -> Result<()> {
    let text = args.read()?;
    let meeting_type = MeetingClassifier::new().classify(&text);
    println!("{}\t{}", meeting_type.key(), meeting_type.display_name());
    Ok(())
}

pub fn handle_prompt_command(args: PromptCliArgs) -> Result<()> {
    let text = args.input.read()?;
    println!("{}", render_prompt(args.meeting_type, &text));
    Ok(())
}

/// Prompt for `text`, classified unless a type is forced.
fn render_prompt(forced: Option<MeetingType>, text: &str) -> String {
    let meeting_type = forced.unwrap_or_else(|| MeetingClassifier::new().classify(text));
    PromptBuilder::new().build_prompt(meeting_type, text)
}

pub fn handle_config_command(
    args: ConfigCliArgs,
    config: &AppConfig,
    path: Option<&Path>,
) -> Result<()> {
    let explicit = path.map(Path::to_path_buf);
    let path = explicit
        .clone()
        .unwrap_or_else(|| AppPaths::new().settings_file);

    match args.command {
        ConfigCommand::Show => {
            print!("{}", toml::to_string_pretty(config)?);
        }
        ConfigCommand::Path => {
            println!("{}", path.display());
        }
        ConfigCommand::Init => {
            if path.exists() {
                println!("Settings already exist at {}", path.display());
            } else {
                match &explicit {
                    Some(p) => AppConfig::default().save_to(p)?,
                    None => AppConfig::default().save()?,
                }
                println!("Wrote default settings to {}", path.display());
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn blank_input_is_rejected() {
        assert!(matches!(validate_input(String::new()), Err(InputError::Empty)));
        assert!(matches!(validate_input(" \n\t ".into()), Err(InputError::Empty)));
    }

    #[test]
    fn input_is_trimmed() {
        assert_eq!(validate_input("  周会 \n".into()).unwrap(), "周会");
    }

    #[test]
    fn reads_text_from_file() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("meeting.txt");
        std::fs::write(&path, "明天培训\n").unwrap();

        let args = InputArgs {
            text: None,
            file: Some(path),
        };
        assert_eq!(args.read().unwrap(), "明天培训");
    }

    #[test]
    fn empty_file_is_an_input_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, "").unwrap();

        let args = InputArgs {
            text: None,
            file: Some(path),
        };
        assert!(matches!(args.read(), Err(InputError::Empty)));
    }

    #[test]
    fn parses_extract_subcommand() {
        let cli = Cli::try_parse_from(["meeting-record", "extract", "--offline", "--pretty", "周会"])
            .expect("parse");
        match cli.command {
            CliCommand::Extract(args) => {
                assert!(args.offline);
                assert!(args.pretty);
                assert_eq!(args.input.text.as_deref(), Some("周会"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn text_and_file_conflict() {
        let parsed =
            Cli::try_parse_from(["meeting-record", "classify", "周会", "--file", "x.txt"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn prompt_type_override_parses_type_key() {
        let cli = Cli::try_parse_from([
            "meeting-record",
            "prompt",
            "--type",
            "client_meeting",
            "周会",
        ])
        .expect("parse");
        match cli.command {
            CliCommand::Prompt(args) => {
                assert_eq!(args.meeting_type, Some(MeetingType::ClientMeeting));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_type_key_is_a_usage_error() {
        let parsed = Cli::try_parse_from(["meeting-record", "prompt", "--type", "standup", "周会"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn forced_type_replaces_detected_type() {
        let text = "本周周会";
        let detected = render_prompt(None, text);
        let forced = render_prompt(Some(MeetingType::ClientMeeting), text);

        assert!(detected.contains(MeetingType::TeamMeeting.display_name()));
        assert!(forced.contains(MeetingType::ClientMeeting.display_name()));
        assert_ne!(detected, forced);
    }

    #[test]
    fn config_init_writes_explicit_path_once() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("settings.toml");
        let args = || ConfigCliArgs {
            command: ConfigCommand::Init,
        };

        handle_config_command(args(), &AppConfig::default(), Some(&path)).expect("init");
        assert!(path.exists());

        std::fs::write(&path, "[fallback]\ndefault_year = 2030\n").unwrap();
        handle_config_command(args(), &AppConfig::default(), Some(&path)).expect("re-init");
        let cfg = AppConfig::load_from(&path).expect("load");
        assert_eq!(cfg.fallback.default_year, 2030, "existing file is not overwritten");
    }

    #[test]
    fn explicit_config_path_is_loaded() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[fallback]\ndefault_year = 2031\n").unwrap();

        let cfg = load_config(Some(&path)).expect("load");
        assert_eq!(cfg.fallback.default_year, 2031);
    }

    #[tokio::test]
    async fn offline_extract_succeeds() {
        let args = ExtractCliArgs {
            input: InputArgs {
                text: Some("2025年03月10日 14:00-16:00 在会议室开周会".into()),
                file: None,
            },
            offline: true,
            pretty: false,
        };
        handle_extract_command(args, AppConfig::default())
            .await
            .expect("offline extraction never fails");
    }
}
