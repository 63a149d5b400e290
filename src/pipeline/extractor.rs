//! Extraction orchestrator: text → classify → prompt → model / fallback → normalise.
//!
//! ```text
//! extract(text)
//!   ├─ MeetingClassifier::classify           → MeetingType
//!   ├─ PromptBuilder::build_prompt           → prompt
//!   ├─ ModelInvoker::invoke (one attempt)
//!   │     ├─ Ok(partial)  → use model output
//!   │     └─ Err(reason)  → warn + FallbackGenerator::generate(text)
//!   ├─ set meeting_type / meeting_type_display from the classifier
//!   └─ normalize                              → MeetingRecord
//! ```
//!
//! A model failure is a normal branch, never an error for the caller.

use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::AppConfig;
use crate::fallback::FallbackGenerator;
use crate::llm::{ApiClient, ModelClient, ModelInvoker, PromptBuilder};
use crate::meeting::{normalize, MeetingClassifier, MeetingRecord};

// ---------------------------------------------------------------------------
// ExtractError
// ---------------------------------------------------------------------------

/// Errors surfaced by [`MeetingExtractor::extract`].
///
/// Model outages are not in this list: they are absorbed by the fallback.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The description was empty or whitespace only.
    #[error("meeting description is empty")]
    EmptyInput,

    /// Unexpected internal failure.
    #[error("extraction failed: {0}")]
    Internal(String),
}

// ---------------------------------------------------------------------------
// ExtractionSource
// ---------------------------------------------------------------------------

/// Which path produced the record (reported for logging and the CLI).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionSource {
    Model,
    Fallback,
}

impl ExtractionSource {
    pub fn label(&self) -> &'static str {
        match self {
            ExtractionSource::Model => "model",
            ExtractionSource::Fallback => "fallback",
        }
    }
}

// ---------------------------------------------------------------------------
// MeetingExtractor
// ---------------------------------------------------------------------------

/// Sequences the extraction pipeline.
///
/// Holds only read-only state, so one extractor can serve concurrent calls.
///
/// ```rust,no_run
/// use meeting_record::config::AppConfig;
/// use meeting_record::pipeline::MeetingExtractor;
///
/// # async fn example() {
/// let extractor = MeetingExtractor::from_config(&AppConfig::default());
/// let record = extractor
///     .extract("3月10日 14:00-15:00 在会议室开周会")
///     .await
///     .unwrap();
/// println!("{}", record.meeting_topic);
/// # }
/// ```
pub struct MeetingExtractor {
    classifier: MeetingClassifier,
    prompts: PromptBuilder,
    invoker: ModelInvoker,
    fallback: FallbackGenerator,
}

impl MeetingExtractor {
    /// Create an extractor around any model client.
    pub fn new(client: Arc<dyn ModelClient>, fallback: FallbackGenerator) -> Self {
        Self {
            classifier: MeetingClassifier::new(),
            prompts: PromptBuilder::new(),
            invoker: ModelInvoker::new(client),
            fallback,
        }
    }

    /// Create an extractor using [`ApiClient`] and the configured fallback constants.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(ApiClient::from_config(&config.llm)),
            FallbackGenerator::new(config.fallback.clone()),
        )
    }

    /// Extract a normalised meeting record from `text`.
    pub async fn extract(&self, text: &str) -> Result<MeetingRecord, ExtractError> {
        self.extract_with_source(text)
            .await
            .map(|(record, _source)| record)
    }

    /// Like [`extract`](Self::extract) but also reports which path was used.
    pub async fn extract_with_source(
        &self,
        text: &str,
    ) -> Result<(MeetingRecord, ExtractionSource), ExtractError> {
        if text.trim().is_empty() {
            return Err(ExtractError::EmptyInput);
        }

        // ── 1. Classify ──────────────────────────────────────────────────
        let meeting_type = self.classifier.classify(text);
        log::info!(
            "extract: classified as {} ({})",
            meeting_type,
            meeting_type.display_name()
        );

        // ── 2. Prompt ────────────────────────────────────────────────────
        let prompt = self.prompts.build_prompt(meeting_type, text);
        log::debug!("extract: prompt is {} chars", prompt.chars().count());

        // ── 3. Model, or fallback on any failure ─────────────────────────
        let (mut partial, source) = match self.invoker.invoke(&prompt).await {
            Ok(partial) => (partial, ExtractionSource::Model),
            Err(e) => {
                log::warn!("extract: model path failed ({e}), using rule-based fallback");
                let record = self.fallback.generate(text);
                (to_partial(&record)?, ExtractionSource::Fallback)
            }
        };

        // ── 4. Annotate type ─────────────────────────────────────────────
        partial.insert(
            "meeting_type".into(),
            Value::String(meeting_type.key().to_string()),
        );
        partial.insert(
            "meeting_type_display".into(),
            Value::String(meeting_type.display_name().to_string()),
        );

        // ── 5. Normalise ─────────────────────────────────────────────────
        let record = normalize(&Value::Object(partial));
        log::info!("extract: record produced by {}", source.label());
        Ok((record, source))
    }
}

fn to_partial(record: &MeetingRecord) -> Result<Map<String, Value>, ExtractError> {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ExtractError::Internal(
            "fallback record did not serialise to an object".into(),
        )),
        Err(e) => Err(ExtractError::Internal(e.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmError;
    use crate::meeting::{MeetingType, PLACEHOLDER_NONE, PLACEHOLDER_PENDING, REQUIRED_FIELDS};
    use async_trait::async_trait;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Always succeeds with a fixed reply.
    struct AlwaysOk(String);

    #[async_trait]
    impl ModelClient for AlwaysOk {
        async fn chat(&self, _system: &str, _user: &str) -> Result<String, LlmError> {
            Ok(self.0.clone())
        }
    }

    /// Always returns the given error.
    struct AlwaysFails(FailureKind);

    #[derive(Clone, Copy)]
    enum FailureKind {
        Request,
        Timeout,
        Http,
        Empty,
        Disabled,
    }

    #[async_trait]
    impl ModelClient for AlwaysFails {
        async fn chat(&self, _system: &str, _user: &str) -> Result<String, LlmError> {
            Err(match self.0 {
                FailureKind::Request => LlmError::Request("connection refused".into()),
                FailureKind::Timeout => LlmError::Timeout,
                FailureKind::Http => LlmError::Http(503),
                FailureKind::Empty => LlmError::EmptyResponse,
                FailureKind::Disabled => LlmError::Disabled,
            })
        }
    }

    fn extractor(client: impl ModelClient + 'static) -> MeetingExtractor {
        MeetingExtractor::new(Arc::new(client), FallbackGenerator::default())
    }

    fn assert_complete(record: &MeetingRecord) {
        let value = serde_json::to_value(record).unwrap();
        for field in REQUIRED_FIELDS {
            assert!(value.get(field).is_some(), "missing {field}");
        }
        assert!(value["agenda"].is_array());
        assert!(value["meeting_type"].is_string());
        assert!(!record.meeting_type_display.is_empty());
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn empty_input_is_rejected() {
        let ex = extractor(AlwaysFails(FailureKind::Request));
        assert!(matches!(ex.extract("").await, Err(ExtractError::EmptyInput)));
        assert!(matches!(ex.extract("  \n ").await, Err(ExtractError::EmptyInput)));
    }

    #[tokio::test]
    async fn never_fails_when_model_is_down() {
        let inputs = [
            "下周三下午三点在三楼会议室开团队周会，参会人：张三、李四",
            "x",
            "2025年03月10日 14:00-16:00",
            "🙂🙂🙂",
            "need a decision on the vendor",
        ];
        for kind in [
            FailureKind::Request,
            FailureKind::Timeout,
            FailureKind::Http,
            FailureKind::Empty,
            FailureKind::Disabled,
        ] {
            let ex = extractor(AlwaysFails(kind));
            for text in inputs {
                let (record, source) = ex.extract_with_source(text).await.unwrap();
                assert_eq!(source, ExtractionSource::Fallback);
                assert_complete(&record);
            }
        }
    }

    #[tokio::test]
    async fn team_meeting_scenario_under_outage() {
        let ex = extractor(AlwaysFails(FailureKind::Request));
        let record = ex
            .extract("下周三下午三点在三楼会议室开团队周会，参会人：张三、李四")
            .await
            .unwrap();

        assert_eq!(record.meeting_type, MeetingType::TeamMeeting);
        assert_eq!(record.meeting_topic, "团队例会");
        assert_eq!(record.meeting_location, "会议室");
        assert!(record.participants.contains("张三"));
        assert_eq!(record.meeting_time, PLACEHOLDER_PENDING);
    }

    #[tokio::test]
    async fn explicit_time_scenario_under_outage() {
        let ex = extractor(AlwaysFails(FailureKind::Timeout));
        let record = ex.extract("2025年03月10日 14:00-16:00").await.unwrap();
        assert_eq!(record.meeting_time, "2025年03月10日 14:00-16:00");
        assert_eq!(record.meeting_duration, "1-2小时");
    }

    #[tokio::test]
    async fn malformed_reply_routes_to_fallback() {
        let ex = extractor(AlwaysOk("好的，会议在周三下午，地点待定".into()));
        let (record, source) = ex
            .extract_with_source("本次需要决策，进行方案评估")
            .await
            .unwrap();

        assert_eq!(source, ExtractionSource::Fallback);
        assert_complete(&record);
        assert_eq!(record.meeting_type, MeetingType::DecisionMeeting);
        let titles: Vec<_> = record.agenda.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["方案对比分析", "决策讨论", "执行计划确认"]);
    }

    #[tokio::test]
    async fn model_reply_is_normalised_and_annotated() {
        let reply = r#"{
            "meeting_topic": "Q3 预算评审",
            "meeting_location": "三楼大会议室",
            "participants": ["张三", "李四"],
            "agenda": "none",
            "meeting_type": "client_meeting"
        }"#;
        let ex = extractor(AlwaysOk(reply.into()));
        let (record, source) = ex
            .extract_with_source("项目预算评审，开发和设计都参加")
            .await
            .unwrap();

        assert_eq!(source, ExtractionSource::Model);
        assert_eq!(record.meeting_topic, "Q3 预算评审");
        assert_eq!(record.meeting_location, "三楼大会议室");
        assert_eq!(record.participants, "张三,李四");
        assert!(record.agenda.is_empty());
        assert_eq!(record.meeting_time, PLACEHOLDER_NONE);
        assert_eq!(record.global_preparation, PLACEHOLDER_NONE);
        // Classifier wins over whatever the model claimed.
        assert_eq!(record.meeting_type, MeetingType::ProjectMeeting);
        assert_eq!(record.meeting_type_display, "项目讨论会");
    }

    #[tokio::test]
    async fn model_pending_sentinel_is_kept() {
        let ex = extractor(AlwaysOk(r#"{"meeting_time": "待确认"}"#.into()));
        let record = ex.extract("周会").await.unwrap();
        assert_eq!(record.meeting_time, PLACEHOLDER_PENDING);
        assert_eq!(record.meeting_location, PLACEHOLDER_NONE);
    }

    #[tokio::test]
    async fn concurrent_extractions_do_not_interfere() {
        let ex = Arc::new(extractor(AlwaysFails(FailureKind::Request)));
        let texts = ["复盘上线事故", "客户提案演示", "新人培训讲座", "季度规划筹备"];

        let handles: Vec<_> = texts
            .iter()
            .map(|text| {
                let ex = Arc::clone(&ex);
                let text = text.to_string();
                tokio::spawn(async move { ex.extract(&text).await.unwrap() })
            })
            .collect();

        let mut types = Vec::new();
        for h in handles {
            types.push(h.await.unwrap().meeting_type);
        }
        assert_eq!(
            types,
            [
                MeetingType::ReviewMeeting,
                MeetingType::ClientMeeting,
                MeetingType::TrainingMeeting,
                MeetingType::PlanningMeeting,
            ]
        );
    }

    #[test]
    fn extractor_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MeetingExtractor>();
    }
}
