//! Rule-based fallback generator.
//!
//! When the language model is unreachable or answers with something that is
//! not a JSON object, [`FallbackGenerator`] builds a complete
//! [`MeetingRecord`] from the source text alone:
//!
//! 1. classify the text;
//! 2. start from the generic base record (two agenda items, `"待确认"`
//!    everywhere else);
//! 3. overlay the type template (topic + agenda);
//! 4. fill remaining placeholders from [`patterns::scan`];
//! 5. set the default duration when a concrete time was found.
//!
//! The generator never fails, performs no I/O and is deterministic.

pub mod patterns;

use crate::config::FallbackConfig;
use crate::meeting::{
    is_placeholder, AgendaItem, MeetingClassifier, MeetingRecord, MeetingType,
    PLACEHOLDER_PENDING,
};

const BASE_AGENDA: [(&str, &str, &str, &str); 2] = [
    ("议题1：工作总结与安排", "项目经理", "准备工作总结材料", "全体成员"),
    ("议题2：问题讨论与解决", "技术负责人", "整理遇到的技术问题", "相关技术人员"),
];

const BASE_GLOBAL_PREPARATION: &str = "准备相关文档和资料";

// ---------------------------------------------------------------------------
// FallbackGenerator
// ---------------------------------------------------------------------------

/// Builds a plausible record from keywords and regular expressions.
///
/// # Example
/// ```rust
/// use meeting_record::fallback::FallbackGenerator;
///
/// let generator = FallbackGenerator::default();
/// let record = generator.generate("2025年03月10日 14:00-16:00 在会议室开周会");
/// assert_eq!(record.meeting_time, "2025年03月10日 14:00-16:00");
/// assert_eq!(record.meeting_location, "会议室");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FallbackGenerator {
    classifier: MeetingClassifier,
    config: FallbackConfig,
}

impl FallbackGenerator {
    pub fn new(config: FallbackConfig) -> Self {
        Self {
            classifier: MeetingClassifier::new(),
            config,
        }
    }

    /// Produce a complete record for `text`.
    pub fn generate(&self, text: &str) -> MeetingRecord {
        let meeting_type = self.classifier.classify(text);
        let mut record = base_record(meeting_type);

        let template = meeting_type.template();
        record.meeting_topic = template.topic.to_string();
        record.agenda = template.agenda.iter().map(AgendaItem::from).collect();

        let found = patterns::scan(text, self.config.default_year);
        let time_found = found.meeting_time.is_some();

        fill(&mut record.meeting_topic, found.meeting_topic);
        fill(&mut record.meeting_location, found.meeting_location);
        fill(&mut record.meeting_time, found.meeting_time);
        fill(&mut record.participants, found.participants);
        if time_found {
            fill(
                &mut record.meeting_duration,
                Some(self.config.default_duration.clone()),
            );
        }

        log::debug!(
            "fallback: type={} time_found={} location={}",
            meeting_type,
            time_found,
            record.meeting_location
        );
        record
    }
}

/// The generic record every fallback starts from.
fn base_record(meeting_type: MeetingType) -> MeetingRecord {
    let mut record = MeetingRecord::placeholder(meeting_type, PLACEHOLDER_PENDING);
    record.agenda = BASE_AGENDA
        .iter()
        .map(|(title, leader, preparation, participants)| AgendaItem {
            title: title.to_string(),
            leader: leader.to_string(),
            preparation: preparation.to_string(),
            participants: participants.to_string(),
        })
        .collect();
    record.global_preparation = BASE_GLOBAL_PREPARATION.to_string();
    record
}

/// Overwrite `slot` with `value` only while `slot` still holds a placeholder.
fn fill(slot: &mut String, value: Option<String>) {
    if let Some(value) = value {
        if is_placeholder(slot) {
            *slot = value;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
