//! The structured meeting record handed to the document renderer.

use serde::{Deserialize, Serialize};

use crate::meeting::kind::{AgendaTemplate, MeetingType};

/// Sentinel written by the field normaliser for a field the model omitted.
pub const PLACEHOLDER_NONE: &str = "无";

/// Sentinel written by the fallback generator for a field it could not find.
///
/// Deliberately distinct from [`PLACEHOLDER_NONE`]; renderers check for both.
pub const PLACEHOLDER_PENDING: &str = "待确认";

/// Returns `true` when `value` is one of the "unknown" sentinels (or blank).
pub fn is_placeholder(value: &str) -> bool {
    let v = value.trim();
    v.is_empty() || v == PLACEHOLDER_NONE || v == PLACEHOLDER_PENDING
}

/// Names of the seven fields every record must carry, in output order.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "meeting_topic",
    "meeting_location",
    "meeting_time",
    "participants",
    "meeting_duration",
    "agenda",
    "global_preparation",
];

// ---------------------------------------------------------------------------
// AgendaItem
// ---------------------------------------------------------------------------

/// One discussion topic within a meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaItem {
    pub title: String,
    pub leader: String,
    pub preparation: String,
    pub participants: String,
}

impl From<&AgendaTemplate> for AgendaItem {
    fn from(t: &AgendaTemplate) -> Self {
        Self {
            title: t.title.to_string(),
            leader: t.leader.to_string(),
            preparation: t.preparation.to_string(),
            participants: t.participants.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// MeetingRecord
// ---------------------------------------------------------------------------

/// Fully populated meeting record.
///
/// No field is ever absent: unknown values hold a placeholder sentinel and
/// `agenda` is always a (possibly empty) list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingRecord {
    pub meeting_topic: String,
    pub meeting_location: String,
    pub meeting_time: String,
    pub participants: String,
    pub meeting_duration: String,
    pub agenda: Vec<AgendaItem>,
    pub global_preparation: String,
    pub meeting_type: MeetingType,
    pub meeting_type_display: String,
}

impl MeetingRecord {
    /// A record of the given type whose scalar fields all hold `placeholder`
    /// and whose agenda is empty.
    pub fn placeholder(meeting_type: MeetingType, placeholder: &str) -> Self {
        Self {
            meeting_topic: placeholder.to_string(),
            meeting_location: placeholder.to_string(),
            meeting_time: placeholder.to_string(),
            participants: placeholder.to_string(),
            meeting_duration: placeholder.to_string(),
            agenda: Vec::new(),
            global_preparation: placeholder.to_string(),
            meeting_type,
            meeting_type_display: meeting_type.display_name().to_string(),
        }
    }
}
