//! Field normaliser: turns any partial record into a complete [`MeetingRecord`].
//!
//! Input is the loosely-typed JSON a language model (or anything else)
//! produced.  Rules:
//!
//! * missing or `null` scalar fields become [`PLACEHOLDER_NONE`];
//! * non-string scalars keep their JSON text, arrays of strings are joined
//!   with `,`;
//! * a non-array `agenda` becomes an empty list, object entries become
//!   [`AgendaItem`]s with missing sub-fields set to [`PLACEHOLDER_NONE`],
//!   bare strings become an item with that title, anything else is dropped;
//! * `meeting_type` falls back to the default type when absent or unknown and
//!   `meeting_type_display` is always derived from it.
//!
//! The function is total and idempotent.

use serde_json::Value;

use crate::meeting::kind::MeetingType;
use crate::meeting::record::{AgendaItem, MeetingRecord, PLACEHOLDER_NONE};

/// Normalise a partial record (normally a JSON object) into a full record.
///
/// A non-object `partial` is treated as an empty object.
pub fn normalize(partial: &Value) -> MeetingRecord {
    let field = |name: &str| scalar_field(partial.get(name));

    let meeting_type = partial
        .get("meeting_type")
        .and_then(Value::as_str)
        .and_then(MeetingType::from_key)
        .unwrap_or_default();

    MeetingRecord {
        meeting_topic: field("meeting_topic"),
        meeting_location: field("meeting_location"),
        meeting_time: field("meeting_time"),
        participants: field("participants"),
        meeting_duration: field("meeting_duration"),
        agenda: agenda_field(partial.get("agenda")),
        global_preparation: field("global_preparation"),
        meeting_type,
        meeting_type_display: meeting_type.display_name().to_string(),
    }
}

fn scalar_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => PLACEHOLDER_NONE.to_string(),
        Some(v) => {
            let text = render_scalar(v);
            if text.trim().is_empty() {
                PLACEHOLDER_NONE.to_string()
            } else {
                text
            }
        }
    }
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(items) => items
            .iter()
            .map(render_scalar)
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

fn agenda_field(value: Option<&Value>) -> Vec<AgendaItem> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::Object(_) => Some(AgendaItem {
                title: scalar_field(item.get("title")),
                leader: scalar_field(item.get("leader")),
                preparation: scalar_field(item.get("preparation")),
                participants: scalar_field(item.get("participants")),
            }),
            Value::String(title) if !title.trim().is_empty() => Some(AgendaItem {
                title: title.clone(),
                leader: PLACEHOLDER_NONE.to_string(),
                preparation: PLACEHOLDER_NONE.to_string(),
                participants: PLACEHOLDER_NONE.to_string(),
            }),
            _ => None,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
