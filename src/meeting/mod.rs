//! Meeting domain model.
//!
//! * [`MeetingType`]: the ten fixed meeting categories and their static
//!   keyword / label / template tables.
//! * [`MeetingClassifier`]: keyword scoring that picks a [`MeetingType`].
//! * [`MeetingRecord`] / [`AgendaItem`]: the structured output.
//! * [`normalize`]: completes any partial record.

pub mod classifier;
pub mod kind;
pub mod normalize;
pub mod record;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use classifier::MeetingClassifier;
pub use kind::{AgendaTemplate, MeetingTemplate, MeetingType, UnknownMeetingType};
pub use normalize::normalize;
pub use record::{
    is_placeholder, AgendaItem, MeetingRecord, PLACEHOLDER_NONE, PLACEHOLDER_PENDING,
    REQUIRED_FIELDS,
};
