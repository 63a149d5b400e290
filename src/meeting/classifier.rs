//! Keyword-based meeting-type classification.
//!
//! [`MeetingClassifier`] counts how many of each type's keywords occur in a
//! description and returns the best-scoring [`MeetingType`].  Matching is a
//! plain substring test on the lower-cased text; there is no tokenisation.

use crate::meeting::kind::MeetingType;

// ---------------------------------------------------------------------------
// MeetingClassifier
// ---------------------------------------------------------------------------

/// Scores free text against the per-type keyword sets.
///
/// Ties are broken by canonical order (the first type in
/// [`MeetingType::ALL`] with the highest score wins).  When no keyword
/// matches at all the result is [`MeetingType::TeamMeeting`].
///
/// # Example
/// ```rust
/// use meeting_record::meeting::{MeetingClassifier, MeetingType};
///
/// let classifier = MeetingClassifier::new();
/// assert_eq!(classifier.classify("下午两点开培训会"), MeetingType::TrainingMeeting);
/// assert_eq!(classifier.classify(""), MeetingType::TeamMeeting);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MeetingClassifier;

impl MeetingClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Per-type keyword hit counts, in canonical order.
    pub fn scores(&self, text: &str) -> [(MeetingType, usize); 10] {
        let text = text.to_lowercase();
        MeetingType::ALL.map(|t| {
            let count = t
                .keywords()
                .iter()
                .filter(|kw| text.contains(**kw))
                .count();
            (t, count)
        })
    }

    /// Return the best-matching meeting type for `text`.
    pub fn classify(&self, text: &str) -> MeetingType {
        let scores = self.scores(text);
        log::debug!("classifier: scores = {:?}", scores);

        // `max_by_key` keeps the last maximum, so fold explicitly to keep the first.
        let (best, score) = scores
            .iter()
            .fold((MeetingType::default(), 0), |(best, best_score), &(t, s)| {
                if s > best_score {
                    (t, s)
                } else {
                    (best, best_score)
                }
            });

        if score == 0 {
            MeetingType::default()
        } else {
            best
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
