//! Generated weather message

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// State of the repetition-avoidance policy
///
/// `Generated` → (`DuplicateDetected` →) `Retried` | `Disambiguated`.
/// Every state except `DuplicateDetected` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DedupState {
    /// First generation differed from the previous message
    Generated,
    /// First generation repeated the previous message
    DuplicateDetected,
    /// The variation request produced a different message
    Retried,
    /// The retry failed or repeated too; a time prefix was added
    Disambiguated,
}

/// Text comparison used for repetition checks: whitespace-trimmed equality
#[must_use]
pub fn is_repeat(candidate: &str, previous: Option<&str>) -> bool {
    previous.is_some_and(|prev| candidate.trim() == prev.trim())
}

/// Message produced for one update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedMessage {
    pub text: String,
    pub generated_at: DateTime<Utc>,
    /// Terminal dedup state that produced `text`
    pub outcome: DedupState,
}

impl ComposedMessage {
    #[must_use]
    pub fn new(text: impl Into<String>, outcome: DedupState) -> Self {
        Self {
            text: text.into(),
            generated_at: Utc::now(),
            outcome,
        }
    }
}
