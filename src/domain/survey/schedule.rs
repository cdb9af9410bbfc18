//! Optional open/close window for accepting responses.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};

/// Open/close schedule; an unset side is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    #[serde(default)]
    pub open_at: Option<Timestamp>,
    #[serde(default)]
    pub close_at: Option<Timestamp>,
}

impl Schedule {
    /// Creates a schedule, rejecting `open_at >= close_at` when both are set.
    pub fn new(
        open_at: Option<Timestamp>,
        close_at: Option<Timestamp>,
    ) -> Result<Self, ValidationError> {
        if let (Some(open), Some(close)) = (open_at, close_at) {
            if !open.is_before(&close) {
                return Err(ValidationError::invalid_format(
                    "schedule",
                    format!("openAt ({}) must be before closeAt ({})", open, close),
                ));
            }
        }
        Ok(Self { open_at, close_at })
    }

    /// A schedule with neither bound set.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Returns true if `now` falls before the opening time.
    pub fn not_started_at(&self, now: Timestamp) -> bool {
        self.open_at.is_some_and(|open| now.is_before(&open))
    }

    /// Returns true if `now` falls after the closing time.
    pub fn ended_at(&self, now: Timestamp) -> bool {
        self.close_at.is_some_and(|close| now.is_after(&close))
    }
}
