//! Half-open validity intervals for versioned fee rows.
//!
//! A fee row is in force on `date` when `start <= date < end`, where a
//! missing `end` means the row is open-ended.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::EffectiveDate;

/// `[start, end)` with an optional (open) end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidityInterval {
    pub start: EffectiveDate,
    pub end: Option<EffectiveDate>,
}

impl ValidityInterval {
    /// Build an interval, rejecting empty ones (`end <= start`).
    pub fn new(start: EffectiveDate, end: Option<EffectiveDate>) -> Result<Self, CoreError> {
        if let Some(end) = end {
            if end <= start {
                return Err(CoreError::Validation(format!(
                    "effective_end ({end}) must be after effective_start ({start})"
                )));
            }
        }
        Ok(Self { start, end })
    }

    /// An interval that starts on `start` and never ends.
    pub fn open_ended(start: EffectiveDate) -> Self {
        Self { start, end: None }
    }

    /// Whether `date` falls inside the interval.
    pub fn contains(&self, date: EffectiveDate) -> bool {
        self.start <= date && self.end.map_or(true, |end| date < end)
    }

    /// Whether the two intervals share at least one day.
    pub fn overlaps(&self, other: &ValidityInterval) -> bool {
        let self_before_other_ends = other.end.map_or(true, |end| self.start < end);
        let other_before_self_ends = self.end.map_or(true, |end| other.start < end);
        self_before_other_ends && other_before_self_ends
    }
}

impl std::fmt::Display for ValidityInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.end {
            Some(end) => write!(f, "[{}, {})", self.start, end),
            None => write!(f, "[{}, open)", self.start),
        }
    }
}
