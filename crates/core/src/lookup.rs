//! Effective-fee selection and version overlap auditing.
//!
//! Fee rows are historical facts: a code can have several rows, one per
//! rate regime and applicability variant. Lookup picks the row in force on
//! a date for a call; the overlap audit guards the invariant that makes
//! that choice unambiguous.

use serde::Serialize;

use crate::applicability::{Applicability, CallContext};
use crate::error::CoreError;
use crate::types::EffectiveDate;
use crate::validity::ValidityInterval;

/// Anything shaped like a row of the `fees` table.
pub trait FeeVersion {
    fn code(&self) -> &str;
    fn applicability(&self) -> Applicability;
    fn validity(&self) -> ValidityInterval;
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Pick the row of `code` in force on `on` for the call `ctx`.
///
/// Among rows whose interval contains `on` and whose applicability matches
/// `ctx`, the most specific one wins. Two matching rows of equal
/// specificity mean the stored data is inconsistent and produce a
/// `CoreError::Conflict`.
pub fn select_effective<'a, T: FeeVersion>(
    rows: &'a [T],
    code: &str,
    on: EffectiveDate,
    ctx: &CallContext,
) -> Result<Option<&'a T>, CoreError> {
    let candidates: Vec<(&T, u8)> = rows
        .iter()
        .filter(|row| row.code() == code && row.validity().contains(on))
        .filter_map(|row| {
            let applicability = row.applicability();
            applicability
                .matches(ctx)
                .then(|| (row, applicability.specificity()))
        })
        .collect();

    let Some(best) = candidates.iter().map(|(_, score)| *score).max() else {
        return Ok(None);
    };

    let mut winners = candidates.into_iter().filter(|(_, score)| *score == best);
    let first = winners.next().map(|(row, _)| row);
    let rest: Vec<String> = winners
        .map(|(row, _)| format!("{} {}", row.applicability(), row.validity()))
        .collect();

    if !rest.is_empty() {
        return Err(CoreError::Conflict(format!(
            "Fee {code} has {} equally specific rows in force on {on}: {}",
            rest.len() + 1,
            rest.join("; ")
        )));
    }
    Ok(first)
}

// ---------------------------------------------------------------------------
// Overlap audit
// ---------------------------------------------------------------------------

/// Two rows of the same code and applicability whose intervals intersect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionOverlap {
    pub code: String,
    pub applicability: Applicability,
    pub first: ValidityInterval,
    pub second: ValidityInterval,
}

impl std::fmt::Display for VersionOverlap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}): {} overlaps {}",
            self.code, self.applicability, self.first, self.second
        )
    }
}

/// Every pair of rows that violates the no-overlap invariant.
pub fn find_overlaps<T: FeeVersion>(rows: &[T]) -> Vec<VersionOverlap> {
    let mut overlaps = Vec::new();
    for (i, a) in rows.iter().enumerate() {
        for b in &rows[i + 1..] {
            if let Some(overlap) = overlap_between(a, b) {
                overlaps.push(overlap);
            }
        }
    }
    overlaps
}

/// Check a not-yet-stored version against the versions already stored.
///
/// Returns the first overlap found, if any. A stored row with exactly the
/// same key is not an overlap: inserting it again is a no-op.
pub fn overlap_with_existing<C: FeeVersion, E: FeeVersion>(
    candidate: &C,
    existing: &[E],
) -> Option<VersionOverlap> {
    existing
        .iter()
        .filter(|row| {
            !(row.validity().start == candidate.validity().start
                && row.applicability() == candidate.applicability())
        })
        .find_map(|row| overlap_between(row, candidate))
}

fn overlap_between<A: FeeVersion, B: FeeVersion>(a: &A, b: &B) -> Option<VersionOverlap> {
    if a.code() != b.code() {
        return None;
    }
    let applicability = a.applicability();
    if applicability != b.applicability() {
        return None;
    }
    let (first, second) = (a.validity(), b.validity());
    first.overlaps(&second).then(|| VersionOverlap {
        code: a.code().to_string(),
        applicability,
        first,
        second,
    })
}
