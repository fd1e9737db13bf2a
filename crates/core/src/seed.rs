//! Seed policies and the bookkeeping the applier reports.
//!
//! Reference rows fall into two families. Mutable entities (zones, ports,
//! terminals, port documents, sources) are keyed by a stable code and are
//! upserted in place. Fees are historical facts keyed by
//! `(code, effective_start, applicability)` and are only ever inserted.

use serde::Serialize;

/// How a seed row is reconciled with what is already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedPolicy {
    /// `INSERT ... ON CONFLICT (<natural key>) DO UPDATE`.
    NaturalKeyUpsert,
    /// `INSERT ... WHERE NOT EXISTS (<version key>)`.
    VersionedInsertIfAbsent,
}

impl SeedPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NaturalKeyUpsert => "natural_key_upsert",
            Self::VersionedInsertIfAbsent => "versioned_insert_if_absent",
        }
    }
}

/// What happened to one seed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedOutcome {
    /// A new row was written.
    Inserted,
    /// An existing row's mutable attributes changed.
    Updated,
    /// An existing row already held the same attributes.
    Unchanged,
    /// A versioned row with the same key already exists and was left alone.
    Skipped,
}

/// Per-table counters of seed outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedTally {
    pub inserted: u32,
    pub updated: u32,
    pub unchanged: u32,
    pub skipped: u32,
}

impl SeedTally {
    pub fn record(&mut self, outcome: SeedOutcome) {
        match outcome {
            SeedOutcome::Inserted => self.inserted += 1,
            SeedOutcome::Updated => self.updated += 1,
            SeedOutcome::Unchanged => self.unchanged += 1,
            SeedOutcome::Skipped => self.skipped += 1,
        }
    }

    /// Rows written (inserted or updated).
    pub fn written(&self) -> u32 {
        self.inserted + self.updated
    }

    pub fn total(&self) -> u32 {
        self.inserted + self.updated + self.unchanged + self.skipped
    }

    pub fn merge(&mut self, other: &SeedTally) {
        self.inserted += other.inserted;
        self.updated += other.updated;
        self.unchanged += other.unchanged;
        self.skipped += other.skipped;
    }
}
