//! Per-file seed outcome counters.

use serde::Serialize;

use portref_core::seed::SeedTally;

/// What applying one seed file did to each table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub file: String,
    pub zones: SeedTally,
    pub ports: SeedTally,
    pub terminals: SeedTally,
    pub port_documents: SeedTally,
    pub sources: SeedTally,
    pub fees: SeedTally,
    /// Skipped fee versions whose seed content differs from the stored row.
    pub diverged_fees: u32,
}

impl SeedReport {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }

    /// Counters summed across tables.
    pub fn total(&self) -> SeedTally {
        let mut total = SeedTally::default();
        for tally in [
            &self.zones,
            &self.ports,
            &self.terminals,
            &self.port_documents,
            &self.sources,
            &self.fees,
        ] {
            total.merge(tally);
        }
        total
    }
}
