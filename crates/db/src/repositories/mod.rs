//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept any Postgres executor (`&PgPool`, or `&mut *tx` inside a seed
//! transaction) as the first argument.

use portref_core::seed::SeedOutcome;

pub mod fee_repo;
pub mod port_document_repo;
pub mod port_repo;
pub mod source_repo;
pub mod terminal_repo;
pub mod zone_repo;

pub use fee_repo::FeeRepo;
pub use port_document_repo::PortDocumentRepo;
pub use port_repo::PortRepo;
pub use source_repo::SourceRepo;
pub use terminal_repo::TerminalRepo;
pub use zone_repo::ZoneRepo;

/// Interpret the `RETURNING (xmax = 0)` of a natural-key upsert.
///
/// The `DO UPDATE` arm is guarded by `IS DISTINCT FROM`, so no returned row
/// means the stored row already matched.
pub(crate) fn upsert_outcome(inserted: Option<bool>) -> SeedOutcome {
    match inserted {
        Some(true) => SeedOutcome::Inserted,
        Some(false) => SeedOutcome::Updated,
        None => SeedOutcome::Unchanged,
    }
}
