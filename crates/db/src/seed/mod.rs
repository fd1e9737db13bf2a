//! Seed documents and the transactional seed applier.
//!
//! A seed file is a JSON document with optional sections (`zones`, `ports`,
//! `terminals`, `port_documents`, `sources`, `fees`). Files are applied in
//! lexical filename order, each inside its own transaction.

pub mod applier;
pub mod bundled;
pub mod document;
pub mod report;

pub use applier::SeedApplier;
pub use document::{SeedDocument, SeedFile};
pub use report::SeedReport;
