//! Domain vocabulary for the port fee reference dataset.
//!
//! Everything in this crate is pure: no I/O, no database access. The `db`
//! crate maps these types onto tables and the loader binary drives them.

pub mod applicability;
pub mod error;
pub mod fee;
pub mod lookup;
pub mod seed;
pub mod types;
pub mod validation;
pub mod validity;
