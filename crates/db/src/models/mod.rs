//! Domain model structs and seed DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` seed DTO read from seed files, with a `validate` method

pub mod fee;
pub mod port;
pub mod port_document;
pub mod source;
pub mod terminal;
pub mod zone;

pub(crate) fn default_country() -> String {
    portref_core::fee::DEFAULT_COUNTRY.to_string()
}
