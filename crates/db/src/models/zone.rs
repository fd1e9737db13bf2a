//! Port zone models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use portref_core::error::CoreError;
use portref_core::fee::MAX_PORT_CODE_LENGTH;
use portref_core::types::{DbId, Timestamp};
use portref_core::validation::{
    validate_alpha_code, validate_code, validate_name, validate_optional_alpha_code,
};

use super::default_country;

/// A row from the `port_zones` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PortZone {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub region: Option<String>,
    pub primary_state: Option<String>,
    pub country: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Seed DTO for upserting a zone by its `code`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertPortZone {
    pub code: String,
    pub name: String,
    pub region: Option<String>,
    pub primary_state: Option<String>,
    #[serde(default = "default_country")]
    pub country: String,
    pub description: Option<String>,
}

impl UpsertPortZone {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_code(&self.code, "port_zones.code", MAX_PORT_CODE_LENGTH)?;
        validate_name(&self.name, "port_zones.name", 120)?;
        validate_optional_alpha_code(self.primary_state.as_deref(), "port_zones.primary_state", 2)?;
        validate_alpha_code(&self.country, "port_zones.country", 2)
    }
}
