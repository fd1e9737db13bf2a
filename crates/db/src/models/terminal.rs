//! Terminal models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use portref_core::error::CoreError;
use portref_core::fee::{MAX_PORT_CODE_LENGTH, MAX_TERMINAL_CODE_LENGTH};
use portref_core::types::{DbId, Timestamp};
use portref_core::validation::{validate_code, validate_name};

/// A row from the `terminals` table. Deleted together with its port.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Terminal {
    pub id: DbId,
    pub port_id: DbId,
    pub code: String,
    pub name: String,
    pub operator_name: Option<String>,
    pub is_public: bool,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Seed DTO for upserting a terminal by its `code`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertTerminal {
    pub code: String,
    pub port_code: String,
    pub name: String,
    pub operator_name: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    pub notes: Option<String>,
}

impl UpsertTerminal {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_code(&self.code, "terminals.code", MAX_TERMINAL_CODE_LENGTH)?;
        validate_code(&self.port_code, "terminals.port_code", MAX_PORT_CODE_LENGTH)?;
        validate_name(&self.name, "terminals.name", 200)
    }
}
