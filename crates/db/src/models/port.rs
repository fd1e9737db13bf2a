//! Port models and DTOs.
//!
//! A port belongs to at most one zone (`zone_id`, nulled when the zone is
//! deleted) and owns its terminals.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use portref_core::applicability::CallContext;
use portref_core::error::CoreError;
use portref_core::fee::MAX_PORT_CODE_LENGTH;
use portref_core::types::{DbId, Timestamp};
use portref_core::validation::{
    validate_alpha_code, validate_code, validate_name, validate_optional_alpha_code,
    validate_optional_url,
};

use super::default_country;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `ports` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Port {
    pub id: DbId,
    pub zone_id: Option<DbId>,
    pub code: String,
    pub name: String,
    pub state: Option<String>,
    pub country: String,
    pub region: Option<String>,
    pub is_california: bool,
    pub is_cascadia: bool,
    pub pilotage_url: Option<String>,
    pub mx_url: Option<String>,
    pub tariff_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Port {
    /// Fee lookup context for a call at this port.
    pub fn call_context(&self) -> CallContext {
        CallContext::at_port(self.code.clone(), self.state.clone(), self.is_cascadia)
    }
}

/// Port summary joined with its zone code, used by search and details.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PortSummary {
    pub code: String,
    pub name: String,
    pub country: String,
    pub region: Option<String>,
    pub state: Option<String>,
    pub is_cascadia: bool,
    pub zone_code: Option<String>,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Seed DTO for upserting a port by its `code`.
///
/// The owning zone is named by `zone_code` and resolved at apply time.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertPort {
    pub code: String,
    pub name: String,
    pub zone_code: Option<String>,
    pub state: Option<String>,
    #[serde(default = "default_country")]
    pub country: String,
    pub region: Option<String>,
    #[serde(default)]
    pub is_california: bool,
    #[serde(default)]
    pub is_cascadia: bool,
    pub pilotage_url: Option<String>,
    pub mx_url: Option<String>,
    pub tariff_url: Option<String>,
}

impl UpsertPort {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_code(&self.code, "ports.code", MAX_PORT_CODE_LENGTH)?;
        validate_name(&self.name, "ports.name", 120)?;
        if let Some(zone_code) = &self.zone_code {
            validate_code(zone_code, "ports.zone_code", MAX_PORT_CODE_LENGTH)?;
        }
        validate_optional_alpha_code(self.state.as_deref(), "ports.state", 2)?;
        validate_alpha_code(&self.country, "ports.country", 2)?;
        validate_optional_url(self.pilotage_url.as_deref(), "ports.pilotage_url")?;
        validate_optional_url(self.mx_url.as_deref(), "ports.mx_url")?;
        validate_optional_url(self.tariff_url.as_deref(), "ports.tariff_url")
    }
}
