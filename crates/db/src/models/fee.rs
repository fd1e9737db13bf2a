//! Fee models and DTOs.
//!
//! `fees.code` is not unique: each row is one rate regime for one
//! applicability variant, valid over `[effective_start, effective_end)`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use portref_core::applicability::Applicability;
use portref_core::error::CoreError;
use portref_core::fee::{
    CapPeriod, FeeScope, FeeUnit, DEFAULT_CURRENCY, MAX_FEE_CODE_LENGTH, MAX_PORT_CODE_LENGTH,
};
use portref_core::lookup::FeeVersion;
use portref_core::types::{DbId, Timestamp};
use portref_core::validation::{
    validate_alpha_code, validate_code, validate_name, validate_non_negative,
    validate_optional_alpha_code, validate_optional_url,
};
use portref_core::validity::ValidityInterval;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `fees` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Fee {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub scope: String,
    pub unit: String,
    pub rate: Decimal,
    pub currency: String,
    pub cap_amount: Option<Decimal>,
    pub cap_period: Option<String>,
    pub applies_state: Option<String>,
    pub applies_port_code: Option<String>,
    pub applies_cascadia: Option<bool>,
    pub effective_start: NaiveDate,
    pub effective_end: Option<NaiveDate>,
    pub source_url: Option<String>,
    pub authority: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Fee {
    /// Whether a seed row for the same version key carries different facts.
    ///
    /// Stored versions are never rewritten; the applier only reports this.
    pub fn differs_from(&self, seed: &CreateFeeVersion) -> bool {
        self.name != seed.name
            || self.scope != seed.scope.as_str()
            || self.unit != seed.unit.as_str()
            || self.rate != seed.rate
            || self.currency != seed.currency
            || self.cap_amount != seed.cap_amount
            || self.cap_period.as_deref() != seed.cap_period.map(|p| p.as_str())
            || self.effective_end != seed.effective_end
            || self.source_url != seed.source_url
            || self.authority != seed.authority
    }
}

impl FeeVersion for Fee {
    fn code(&self) -> &str {
        &self.code
    }

    fn applicability(&self) -> Applicability {
        Applicability {
            state: self.applies_state.clone(),
            port_code: self.applies_port_code.clone(),
            cascadia: self.applies_cascadia,
        }
    }

    fn validity(&self) -> ValidityInterval {
        ValidityInterval {
            start: self.effective_start,
            end: self.effective_end,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Seed DTO for inserting a fee version if its key is absent.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFeeVersion {
    pub code: String,
    pub name: String,
    pub scope: FeeScope,
    pub unit: FeeUnit,
    pub rate: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub cap_amount: Option<Decimal>,
    pub cap_period: Option<CapPeriod>,
    pub applies_state: Option<String>,
    pub applies_port_code: Option<String>,
    pub applies_cascadia: Option<bool>,
    pub effective_start: NaiveDate,
    pub effective_end: Option<NaiveDate>,
    pub source_url: Option<String>,
    pub authority: Option<String>,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl CreateFeeVersion {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_code(&self.code, "fees.code", MAX_FEE_CODE_LENGTH)?;
        validate_name(&self.name, "fees.name", 200)?;
        validate_non_negative(self.rate, "fees.rate")?;
        validate_alpha_code(&self.currency, "fees.currency", 3)?;

        match (self.cap_amount, self.cap_period) {
            (Some(amount), Some(_)) => validate_non_negative(amount, "fees.cap_amount")?,
            (None, None) => {}
            _ => {
                return Err(CoreError::Validation(format!(
                    "Fee {}: cap_amount and cap_period must be given together",
                    self.code
                )))
            }
        }

        validate_optional_alpha_code(self.applies_state.as_deref(), "fees.applies_state", 2)?;
        if let Some(port_code) = &self.applies_port_code {
            validate_code(port_code, "fees.applies_port_code", MAX_PORT_CODE_LENGTH)?;
        }
        ValidityInterval::new(self.effective_start, self.effective_end)?;
        validate_optional_url(self.source_url.as_deref(), "fees.source_url")
    }
}

impl FeeVersion for CreateFeeVersion {
    fn code(&self) -> &str {
        &self.code
    }

    fn applicability(&self) -> Applicability {
        Applicability {
            state: self.applies_state.clone(),
            port_code: self.applies_port_code.clone(),
            cascadia: self.applies_cascadia,
        }
    }

    fn validity(&self) -> ValidityInterval {
        ValidityInterval {
            start: self.effective_start,
            end: self.effective_end,
        }
    }
}
