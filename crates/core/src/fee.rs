//! Fee vocabulary: jurisdiction scope, billing unit, cap period, and the
//! citation source types that document where a fee comes from.
//!
//! Each enum is stored as TEXT in the database (guarded by a CHECK
//! constraint) and parsed back through `from_str`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Currency used when a fee row does not specify one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Country used when a port or zone does not specify one.
pub const DEFAULT_COUNTRY: &str = "US";

/// Maximum length of a fee code.
pub const MAX_FEE_CODE_LENGTH: usize = 64;

/// Maximum length of a port or zone code.
pub const MAX_PORT_CODE_LENGTH: usize = 12;

/// Maximum length of a terminal code.
pub const MAX_TERMINAL_CODE_LENGTH: usize = 24;

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

/// Jurisdiction level that levies a fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeScope {
    Federal,
    State,
    Port,
}

impl FeeScope {
    /// Return the wire-format string for this variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Federal => "federal",
            Self::State => "state",
            Self::Port => "port",
        }
    }

    /// Parse from a wire-format string.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "federal" => Ok(Self::Federal),
            "state" => Ok(Self::State),
            "port" => Ok(Self::Port),
            _ => Err(CoreError::Validation(format!(
                "Invalid fee scope: '{s}'. Must be one of: federal, state, port"
            ))),
        }
    }
}

impl std::fmt::Display for FeeScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Unit
// ---------------------------------------------------------------------------

/// What a fee's `rate` is multiplied by when billed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeUnit {
    PerCall,
    PerNetTon,
    PerVoyage,
}

impl FeeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PerCall => "per_call",
            Self::PerNetTon => "per_net_ton",
            Self::PerVoyage => "per_voyage",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "per_call" => Ok(Self::PerCall),
            "per_net_ton" => Ok(Self::PerNetTon),
            "per_voyage" => Ok(Self::PerVoyage),
            _ => Err(CoreError::Validation(format!(
                "Invalid fee unit: '{s}'. Must be one of: per_call, per_net_ton, per_voyage"
            ))),
        }
    }
}

impl std::fmt::Display for FeeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Cap period
// ---------------------------------------------------------------------------

/// Window over which a fee's `cap_amount` accumulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapPeriod {
    CalendarYear,
    FiscalYear,
    TonnageYear,
}

impl CapPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CalendarYear => "calendar_year",
            Self::FiscalYear => "fiscal_year",
            Self::TonnageYear => "tonnage_year",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "calendar_year" => Ok(Self::CalendarYear),
            "fiscal_year" => Ok(Self::FiscalYear),
            "tonnage_year" => Ok(Self::TonnageYear),
            _ => Err(CoreError::Validation(format!(
                "Invalid cap period: '{s}'. Must be one of: calendar_year, fiscal_year, \
                 tonnage_year"
            ))),
        }
    }
}

impl std::fmt::Display for CapPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Citation sources
// ---------------------------------------------------------------------------

/// Kind of document a `sources` row cites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Pilotage,
    Tariff,
    Law,
    Program,
    Api,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pilotage => "pilotage",
            Self::Tariff => "tariff",
            Self::Law => "law",
            Self::Program => "program",
            Self::Api => "api",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "pilotage" => Ok(Self::Pilotage),
            "tariff" => Ok(Self::Tariff),
            "law" => Ok(Self::Law),
            "program" => Ok(Self::Program),
            "api" => Ok(Self::Api),
            _ => Err(CoreError::Validation(format!(
                "Invalid source type: '{s}'. Must be one of: pilotage, tariff, law, program, api"
            ))),
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
