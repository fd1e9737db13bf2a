//! Port document requirement models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use portref_core::error::CoreError;
use portref_core::fee::MAX_PORT_CODE_LENGTH;
use portref_core::types::{DbId, Timestamp};
use portref_core::validation::{validate_code, validate_name};

/// Lead time of the customs declaration appended for foreign arrivals.
pub const FOREIGN_ARRIVAL_LEAD_TIME_HOURS: i32 = 24;

/// A row from the `port_documents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PortDocument {
    pub id: DbId,
    pub port_code: String,
    pub document_name: String,
    pub document_code: Option<String>,
    pub is_mandatory: bool,
    pub lead_time_hours: i32,
    pub authority: Option<String>,
    pub description: Option<String>,
    pub applies_to_vessel_types: Option<Vec<String>>,
    pub applies_if_foreign: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A document a vessel call must file, as returned to consumers.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct DocumentRequirement {
    pub document_name: String,
    pub document_code: Option<String>,
    pub is_mandatory: bool,
    pub lead_time_hours: i32,
    pub authority: Option<String>,
    pub description: Option<String>,
}

impl DocumentRequirement {
    /// CBP-1300, required for every arrival from a foreign port.
    pub fn foreign_arrival_declaration() -> Self {
        Self {
            document_name: "Customs Declaration for Foreign Arrival".to_string(),
            document_code: Some("CBP-1300".to_string()),
            is_mandatory: true,
            lead_time_hours: FOREIGN_ARRIVAL_LEAD_TIME_HOURS,
            authority: Some("CBP".to_string()),
            description: Some("Required for all arrivals from foreign ports.".to_string()),
        }
    }

    /// Key used to drop duplicates contributed by more than one port code.
    pub fn dedup_key(&self) -> (String, String) {
        (
            self.document_code.clone().unwrap_or_default().to_uppercase(),
            self.document_name.to_lowercase(),
        )
    }
}

/// An arrival is foreign unless the previous port is a U.S. one (`US*`).
///
/// An unknown previous port counts as foreign.
pub fn is_foreign_arrival(previous_port: Option<&str>) -> bool {
    !previous_port
        .unwrap_or_default()
        .trim()
        .to_uppercase()
        .starts_with("US")
}

/// Drop duplicate requirements and append the foreign-arrival declaration.
///
/// Input order is kept; the first occurrence of each
/// `(document_code, document_name)` wins.
pub fn assemble_requirements(
    rows: Vec<DocumentRequirement>,
    is_foreign: bool,
) -> Vec<DocumentRequirement> {
    let mut seen = std::collections::HashSet::new();
    let mut docs: Vec<DocumentRequirement> = rows
        .into_iter()
        .filter(|doc| seen.insert(doc.dedup_key()))
        .collect();

    if is_foreign {
        let declaration = DocumentRequirement::foreign_arrival_declaration();
        if seen.insert(declaration.dedup_key()) {
            docs.push(declaration);
        }
    }
    docs
}

/// Seed DTO for upserting a document by `(port_code, document_name)`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertPortDocument {
    pub port_code: String,
    pub document_name: String,
    pub document_code: Option<String>,
    #[serde(default = "default_true")]
    pub is_mandatory: bool,
    #[serde(default)]
    pub lead_time_hours: i32,
    pub authority: Option<String>,
    pub description: Option<String>,
    pub applies_to_vessel_types: Option<Vec<String>>,
    #[serde(default)]
    pub applies_if_foreign: bool,
}

fn default_true() -> bool {
    true
}

impl UpsertPortDocument {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_code(&self.port_code, "port_documents.port_code", MAX_PORT_CODE_LENGTH)?;
        validate_name(&self.document_name, "port_documents.document_name", 200)?;
        if self.lead_time_hours < 0 {
            return Err(CoreError::Validation(format!(
                "port_documents.lead_time_hours must not be negative, got {}",
                self.lead_time_hours
            )));
        }
        if let Some(types) = &self.applies_to_vessel_types {
            if types.iter().any(|t| t.trim().is_empty() || t.to_lowercase() != *t) {
                return Err(CoreError::Validation(
                    "port_documents.applies_to_vessel_types entries must be non-empty lower-case"
                        .to_string(),
                ));
            }
        }
        Ok(())
    }
}
