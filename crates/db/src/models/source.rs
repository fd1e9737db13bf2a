//! Citation source models and DTOs.
//!
//! Sources document where fee and port facts come from. They are linked to
//! other rows only by URL convention.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use portref_core::error::CoreError;
use portref_core::fee::SourceType;
use portref_core::types::{DbId, Timestamp};
use portref_core::validation::{validate_name, validate_url};

/// A row from the `sources` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Source {
    pub id: DbId,
    pub name: String,
    pub url: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub source_type: String,
    pub effective_date: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Seed DTO for upserting a source by its `url`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertSource {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub source_type: SourceType,
    pub effective_date: Option<NaiveDate>,
}

impl UpsertSource {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_name(&self.name, "sources.name", 200)?;
        validate_url(&self.url, "sources.url")
    }
}
