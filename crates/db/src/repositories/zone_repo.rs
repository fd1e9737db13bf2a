//! Repository for the `port_zones` table.

use sqlx::PgExecutor;

use portref_core::seed::SeedOutcome;
use portref_core::types::DbId;

use super::upsert_outcome;
use crate::models::zone::{PortZone, UpsertPortZone};

/// Column list for `port_zones` queries.
const COLUMNS: &str = "\
    id, code, name, region, primary_state, country, description, \
    created_at, updated_at";

/// Provides data access for port zones.
pub struct ZoneRepo;

impl ZoneRepo {
    /// Insert or update a zone by its `code` (natural-key upsert).
    pub async fn upsert<'e>(
        executor: impl PgExecutor<'e>,
        dto: &UpsertPortZone,
    ) -> Result<SeedOutcome, sqlx::Error> {
        let inserted = sqlx::query_scalar::<_, bool>(
            "INSERT INTO port_zones (code, name, region, primary_state, country, description) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (code) DO UPDATE SET \
                 name = EXCLUDED.name, \
                 region = EXCLUDED.region, \
                 primary_state = EXCLUDED.primary_state, \
                 country = EXCLUDED.country, \
                 description = EXCLUDED.description \
             WHERE (port_zones.name, port_zones.region, port_zones.primary_state, \
                    port_zones.country, port_zones.description) \
                 IS DISTINCT FROM \
                   (EXCLUDED.name, EXCLUDED.region, EXCLUDED.primary_state, \
                    EXCLUDED.country, EXCLUDED.description) \
             RETURNING (xmax = 0)",
        )
        .bind(&dto.code)
        .bind(&dto.name)
        .bind(&dto.region)
        .bind(&dto.primary_state)
        .bind(&dto.country)
        .bind(&dto.description)
        .fetch_optional(executor)
        .await?;
        Ok(upsert_outcome(inserted))
    }

    /// Find a zone by its code.
    pub async fn find_by_code<'e>(
        executor: impl PgExecutor<'e>,
        code: &str,
    ) -> Result<Option<PortZone>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM port_zones WHERE code = $1");
        sqlx::query_as::<_, PortZone>(&query)
            .bind(code)
            .fetch_optional(executor)
            .await
    }

    /// Resolve a zone code to its surrogate id.
    pub async fn find_id_by_code<'e>(
        executor: impl PgExecutor<'e>,
        code: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM port_zones WHERE code = $1")
            .bind(code)
            .fetch_optional(executor)
            .await
    }

    /// List all zones ordered by code.
    pub async fn list<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<PortZone>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM port_zones ORDER BY code");
        sqlx::query_as::<_, PortZone>(&query)
            .fetch_all(executor)
            .await
    }
}
