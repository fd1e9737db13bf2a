//! Repository for the `sources` table.

use sqlx::PgExecutor;

use portref_core::seed::SeedOutcome;

use super::upsert_outcome;
use crate::models::source::{Source, UpsertSource};

/// Column list for `sources` queries.
const COLUMNS: &str = "id, name, url, type, effective_date, created_at, updated_at";

/// Provides data access for citation sources.
pub struct SourceRepo;

impl SourceRepo {
    /// Insert or update a source by its `url` (natural-key upsert).
    pub async fn upsert<'e>(
        executor: impl PgExecutor<'e>,
        dto: &UpsertSource,
    ) -> Result<SeedOutcome, sqlx::Error> {
        let inserted = sqlx::query_scalar::<_, bool>(
            "INSERT INTO sources (url, name, type, effective_date) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (url) DO UPDATE SET \
                 name = EXCLUDED.name, \
                 type = EXCLUDED.type, \
                 effective_date = EXCLUDED.effective_date \
             WHERE (sources.name, sources.type, sources.effective_date) \
                 IS DISTINCT FROM (EXCLUDED.name, EXCLUDED.type, EXCLUDED.effective_date) \
             RETURNING (xmax = 0)",
        )
        .bind(&dto.url)
        .bind(&dto.name)
        .bind(dto.source_type.as_str())
        .bind(dto.effective_date)
        .fetch_optional(executor)
        .await?;
        Ok(upsert_outcome(inserted))
    }

    pub async fn find_by_url<'e>(
        executor: impl PgExecutor<'e>,
        url: &str,
    ) -> Result<Option<Source>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sources WHERE url = $1");
        sqlx::query_as::<_, Source>(&query)
            .bind(url)
            .fetch_optional(executor)
            .await
    }

    /// List all sources, optionally restricted to one type.
    pub async fn list<'e>(
        executor: impl PgExecutor<'e>,
        source_type: Option<&str>,
    ) -> Result<Vec<Source>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sources \
             WHERE ($1::TEXT IS NULL OR type = $1) \
             ORDER BY type, name"
        );
        sqlx::query_as::<_, Source>(&query)
            .bind(source_type)
            .fetch_all(executor)
            .await
    }
}
