//! Repository for the `ports` table.

use sqlx::PgExecutor;

use portref_core::error::CoreError;
use portref_core::seed::SeedOutcome;
use portref_core::types::DbId;

use super::upsert_outcome;
use crate::error::DbError;
use crate::models::port::{Port, PortSummary, UpsertPort};

/// Column list for `ports` queries.
const COLUMNS: &str = "\
    id, zone_id, code, name, state, country, region, is_california, is_cascadia, \
    pilotage_url, mx_url, tariff_url, created_at, updated_at";

/// Column list for `PortSummary` queries (`p` = ports, `z` = port_zones).
const SUMMARY_COLUMNS: &str = "\
    p.code, p.name, p.country, p.region, p.state, p.is_cascadia, z.code AS zone_code";

/// Shortest accepted search string.
pub const MIN_SEARCH_LENGTH: usize = 2;
/// Largest accepted search page.
pub const MAX_SEARCH_LIMIT: i64 = 100;

/// Provides data access for ports.
pub struct PortRepo;

impl PortRepo {
    /// Insert or update a port by its `code` (natural-key upsert).
    ///
    /// `zone_id` is the already-resolved id of `dto.zone_code`.
    pub async fn upsert<'e>(
        executor: impl PgExecutor<'e>,
        zone_id: Option<DbId>,
        dto: &UpsertPort,
    ) -> Result<SeedOutcome, sqlx::Error> {
        let inserted = sqlx::query_scalar::<_, bool>(
            "INSERT INTO ports \
                 (code, zone_id, name, state, country, region, is_california, is_cascadia, \
                  pilotage_url, mx_url, tariff_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             ON CONFLICT (code) DO UPDATE SET \
                 zone_id = EXCLUDED.zone_id, \
                 name = EXCLUDED.name, \
                 state = EXCLUDED.state, \
                 country = EXCLUDED.country, \
                 region = EXCLUDED.region, \
                 is_california = EXCLUDED.is_california, \
                 is_cascadia = EXCLUDED.is_cascadia, \
                 pilotage_url = EXCLUDED.pilotage_url, \
                 mx_url = EXCLUDED.mx_url, \
                 tariff_url = EXCLUDED.tariff_url \
             WHERE (ports.zone_id, ports.name, ports.state, ports.country, ports.region, \
                    ports.is_california, ports.is_cascadia, ports.pilotage_url, \
                    ports.mx_url, ports.tariff_url) \
                 IS DISTINCT FROM \
                   (EXCLUDED.zone_id, EXCLUDED.name, EXCLUDED.state, EXCLUDED.country, \
                    EXCLUDED.region, EXCLUDED.is_california, EXCLUDED.is_cascadia, \
                    EXCLUDED.pilotage_url, EXCLUDED.mx_url, EXCLUDED.tariff_url) \
             RETURNING (xmax = 0)",
        )
        .bind(&dto.code)
        .bind(zone_id)
        .bind(&dto.name)
        .bind(&dto.state)
        .bind(&dto.country)
        .bind(&dto.region)
        .bind(dto.is_california)
        .bind(dto.is_cascadia)
        .bind(&dto.pilotage_url)
        .bind(&dto.mx_url)
        .bind(&dto.tariff_url)
        .fetch_optional(executor)
        .await?;
        Ok(upsert_outcome(inserted))
    }

    /// Find a port by its code.
    pub async fn find_by_code<'e>(
        executor: impl PgExecutor<'e>,
        code: &str,
    ) -> Result<Option<Port>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ports WHERE code = $1");
        sqlx::query_as::<_, Port>(&query)
            .bind(code)
            .fetch_optional(executor)
            .await
    }

    /// Resolve a port code to its surrogate id.
    pub async fn find_id_by_code<'e>(
        executor: impl PgExecutor<'e>,
        code: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM ports WHERE code = $1")
            .bind(code)
            .fetch_optional(executor)
            .await
    }

    /// Port details with the owning zone's code.
    pub async fn find_summary<'e>(
        executor: impl PgExecutor<'e>,
        code: &str,
    ) -> Result<Option<PortSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM ports p \
             LEFT JOIN port_zones z ON z.id = p.zone_id \
             WHERE p.code = $1"
        );
        sqlx::query_as::<_, PortSummary>(&query)
            .bind(code.trim().to_uppercase())
            .fetch_optional(executor)
            .await
    }

    /// List the ports of a zone, ordered by code.
    pub async fn list_by_zone<'e>(
        executor: impl PgExecutor<'e>,
        zone_code: &str,
    ) -> Result<Vec<Port>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ports \
             WHERE zone_id = (SELECT id FROM port_zones WHERE code = $1) \
             ORDER BY code"
        );
        sqlx::query_as::<_, Port>(&query)
            .bind(zone_code)
            .fetch_all(executor)
            .await
    }

    /// Case-insensitive search over port name and code.
    ///
    /// An exact code match sorts first, then by name. `query` must be at
    /// least [`MIN_SEARCH_LENGTH`] characters and `limit` within
    /// `1..=`[`MAX_SEARCH_LIMIT`].
    pub async fn search<'e>(
        executor: impl PgExecutor<'e>,
        query: &str,
        country: Option<&str>,
        limit: i64,
    ) -> Result<Vec<PortSummary>, DbError> {
        let needle = query.trim();
        if needle.chars().count() < MIN_SEARCH_LENGTH {
            return Err(CoreError::Validation(format!(
                "Search query must be at least {MIN_SEARCH_LENGTH} characters"
            ))
            .into());
        }
        if !(1..=MAX_SEARCH_LIMIT).contains(&limit) {
            return Err(CoreError::Validation(format!(
                "Search limit must be between 1 and {MAX_SEARCH_LIMIT}, got {limit}"
            ))
            .into());
        }

        let sql = format!(
            "SELECT {SUMMARY_COLUMNS} FROM ports p \
             LEFT JOIN port_zones z ON z.id = p.zone_id \
             WHERE (p.name ILIKE $1 OR p.code ILIKE $1) \
               AND ($2::TEXT IS NULL OR p.country = $2) \
             ORDER BY CASE WHEN p.code = UPPER($3) THEN 0 ELSE 1 END, p.name \
             LIMIT $4"
        );
        let rows = sqlx::query_as::<_, PortSummary>(&sql)
            .bind(format!("%{}%", escape_like(needle)))
            .bind(country)
            .bind(needle)
            .bind(limit)
            .fetch_all(executor)
            .await?;
        Ok(rows)
    }
}

/// Escape `LIKE` wildcards so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_quotes_wildcards() {
        assert_eq!(escape_like("SF_BAY%"), "SF\\_BAY\\%");
        assert_eq!(escape_like("Oakland"), "Oakland");
    }
}
