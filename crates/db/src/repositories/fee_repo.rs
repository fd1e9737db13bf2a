//! Repository for the `fees` table.
//!
//! Fee rows are never updated or deleted by the loader: a changed rate is a
//! new row with a later `effective_start`.

use chrono::NaiveDate;
use sqlx::PgExecutor;

use portref_core::applicability::{Applicability, CallContext};
use portref_core::error::CoreError;
use portref_core::lookup::select_effective;
use portref_core::types::DbId;

use super::PortRepo;
use crate::error::DbError;
use crate::models::fee::{CreateFeeVersion, Fee};

/// Column list for `fees` queries.
const COLUMNS: &str = "\
    id, code, name, scope, unit, rate, currency, cap_amount, cap_period, \
    applies_state, applies_port_code, applies_cascadia, effective_start, effective_end, \
    source_url, authority, created_at, updated_at";

/// Provides data access for fee versions.
pub struct FeeRepo;

impl FeeRepo {
    /// Insert a fee version unless one with the same
    /// `(code, effective_start, applicability)` key already exists.
    ///
    /// Returns the new row's id, or `None` when the key was already stored.
    pub async fn insert_version_if_absent<'e>(
        executor: impl PgExecutor<'e>,
        dto: &CreateFeeVersion,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO fees \
                 (code, name, scope, unit, rate, currency, cap_amount, cap_period, \
                  applies_state, applies_port_code, applies_cascadia, \
                  effective_start, effective_end, source_url, authority) \
             SELECT $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15 \
             WHERE NOT EXISTS ( \
                 SELECT 1 FROM fees \
                 WHERE code = $1 \
                   AND effective_start = $12 \
                   AND applies_state IS NOT DISTINCT FROM $9 \
                   AND applies_port_code IS NOT DISTINCT FROM $10 \
                   AND applies_cascadia IS NOT DISTINCT FROM $11 \
             ) \
             RETURNING id",
        )
        .bind(&dto.code)
        .bind(&dto.name)
        .bind(dto.scope.as_str())
        .bind(dto.unit.as_str())
        .bind(dto.rate)
        .bind(&dto.currency)
        .bind(dto.cap_amount)
        .bind(dto.cap_period.map(|p| p.as_str()))
        .bind(&dto.applies_state)
        .bind(&dto.applies_port_code)
        .bind(dto.applies_cascadia)
        .bind(dto.effective_start)
        .bind(dto.effective_end)
        .bind(&dto.source_url)
        .bind(&dto.authority)
        .fetch_optional(executor)
        .await
    }

    /// Find the version stored under an exact key.
    pub async fn find_version<'e>(
        executor: impl PgExecutor<'e>,
        code: &str,
        effective_start: NaiveDate,
        applicability: &Applicability,
    ) -> Result<Option<Fee>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM fees \
             WHERE code = $1 \
               AND effective_start = $2 \
               AND applies_state IS NOT DISTINCT FROM $3 \
               AND applies_port_code IS NOT DISTINCT FROM $4 \
               AND applies_cascadia IS NOT DISTINCT FROM $5"
        );
        sqlx::query_as::<_, Fee>(&query)
            .bind(code)
            .bind(effective_start)
            .bind(&applicability.state)
            .bind(&applicability.port_code)
            .bind(applicability.cascadia)
            .fetch_optional(executor)
            .await
    }

    /// All versions of one fee code, oldest first.
    pub async fn list_versions<'e>(
        executor: impl PgExecutor<'e>,
        code: &str,
    ) -> Result<Vec<Fee>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM fees WHERE code = $1 ORDER BY effective_start, id"
        );
        sqlx::query_as::<_, Fee>(&query)
            .bind(code)
            .fetch_all(executor)
            .await
    }

    /// Every stored version, grouped by code.
    pub async fn list_all<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<Fee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fees ORDER BY code, effective_start, id");
        sqlx::query_as::<_, Fee>(&query).fetch_all(executor).await
    }

    /// Versions of `code` whose interval contains `on`, any applicability.
    pub async fn find_candidates<'e>(
        executor: impl PgExecutor<'e>,
        code: &str,
        on: NaiveDate,
    ) -> Result<Vec<Fee>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM fees \
             WHERE code = $1 \
               AND effective_start <= $2 \
               AND (effective_end IS NULL OR effective_end > $2) \
             ORDER BY effective_start, id"
        );
        sqlx::query_as::<_, Fee>(&query)
            .bind(code)
            .bind(on)
            .fetch_all(executor)
            .await
    }

    /// The version of `code` in force on `on` for a call described by `ctx`.
    ///
    /// The most specific matching row wins; see
    /// [`portref_core::lookup::select_effective`].
    pub async fn find_effective<'e>(
        executor: impl PgExecutor<'e>,
        code: &str,
        on: NaiveDate,
        ctx: &CallContext,
    ) -> Result<Option<Fee>, DbError> {
        let candidates = Self::find_candidates(executor, code, on).await?;
        let selected = select_effective(&candidates, code, on, ctx)?;
        Ok(selected.cloned())
    }

    /// [`find_effective`](Self::find_effective) with the context taken from
    /// a stored port.
    pub async fn find_effective_for_port<'e>(
        executor: impl PgExecutor<'e> + Copy,
        code: &str,
        on: NaiveDate,
        port_code: &str,
    ) -> Result<Option<Fee>, DbError> {
        let port_code = port_code.trim().to_uppercase();
        let port = PortRepo::find_by_code(executor, &port_code)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "port",
                code: port_code,
            })?;
        Self::find_effective(executor, code, on, &port.call_context()).await
    }
}
