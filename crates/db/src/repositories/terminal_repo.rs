//! Repository for the `terminals` table.

use sqlx::PgExecutor;

use portref_core::seed::SeedOutcome;
use portref_core::types::DbId;

use super::upsert_outcome;
use crate::models::terminal::{Terminal, UpsertTerminal};

/// Column list for `terminals` queries.
const COLUMNS: &str = "\
    id, port_id, code, name, operator_name, is_public, notes, created_at, updated_at";

/// Provides data access for terminals.
pub struct TerminalRepo;

impl TerminalRepo {
    /// Insert or update a terminal by its `code` (natural-key upsert).
    ///
    /// `port_id` is the already-resolved id of `dto.port_code`.
    pub async fn upsert<'e>(
        executor: impl PgExecutor<'e>,
        port_id: DbId,
        dto: &UpsertTerminal,
    ) -> Result<SeedOutcome, sqlx::Error> {
        let inserted = sqlx::query_scalar::<_, bool>(
            "INSERT INTO terminals (code, port_id, name, operator_name, is_public, notes) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (code) DO UPDATE SET \
                 port_id = EXCLUDED.port_id, \
                 name = EXCLUDED.name, \
                 operator_name = EXCLUDED.operator_name, \
                 is_public = EXCLUDED.is_public, \
                 notes = EXCLUDED.notes \
             WHERE (terminals.port_id, terminals.name, terminals.operator_name, \
                    terminals.is_public, terminals.notes) \
                 IS DISTINCT FROM \
                   (EXCLUDED.port_id, EXCLUDED.name, EXCLUDED.operator_name, \
                    EXCLUDED.is_public, EXCLUDED.notes) \
             RETURNING (xmax = 0)",
        )
        .bind(&dto.code)
        .bind(port_id)
        .bind(&dto.name)
        .bind(&dto.operator_name)
        .bind(dto.is_public)
        .bind(&dto.notes)
        .fetch_optional(executor)
        .await?;
        Ok(upsert_outcome(inserted))
    }

    /// Find a terminal by its code.
    pub async fn find_by_code<'e>(
        executor: impl PgExecutor<'e>,
        code: &str,
    ) -> Result<Option<Terminal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM terminals WHERE code = $1");
        sqlx::query_as::<_, Terminal>(&query)
            .bind(code)
            .fetch_optional(executor)
            .await
    }

    /// List the terminals of a port, ordered by code.
    pub async fn list_by_port<'e>(
        executor: impl PgExecutor<'e>,
        port_code: &str,
    ) -> Result<Vec<Terminal>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM terminals \
             WHERE port_id = (SELECT id FROM ports WHERE code = $1) \
             ORDER BY code"
        );
        sqlx::query_as::<_, Terminal>(&query)
            .bind(port_code)
            .fetch_all(executor)
            .await
    }
}
