//! Repository for the `port_documents` table.

use sqlx::PgExecutor;

use portref_core::seed::SeedOutcome;
use portref_core::validation::ALL_US_PORT_CODE;

use super::upsert_outcome;
use crate::models::port_document::{
    assemble_requirements, is_foreign_arrival, DocumentRequirement, PortDocument,
    UpsertPortDocument,
};

/// Column list for `port_documents` queries.
const COLUMNS: &str = "\
    id, port_code, document_name, document_code, is_mandatory, lead_time_hours, \
    authority, description, applies_to_vessel_types, applies_if_foreign, \
    created_at, updated_at";

/// Provides data access for per-port document requirements.
pub struct PortDocumentRepo;

impl PortDocumentRepo {
    /// Insert or update a document by `(port_code, document_name)`.
    pub async fn upsert<'e>(
        executor: impl PgExecutor<'e>,
        dto: &UpsertPortDocument,
    ) -> Result<SeedOutcome, sqlx::Error> {
        let inserted = sqlx::query_scalar::<_, bool>(
            "INSERT INTO port_documents \
                 (port_code, document_name, document_code, is_mandatory, lead_time_hours, \
                  authority, description, applies_to_vessel_types, applies_if_foreign) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             ON CONFLICT (port_code, document_name) DO UPDATE SET \
                 document_code = EXCLUDED.document_code, \
                 is_mandatory = EXCLUDED.is_mandatory, \
                 lead_time_hours = EXCLUDED.lead_time_hours, \
                 authority = EXCLUDED.authority, \
                 description = EXCLUDED.description, \
                 applies_to_vessel_types = EXCLUDED.applies_to_vessel_types, \
                 applies_if_foreign = EXCLUDED.applies_if_foreign \
             WHERE (port_documents.document_code, port_documents.is_mandatory, \
                    port_documents.lead_time_hours, port_documents.authority, \
                    port_documents.description, port_documents.applies_to_vessel_types, \
                    port_documents.applies_if_foreign) \
                 IS DISTINCT FROM \
                   (EXCLUDED.document_code, EXCLUDED.is_mandatory, EXCLUDED.lead_time_hours, \
                    EXCLUDED.authority, EXCLUDED.description, \
                    EXCLUDED.applies_to_vessel_types, EXCLUDED.applies_if_foreign) \
             RETURNING (xmax = 0)",
        )
        .bind(&dto.port_code)
        .bind(&dto.document_name)
        .bind(&dto.document_code)
        .bind(dto.is_mandatory)
        .bind(dto.lead_time_hours)
        .bind(&dto.authority)
        .bind(&dto.description)
        .bind(&dto.applies_to_vessel_types)
        .bind(dto.applies_if_foreign)
        .fetch_optional(executor)
        .await?;
        Ok(upsert_outcome(inserted))
    }

    /// List the documents stored under exactly `port_code`.
    pub async fn list_by_port_code<'e>(
        executor: impl PgExecutor<'e>,
        port_code: &str,
    ) -> Result<Vec<PortDocument>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM port_documents WHERE port_code = $1 ORDER BY document_name"
        );
        sqlx::query_as::<_, PortDocument>(&query)
            .bind(port_code)
            .fetch_all(executor)
            .await
    }

    /// Documents a call at `port_code` must file.
    ///
    /// Combines nationwide (`ALL_US`) documents with those stored under the
    /// port's code and its zone's code. Vessel-type restricted documents
    /// apply only when `vessel_type` is listed; foreign-only documents only
    /// when `previous_port` is not a U.S. port.
    pub async fn requirements_for<'e>(
        executor: impl PgExecutor<'e> + Copy,
        port_code: &str,
        vessel_type: Option<&str>,
        previous_port: Option<&str>,
    ) -> Result<Vec<DocumentRequirement>, sqlx::Error> {
        let port_code = port_code.trim().to_uppercase();
        let vessel_type = vessel_type
            .map(|vt| vt.trim().to_lowercase())
            .filter(|vt| !vt.is_empty());
        let is_foreign = is_foreign_arrival(previous_port);

        let zone_code = sqlx::query_scalar::<_, String>(
            "SELECT z.code FROM ports p JOIN port_zones z ON z.id = p.zone_id WHERE p.code = $1",
        )
        .bind(&port_code)
        .fetch_optional(executor)
        .await?;

        let mut codes = vec![ALL_US_PORT_CODE.to_string(), port_code];
        codes.extend(zone_code);

        let rows = sqlx::query_as::<_, DocumentRequirement>(
            "SELECT document_name, document_code, is_mandatory, lead_time_hours, \
                    authority, description \
             FROM port_documents \
             WHERE port_code = ANY($1) \
               AND (applies_to_vessel_types IS NULL OR $2 = ANY(applies_to_vessel_types)) \
               AND (applies_if_foreign = false OR $3) \
             ORDER BY document_name",
        )
        .bind(&codes)
        .bind(vessel_type)
        .bind(is_foreign)
        .fetch_all(executor)
        .await?;

        Ok(assemble_requirements(rows, is_foreign))
    }
}
