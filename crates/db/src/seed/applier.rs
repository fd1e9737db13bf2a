//! Applies seed files to the database.
//!
//! Each file runs inside one transaction. Any error drops the transaction,
//! so a file is either applied completely or not at all.

use sqlx::PgConnection;

use portref_core::lookup::{overlap_with_existing, FeeVersion};
use portref_core::seed::{SeedOutcome, SeedPolicy};
use portref_core::validation::ALL_US_PORT_CODE;

use super::document::SeedFile;
use super::report::SeedReport;
use crate::error::DbError;
use crate::models::fee::CreateFeeVersion;
use crate::repositories::{
    FeeRepo, PortDocumentRepo, PortRepo, SourceRepo, TerminalRepo, ZoneRepo,
};
use crate::DbPool;

/// Applies parsed seed files.
pub struct SeedApplier;

impl SeedApplier {
    /// Apply every file in order, stopping at the first failure.
    ///
    /// Files applied before the failing one stay committed.
    pub async fn apply_all(pool: &DbPool, files: &[SeedFile]) -> Result<Vec<SeedReport>, DbError> {
        let mut reports = Vec::with_capacity(files.len());
        for file in files {
            reports.push(Self::apply(pool, file).await?);
        }
        Ok(reports)
    }

    /// Validate and apply one seed file in a single transaction.
    #[tracing::instrument(name = "seed_file", skip_all, fields(file = %file.name))]
    pub async fn apply(pool: &DbPool, file: &SeedFile) -> Result<SeedReport, DbError> {
        file.document.validate()?;

        let mut tx = pool.begin().await?;
        let report = Self::apply_sections(&mut *tx, file).await?;
        tx.commit().await?;

        let total = report.total();
        tracing::info!(
            inserted = total.inserted,
            updated = total.updated,
            unchanged = total.unchanged,
            skipped = total.skipped,
            diverged_fees = report.diverged_fees,
            zones = report.zones.total(),
            ports = report.ports.total(),
            terminals = report.terminals.total(),
            port_documents = report.port_documents.total(),
            sources = report.sources.total(),
            fees = report.fees.total(),
            "Seed file applied"
        );
        Ok(report)
    }

    async fn apply_sections(
        conn: &mut PgConnection,
        file: &SeedFile,
    ) -> Result<SeedReport, DbError> {
        let doc = &file.document;
        let mut report = SeedReport::new(&file.name);

        tracing::debug!(policy = SeedPolicy::NaturalKeyUpsert.as_str(), "Applying entities");

        for zone in &doc.zones {
            report.zones.record(ZoneRepo::upsert(&mut *conn, zone).await?);
        }

        for port in &doc.ports {
            let zone_id = match &port.zone_code {
                Some(zone_code) => Some(
                    ZoneRepo::find_id_by_code(&mut *conn, zone_code)
                        .await?
                        .ok_or_else(|| DbError::MissingReference {
                            entity: "zone",
                            code: zone_code.clone(),
                            referenced_by: format!("port {}", port.code),
                        })?,
                ),
                None => None,
            };
            report.ports.record(PortRepo::upsert(&mut *conn, zone_id, port).await?);
        }

        for terminal in &doc.terminals {
            let port_id = PortRepo::find_id_by_code(&mut *conn, &terminal.port_code)
                .await?
                .ok_or_else(|| DbError::MissingReference {
                    entity: "port",
                    code: terminal.port_code.clone(),
                    referenced_by: format!("terminal {}", terminal.code),
                })?;
            report
                .terminals
                .record(TerminalRepo::upsert(&mut *conn, port_id, terminal).await?);
        }

        for document in &doc.port_documents {
            Self::check_document_owner(conn, &document.port_code, &document.document_name)
                .await?;
            report
                .port_documents
                .record(PortDocumentRepo::upsert(&mut *conn, document).await?);
        }

        for source in &doc.sources {
            report.sources.record(SourceRepo::upsert(&mut *conn, source).await?);
        }

        tracing::debug!(
            policy = SeedPolicy::VersionedInsertIfAbsent.as_str(),
            "Applying fee versions"
        );

        for fee in &doc.fees {
            Self::apply_fee(conn, fee, &mut report).await?;
        }

        Ok(report)
    }

    /// Document rows hang off `ALL_US`, a port code or a zone code.
    async fn check_document_owner(
        conn: &mut PgConnection,
        owner: &str,
        document_name: &str,
    ) -> Result<(), DbError> {
        if owner == ALL_US_PORT_CODE {
            return Ok(());
        }
        if PortRepo::find_id_by_code(&mut *conn, owner).await?.is_some()
            || ZoneRepo::find_id_by_code(&mut *conn, owner).await?.is_some()
        {
            return Ok(());
        }
        Err(DbError::MissingReference {
            entity: "port or zone",
            code: owner.to_string(),
            referenced_by: format!("document '{document_name}'"),
        })
    }

    async fn apply_fee(
        conn: &mut PgConnection,
        fee: &CreateFeeVersion,
        report: &mut SeedReport,
    ) -> Result<(), DbError> {
        if let Some(port_code) = &fee.applies_port_code {
            if PortRepo::find_id_by_code(&mut *conn, port_code).await?.is_none() {
                return Err(DbError::MissingReference {
                    entity: "port",
                    code: port_code.clone(),
                    referenced_by: format!("fee {}", fee.code),
                });
            }
        }

        let versions = FeeRepo::list_versions(&mut *conn, &fee.code).await?;
        if let Some(overlap) = overlap_with_existing(fee, &versions) {
            return Err(DbError::OverlappingVersion(overlap));
        }

        if let Some(id) = FeeRepo::insert_version_if_absent(&mut *conn, fee).await? {
            tracing::debug!(
                id,
                code = %fee.code,
                start = %fee.effective_start,
                "Fee version inserted"
            );
            report.fees.record(SeedOutcome::Inserted);
            return Ok(());
        }

        report.fees.record(SeedOutcome::Skipped);
        let stored = FeeRepo::find_version(
            &mut *conn,
            &fee.code,
            fee.effective_start,
            &fee.applicability(),
        )
        .await?;
        if stored.is_some_and(|row| row.differs_from(fee)) {
            tracing::warn!(
                code = %fee.code,
                start = %fee.effective_start,
                "Seed differs from stored fee version; keeping stored row"
            );
            report.diverged_fees += 1;
        }
        Ok(())
    }
}
