//! Integration tests for the seed applier.
//!
//! - Bundled seeds apply cleanly and re-apply as a no-op
//! - Natural-key upserts update in place
//! - Stored fee versions are never rewritten
//! - A failing file rolls back completely

use assert_matches::assert_matches;
use rust_decimal::Decimal;
use sqlx::PgPool;

use portref_core::applicability::Applicability;
use portref_core::seed::SeedTally;
use portref_db::error::DbError;
use portref_db::repositories::{FeeRepo, ZoneRepo};
use portref_db::seed::{bundled, SeedApplier, SeedFile};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn apply_bundled(pool: &PgPool) -> SeedTally {
    let files = bundled::bundled().unwrap();
    let reports = SeedApplier::apply_all(pool, &files).await.unwrap();
    let mut total = SeedTally::default();
    for report in &reports {
        total.merge(&report.total());
    }
    total
}

async fn count(pool: &PgPool, table: &str) -> i64 {
    let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap();
    n
}

async fn table_counts(pool: &PgPool) -> Vec<i64> {
    let mut counts = Vec::new();
    for table in [
        "port_zones",
        "ports",
        "terminals",
        "port_documents",
        "sources",
        "fees",
    ] {
        counts.push(count(pool, table).await);
    }
    counts
}

fn seed(name: &str, json: &str) -> SeedFile {
    SeedFile::parse(name, json).unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bundled_seeds_apply(pool: PgPool) {
    let first = apply_bundled(&pool).await;
    assert_eq!(first.updated, 0);
    assert_eq!(first.skipped, 0);
    assert_eq!(first.inserted, first.total());

    assert_eq!(count(&pool, "port_zones").await, 4);
    assert_eq!(count(&pool, "ports").await, 7);
    assert_eq!(count(&pool, "terminals").await, 9);
    assert_eq!(count(&pool, "fees").await, 10);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reapplying_seeds_is_a_no_op(pool: PgPool) {
    let first = apply_bundled(&pool).await;
    let before = table_counts(&pool).await;

    let files = bundled::bundled().unwrap();
    let reports = SeedApplier::apply_all(&pool, &files).await.unwrap();
    assert!(reports.iter().all(|r| r.diverged_fees == 0));
    let mut second = SeedTally::default();
    for report in &reports {
        second.merge(&report.total());
    }
    assert_eq!(table_counts(&pool).await, before);
    assert_eq!(second.written(), 0);
    assert_eq!(second.total(), first.total());
    assert_eq!(second.skipped as i64, count(&pool, "fees").await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_changed_entity_updates_in_place(pool: PgPool) {
    apply_bundled(&pool).await;
    let before = count(&pool, "port_zones").await;

    let file = seed(
        "100_rename.json",
        r#"{"zones": [{"code": "PUGET", "name": "Puget Sound Pilotage District",
                       "region": "Pacific Northwest", "primary_state": "WA"}]}"#,
    );
    let report = SeedApplier::apply(&pool, &file).await.unwrap();
    assert_eq!(report.zones.updated, 1);

    assert_eq!(count(&pool, "port_zones").await, before);
    let zone = ZoneRepo::find_by_code(&pool, "PUGET").await.unwrap().unwrap();
    assert_eq!(zone.name, "Puget Sound Pilotage District");

    let again = SeedApplier::apply(&pool, &file).await.unwrap();
    assert_eq!(again.zones.unchanged, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stored_fee_version_is_not_rewritten(pool: PgPool) {
    apply_bundled(&pool).await;

    let file = seed(
        "100_restated.json",
        r#"{"fees": [{"code": "CBP_COMMERCIAL_VESSEL_ARRIVAL_FEE",
                      "name": "CBP Commercial Vessel Arrival Fee", "scope": "federal",
                      "unit": "per_call", "rate": "600.00", "cap_amount": "7999.40",
                      "cap_period": "calendar_year", "effective_start": "2025-10-01"}]}"#,
    );
    let report = SeedApplier::apply(&pool, &file).await.unwrap();
    assert_eq!(report.fees.skipped, 1);
    assert_eq!(report.diverged_fees, 1);

    let versions = FeeRepo::list_versions(&pool, "CBP_COMMERCIAL_VESSEL_ARRIVAL_FEE")
        .await
        .unwrap();
    assert_eq!(versions.len(), 2);
    assert_eq!(versions[1].rate, Decimal::new(58703, 2));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_recited_fee_version_is_reported_but_kept(pool: PgPool) {
    apply_bundled(&pool).await;
    let original = FeeRepo::list_versions(&pool, "CA_MISP_PER_VOYAGE")
        .await
        .unwrap()
        .remove(0);

    let file = seed(
        "100_recite.json",
        r#"{"fees": [{"code": "CA_MISP_PER_VOYAGE",
                      "name": "California Marine Invasive Species Program Fee",
                      "scope": "state", "unit": "per_voyage", "rate": "1000.00",
                      "applies_state": "CA", "effective_start": "2024-01-01",
                      "source_url": "https://www.slc.ca.gov/misp/fees/",
                      "authority": "Cal. Pub. Resources Code 71215(a)"}]}"#,
    );
    let report = SeedApplier::apply(&pool, &file).await.unwrap();
    assert_eq!(report.fees.skipped, 1);
    assert_eq!(report.diverged_fees, 1);

    let stored = FeeRepo::find_version(
        &pool,
        "CA_MISP_PER_VOYAGE",
        original.effective_start,
        &Applicability {
            state: Some("CA".into()),
            ..Applicability::general()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(stored.id, original.id);
    assert_eq!(stored.source_url, original.source_url);
    assert_eq!(stored.authority, original.authority);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_new_fee_version_appends(pool: PgPool) {
    apply_bundled(&pool).await;

    let file = seed(
        "100_vts_2026.json",
        r#"{"fees": [{"code": "MX_VTS_PER_CALL", "name": "VTS", "scope": "port",
                      "unit": "per_call", "rate": "360.00", "applies_port_code": "STKN",
                      "effective_start": "2026-01-01"}]}"#,
    );
    let report = SeedApplier::apply(&pool, &file).await.unwrap();
    assert_eq!(report.fees.inserted, 1);
    assert_eq!(count(&pool, "fees").await, 11);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_overlapping_version_rolls_back_file(pool: PgPool) {
    apply_bundled(&pool).await;
    let before = table_counts(&pool).await;

    let file = seed(
        "100_overlap.json",
        r#"{"zones": [{"code": "TESTZ", "name": "Test Zone"}],
            "fees": [{"code": "CBP_COMMERCIAL_VESSEL_ARRIVAL_FEE", "name": "CBP",
                      "scope": "federal", "unit": "per_call", "rate": "610.00",
                      "effective_start": "2026-01-01"}]}"#,
    );
    let err = SeedApplier::apply(&pool, &file).await.unwrap_err();
    assert_matches!(err, DbError::OverlappingVersion(overlap)
        if overlap.code == "CBP_COMMERCIAL_VESSEL_ARRIVAL_FEE");

    assert_eq!(table_counts(&pool).await, before);
    assert!(ZoneRepo::find_by_code(&pool, "TESTZ").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_reference_is_fatal(pool: PgPool) {
    apply_bundled(&pool).await;
    let before = table_counts(&pool).await;

    let file = seed(
        "100_orphan.json",
        r#"{"zones": [{"code": "TESTZ", "name": "Test Zone"}],
            "terminals": [{"code": "NOPE_T1", "port_code": "NOPE", "name": "Orphan"}]}"#,
    );
    let err = SeedApplier::apply(&pool, &file).await.unwrap_err();
    assert_matches!(err, DbError::MissingReference { entity: "port", ref code, .. }
        if code == "NOPE");
    assert_eq!(table_counts(&pool).await, before);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_zone_on_port_is_fatal(pool: PgPool) {
    let file = seed(
        "001_bad_zone.json",
        r#"{"ports": [{"code": "TEST", "name": "Test Port", "zone_code": "NOWHERE"}]}"#,
    );
    let err = SeedApplier::apply(&pool, &file).await.unwrap_err();
    assert_matches!(err, DbError::MissingReference { entity: "zone", .. });
    assert_eq!(count(&pool, "ports").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_apply_all_stops_at_first_failure(pool: PgPool) {
    let files = vec![
        seed("001_ok.json", r#"{"zones": [{"code": "TESTZ", "name": "Test Zone"}]}"#),
        seed(
            "002_bad.json",
            r#"{"terminals": [{"code": "NOPE_T1", "port_code": "NOPE", "name": "Orphan"}]}"#,
        ),
        seed("003_never.json", r#"{"zones": [{"code": "LATER", "name": "Later"}]}"#),
    ];
    assert!(SeedApplier::apply_all(&pool, &files).await.is_err());

    assert!(ZoneRepo::find_by_code(&pool, "TESTZ").await.unwrap().is_some());
    assert!(ZoneRepo::find_by_code(&pool, "LATER").await.unwrap().is_none());
}
