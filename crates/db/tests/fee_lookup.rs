//! Integration tests for effective-fee lookup against the bundled seeds.

use assert_matches::assert_matches;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use portref_core::applicability::CallContext;
use portref_core::error::CoreError;
use portref_db::error::DbError;
use portref_db::repositories::FeeRepo;
use portref_db::seed::{bundled, SeedApplier};

const CBP: &str = "CBP_COMMERCIAL_VESSEL_ARRIVAL_FEE";
const APHIS: &str = "APHIS_COMMERCIAL_VESSEL";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seeded(pool: &PgPool) {
    let files = bundled::bundled().unwrap();
    SeedApplier::apply_all(pool, &files).await.unwrap();
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dollars(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

async fn rate(pool: &PgPool, code: &str, on: NaiveDate, ctx: &CallContext) -> Option<Decimal> {
    FeeRepo::find_effective(pool, code, on, ctx)
        .await
        .unwrap()
        .map(|fee| fee.rate)
}

async fn port_rate(pool: &PgPool, code: &str, on: NaiveDate, port: &str) -> Option<Decimal> {
    FeeRepo::find_effective_for_port(pool, code, on, port)
        .await
        .unwrap()
        .map(|fee| fee.rate)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cbp_rate_changes_at_fiscal_year(pool: PgPool) {
    seeded(&pool).await;
    let ctx = CallContext::default();

    assert_eq!(rate(&pool, CBP, date(2025, 9, 30), &ctx).await, Some(dollars(57181)));
    assert_eq!(rate(&pool, CBP, date(2025, 10, 1), &ctx).await, Some(dollars(58703)));
    assert_eq!(rate(&pool, CBP, date(2030, 1, 1), &ctx).await, Some(dollars(58703)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_no_fee_before_first_version(pool: PgPool) {
    seeded(&pool).await;
    assert_eq!(rate(&pool, CBP, date(2020, 1, 1), &CallContext::default()).await, None);
    assert_eq!(
        rate(&pool, "NO_SUCH_FEE", date(2025, 5, 1), &CallContext::default()).await,
        None
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_aphis_cascadia_tier(pool: PgPool) {
    seeded(&pool).await;
    let on = date(2025, 5, 1);

    let cascadia = CallContext::default().with_cascadia(true);
    assert_eq!(rate(&pool, APHIS, on, &cascadia).await, Some(dollars(83751)));

    let standard = CallContext::default().with_cascadia(false);
    assert_eq!(rate(&pool, APHIS, on, &standard).await, Some(dollars(290373)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lookup_by_port_uses_port_attributes(pool: PgPool) {
    seeded(&pool).await;
    let on = date(2025, 5, 1);

    assert_eq!(port_rate(&pool, APHIS, on, "PUGET").await, Some(dollars(83751)));
    assert_eq!(port_rate(&pool, APHIS, on, "lalb").await, Some(dollars(290373)));

    assert_eq!(
        port_rate(&pool, "CA_MISP_PER_VOYAGE", on, "SFBAY").await,
        Some(dollars(100000))
    );
    assert_eq!(port_rate(&pool, "CA_MISP_PER_VOYAGE", on, "PUGET").await, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_port_scoped_fee_matches_only_its_port(pool: PgPool) {
    seeded(&pool).await;
    let on = date(2025, 5, 1);

    assert_eq!(port_rate(&pool, "MX_VTS_PER_CALL", on, "LALB").await, Some(dollars(35000)));
    assert_eq!(port_rate(&pool, "MX_VTS_PER_CALL", on, "COLRIV").await, Some(dollars(27500)));
    assert_eq!(port_rate(&pool, "MX_VTS_PER_CALL", on, "STKN").await, None);
    assert_eq!(rate(&pool, "MX_VTS_PER_CALL", on, &CallContext::default()).await, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_port_is_not_found(pool: PgPool) {
    seeded(&pool).await;
    let err = FeeRepo::find_effective_for_port(&pool, CBP, date(2025, 5, 1), "NOPE")
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::NotFound { entity: "port", .. }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_equally_specific_rows_are_a_conflict(pool: PgPool) {
    // Written straight through the repository, bypassing the applier's
    // overlap check.
    for start in ["2025-01-01", "2025-03-01"] {
        let dto = serde_json::from_value(serde_json::json!({
            "code": "TEST_FEE",
            "name": "Test Fee",
            "scope": "federal",
            "unit": "per_call",
            "rate": "1.00",
            "effective_start": start,
        }))
        .unwrap();
        FeeRepo::insert_version_if_absent(&pool, &dto).await.unwrap().unwrap();
    }

    let err = FeeRepo::find_effective(&pool, "TEST_FEE", date(2025, 6, 1), &CallContext::default())
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Conflict(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_insert_if_absent_treats_null_dimensions_as_equal(pool: PgPool) {
    let dto: portref_db::models::fee::CreateFeeVersion =
        serde_json::from_value(serde_json::json!({
            "code": "TEST_FEE",
            "name": "Test Fee",
            "scope": "federal",
            "unit": "per_call",
            "rate": "1.00",
            "effective_start": "2025-01-01",
        }))
        .unwrap();

    assert!(FeeRepo::insert_version_if_absent(&pool, &dto).await.unwrap().is_some());
    assert!(FeeRepo::insert_version_if_absent(&pool, &dto).await.unwrap().is_none());
    assert_eq!(FeeRepo::list_versions(&pool, "TEST_FEE").await.unwrap().len(), 1);
}
