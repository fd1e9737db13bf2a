use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    portref_db::health_check(&pool).await.unwrap();

    let tables = [
        "port_zones",
        "ports",
        "terminals",
        "port_documents",
        "fees",
        "sources",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// Running the embedded migrator against an up-to-date database is a no-op.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_run_migrations_twice(pool: PgPool) {
    portref_db::run_migrations(&pool).await.unwrap();
    portref_db::run_migrations(&pool).await.unwrap();
}

const ZONE_ID_MIGRATION: &str =
    include_str!("../../../db/migrations/20250801000008_add_zone_id_to_ports.sql");

async fn assert_zone_id_in_place(pool: &PgPool) {
    let columns: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM information_schema.columns
         WHERE table_schema = 'public' AND table_name = 'ports' AND column_name = 'zone_id'",
    )
    .fetch_one(pool)
    .await
    .unwrap();
    assert_eq!(columns.0, 1);

    let (delete_rule, update_rule): (String, String) = sqlx::query_as(
        "SELECT delete_rule, update_rule
         FROM information_schema.referential_constraints
         WHERE constraint_schema = 'public' AND constraint_name = 'fk_ports_zone_id'",
    )
    .fetch_one(pool)
    .await
    .unwrap();
    assert_eq!(delete_rule, "SET NULL");
    assert_eq!(update_rule, "CASCADE");

    let indexes: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM pg_indexes
         WHERE schemaname = 'public' AND indexname = 'idx_ports_zone_id'",
    )
    .fetch_one(pool)
    .await
    .unwrap();
    assert_eq!(indexes.0, 1);
}

/// Replaying the `zone_id` migration against a fully migrated schema
/// changes nothing.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_zone_id_migration_is_rerunnable(pool: PgPool) {
    sqlx::raw_sql(ZONE_ID_MIGRATION).execute(&pool).await.unwrap();
    sqlx::raw_sql(ZONE_ID_MIGRATION).execute(&pool).await.unwrap();
    assert_zone_id_in_place(&pool).await;
}

/// Column present but foreign key missing: only the constraint is added.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_zone_id_migration_restores_missing_fk(pool: PgPool) {
    sqlx::query("ALTER TABLE ports DROP CONSTRAINT fk_ports_zone_id")
        .execute(&pool)
        .await
        .unwrap();

    sqlx::raw_sql(ZONE_ID_MIGRATION).execute(&pool).await.unwrap();
    assert_zone_id_in_place(&pool).await;
}

/// Column missing entirely: column, foreign key and index are all recreated.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_zone_id_migration_restores_missing_column(pool: PgPool) {
    sqlx::query("ALTER TABLE ports DROP COLUMN zone_id")
        .execute(&pool)
        .await
        .unwrap();

    sqlx::raw_sql(ZONE_ID_MIGRATION).execute(&pool).await.unwrap();
    assert_zone_id_in_place(&pool).await;
}

/// The `updated_at` trigger advances the timestamp on update.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_updated_at_trigger(pool: PgPool) {
    let (id, created_at, inserted_updated_at): (
        i64,
        chrono::DateTime<chrono::Utc>,
        chrono::DateTime<chrono::Utc>,
    ) = sqlx::query_as(
        "INSERT INTO port_zones (code, name, country) VALUES ('TESTZ', 'Test', 'US')
         RETURNING id, created_at, updated_at",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(created_at, inserted_updated_at);

    // now() is the transaction start time; make sure the update's differs.
    sqlx::query("SELECT pg_sleep(0.01)")
        .execute(&pool)
        .await
        .unwrap();

    let (updated_at, still_created_at): (
        chrono::DateTime<chrono::Utc>,
        chrono::DateTime<chrono::Utc>,
    ) = sqlx::query_as(
        "UPDATE port_zones SET name = 'Renamed' WHERE id = $1 RETURNING updated_at, created_at",
    )
    .bind(id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert!(
        updated_at > inserted_updated_at,
        "updated_at should advance on update: {inserted_updated_at} -> {updated_at}"
    );
    assert_eq!(still_created_at, created_at);
}
