use portref_core::error::CoreError;
use portref_core::lookup::VersionOverlap;

/// Errors raised while migrating, seeding or querying reference data.
///
/// Every variant is fatal to the seed file being applied: the surrounding
/// transaction is dropped and nothing from that file is kept.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A domain-level error from `portref_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx (constraint violations included).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A seed file that is not a valid seed document.
    #[error("Seed file {file} is malformed: {source}")]
    MalformedSeed {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not read seed file {file}: {source}")]
    SeedIo {
        file: String,
        #[source]
        source: std::io::Error,
    },

    /// A seed row names a parent (zone or port) that does not exist.
    #[error("{entity} '{code}' referenced by {referenced_by} does not exist")]
    MissingReference {
        entity: &'static str,
        code: String,
        referenced_by: String,
    },

    /// A new fee version would overlap a stored one.
    #[error("Fee version overlaps an existing version: {0}")]
    OverlappingVersion(VersionOverlap),
}

impl DbError {
    /// Whether the error is a Postgres integrity constraint violation
    /// (SQLSTATE class 23: unique, foreign key, not-null, check).
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            DbError::Database(sqlx::Error::Database(db_err)) => db_err
                .code()
                .is_some_and(|code| code.starts_with("23")),
            _ => false,
        }
    }
}
