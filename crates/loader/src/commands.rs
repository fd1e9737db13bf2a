//! Subcommand implementations.

use std::path::Path;

use anyhow::Context;

use portref_core::lookup::find_overlaps;
use portref_core::seed::SeedTally;
use portref_db::repositories::FeeRepo;
use portref_db::seed::{bundled, SeedApplier};
use portref_db::DbPool;

use crate::cli::LookupArgs;

pub async fn migrate(pool: &DbPool) -> anyhow::Result<()> {
    portref_db::run_migrations(pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Migrate, then apply seed files from `dir` or the bundled set.
pub async fn seed(pool: &DbPool, dir: Option<&Path>) -> anyhow::Result<()> {
    migrate(pool).await?;

    let files = match dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "Loading seed files from directory");
            bundled::load_dir(dir)?
        }
        None => bundled::bundled()?,
    };
    tracing::info!(files = files.len(), "Applying seed files");

    let reports = SeedApplier::apply_all(pool, &files)
        .await
        .context("Seeding aborted")?;

    let mut total = SeedTally::default();
    for report in &reports {
        total.merge(&report.total());
    }
    tracing::info!(
        files = reports.len(),
        inserted = total.inserted,
        updated = total.updated,
        unchanged = total.unchanged,
        skipped = total.skipped,
        "Seeding complete"
    );
    Ok(())
}

/// Print the matching fee row as JSON, or `null` when none is in force.
pub async fn lookup(pool: &DbPool, args: &LookupArgs) -> anyhow::Result<()> {
    let fee = match &args.port {
        Some(port) => FeeRepo::find_effective_for_port(pool, &args.code, args.date, port).await?,
        None => FeeRepo::find_effective(pool, &args.code, args.date, &args.call_context()).await?,
    };

    if fee.is_none() {
        tracing::warn!(code = %args.code, date = %args.date, "No fee version in force");
    }
    println!("{}", serde_json::to_string_pretty(&fee)?);
    Ok(())
}

/// Fail when any two stored versions of a fee overlap.
pub async fn verify(pool: &DbPool) -> anyhow::Result<()> {
    let fees = FeeRepo::list_all(pool).await?;
    let overlaps = find_overlaps(&fees);

    for overlap in &overlaps {
        tracing::error!(%overlap, "Overlapping fee versions");
    }
    if !overlaps.is_empty() {
        anyhow::bail!("{} overlapping fee version pair(s) found", overlaps.len());
    }

    tracing::info!(versions = fees.len(), "No overlapping fee versions");
    Ok(())
}
