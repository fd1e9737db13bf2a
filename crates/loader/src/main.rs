use anyhow::Context;
use clap::Parser;

use portref_loader::cli::{Cli, Command};
use portref_loader::config::LoaderConfig;
use portref_loader::{commands, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = LoaderConfig::from_env()?;
    logging::init(config.log_format);

    let pool = portref_db::create_pool(&config.database_url, config.max_connections)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connection pool created");

    portref_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    tracing::info!("Database health check passed");

    match cli.command() {
        Command::Migrate => commands::migrate(&pool).await,
        Command::Seed(args) => {
            let dir = args.dir.or(config.seed_dir);
            commands::seed(&pool, dir.as_deref()).await
        }
        Command::Lookup(args) => commands::lookup(&pool, &args).await,
        Command::Verify => commands::verify(&pool).await,
    }
}
