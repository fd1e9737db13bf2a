use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use portref_core::applicability::CallContext;

/// Loads and queries the port fee reference dataset.
#[derive(Debug, Parser)]
#[command(name = "portref-loader", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The requested subcommand; `seed` when none was given.
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Seed(SeedArgs::default()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Apply pending schema migrations.
    Migrate,
    /// Apply migrations, then every seed file in filename order.
    Seed(SeedArgs),
    /// Print the fee version in force on a date as JSON.
    Lookup(LookupArgs),
    /// Report fee versions whose validity intervals overlap.
    Verify,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct SeedArgs {
    /// Directory of `*.json` seed files (overrides `SEED_DIR`).
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct LookupArgs {
    /// Fee code, e.g. `CBP_COMMERCIAL_VESSEL_ARRIVAL_FEE`.
    #[arg(long)]
    pub code: String,

    /// Date of the call (`YYYY-MM-DD`).
    #[arg(long)]
    pub date: NaiveDate,

    /// Take state and Cascadia flag from a stored port.
    #[arg(long, conflicts_with_all = ["state", "cascadia"])]
    pub port: Option<String>,

    /// Two-letter state of the call.
    #[arg(long)]
    pub state: Option<String>,

    /// The call is in the Cascadia region.
    #[arg(long)]
    pub cascadia: bool,
}

impl LookupArgs {
    /// Context for a lookup without `--port`.
    pub fn call_context(&self) -> CallContext {
        let ctx = CallContext::default().with_cascadia(self.cascadia);
        match &self.state {
            Some(state) => ctx.with_state(state.trim().to_uppercase()),
            None => ctx,
        }
    }
}
