use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use db_infra::config::db::RuntimeEnv;
use db_infra::orchestrate_migration;
use migration::MigrationCommand;
use tracing::error;

#[derive(Clone, Copy, ValueEnum)]
enum Target {
    /// `PROD_DB`
    Prod,
    /// `TEST_DB` (must end with `_test`)
    Test,
}

impl From<Target> for RuntimeEnv {
    fn from(target: Target) -> Self {
        match target {
            Target::Prod => RuntimeEnv::Prod,
            Target::Test => RuntimeEnv::Test,
        }
    }
}

/// Apply or inspect GRIGO ERP schema migrations.
#[derive(Parser)]
#[command(name = "migration", version)]
struct Args {
    /// up | down | fresh | reset | refresh | status
    #[arg(value_parser = str::parse::<MigrationCommand>)]
    command: MigrationCommand,

    #[arg(short, long, value_enum, default_value = "test")]
    env: Target,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,db_infra=info,sqlx=warn")
        .init();

    let args = Args::parse();

    match orchestrate_migration(args.env.into(), args.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "migration failed");
            ExitCode::FAILURE
        }
    }
}
