//! # TaskTrack Migration Runner
//!
//! Applies or reverses the TaskTrack schema against the database described
//! by `DATABASE_URL` (or the `POSTGRES_*` variables).
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p tasktrack-migrate -- upgrade --create-database
//! cargo run -p tasktrack-migrate -- status
//! cargo run -p tasktrack-migrate -- downgrade
//! ```
//!
//! Each direction runs in a single transaction. Errors are reported as they
//! come back from PostgreSQL and the process exits non-zero.

use anyhow::Context;
use clap::{Parser, Subcommand};
use tasktrack_schema::config::Config;
use tasktrack_schema::db::migrations::{self, SchemaState};
use tasktrack_schema::db::pool::{close_pool, create_pool};
use tasktrack_schema::revisions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "tasktrack-migrate", version, about = "Apply or reverse the TaskTrack schema")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the users, tasks and comments tables
    Upgrade {
        /// Create the target database first if it does not exist
        #[arg(long)]
        create_database: bool,
    },

    /// Drop the comments, tasks and users tables (destroys their data)
    Downgrade,

    /// Show whether the schema is absent, present or partial
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasktrack_migrate=info,tasktrack_schema=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    tracing::info!(
        "TaskTrack migration runner v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env().context("Failed to load configuration")?;

    if let Command::Upgrade {
        create_database: true,
    } = cli.command
    {
        migrations::ensure_database_exists(&config.database.url)
            .await
            .context("Failed to create database")?;
    }

    let pool = create_pool(config.database.clone())
        .await
        .context("Failed to connect to database")?;

    let result = run(&pool, cli.command).await;

    close_pool(pool).await;
    result
}

async fn run(pool: &sqlx::PgPool, command: Command) -> anyhow::Result<()> {
    let chain = revisions::all();

    match command {
        Command::Upgrade { .. } => {
            for migration in &chain {
                migrations::upgrade(pool, migration.as_ref())
                    .await
                    .with_context(|| format!("Upgrade to {} failed", migration.revision()))?;
            }
        }
        Command::Downgrade => {
            for migration in chain.iter().rev() {
                migrations::downgrade(pool, migration.as_ref())
                    .await
                    .with_context(|| format!("Downgrade of {} failed", migration.revision()))?;
            }
        }
        Command::Status => {
            let state = migrations::schema_state(pool).await?;
            println!("schema: {}", state);
            for migration in &chain {
                println!(
                    "  {} (follows: {})",
                    migration.revision(),
                    migration.down_revision().unwrap_or("none")
                );
            }
            if let SchemaState::Partial(_) = state {
                tracing::warn!("Schema is partially applied, inspect the database before migrating");
            }
        }
    }

    Ok(())
}
