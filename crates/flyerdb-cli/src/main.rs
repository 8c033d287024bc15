use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod ingest;

#[derive(Debug, Parser)]
#[command(name = "flyerdb-cli")]
#[command(about = "Weekly flyer ingestion and price comparison CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse a staged flyer scrape and store it as structured price records.
    Ingest {
        /// Path to the staging file. Defaults to the newest `weeklyad_*`
        /// file in the configured staging directory.
        path: Option<PathBuf>,
        /// Store slug recorded on the flyer row.
        #[arg(long)]
        store: Option<String>,
        /// Classify and normalize, print a summary, and skip the database write.
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the most recently ingested flyer and its line items.
    Latest {
        /// Store slug to look up.
        #[arg(long)]
        store: Option<String>,
    },
    /// Database maintenance commands.
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Verify the database connection.
    Ping,
    /// Run pending migrations.
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Ingest {
            path,
            store,
            dry_run,
        }) => ingest::run_ingest(path.as_deref(), store.as_deref(), dry_run).await,
        Some(Commands::Latest { store }) => ingest::run_latest(store.as_deref()).await,
        Some(Commands::Db {
            command: DbCommands::Ping,
        }) => {
            let pool = flyerdb_db::connect_pool_from_env().await?;
            flyerdb_db::ping(&pool).await?;
            println!("database ok");
            Ok(())
        }
        Some(Commands::Db {
            command: DbCommands::Migrate,
        }) => {
            let pool = flyerdb_db::connect_pool_from_env().await?;
            let applied = flyerdb_db::run_migrations(&pool).await?;
            println!("applied {applied} migrations");
            Ok(())
        }
        None => {
            println!("flyerdb-cli: see --help for commands");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
