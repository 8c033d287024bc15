use std::path::Path;

use clap::Parser;

use super::*;

#[test]
fn parses_ingest_with_defaults() {
    let cli = Cli::try_parse_from(["flyerdb-cli", "ingest"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Ingest {
            path: None,
            store: None,
            dry_run: false
        })
    ));
}

#[test]
fn parses_ingest_with_path_store_and_dry_run() {
    let cli = Cli::try_parse_from([
        "flyerdb-cli",
        "ingest",
        "staging/weeklyad_2026-03-04.txt",
        "--store",
        "albertsons",
        "--dry-run",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Ingest {
        path,
        store,
        dry_run,
    }) = cli.command
    else {
        panic!("expected ingest command");
    };
    assert_eq!(
        path.as_deref().and_then(Path::to_str),
        Some("staging/weeklyad_2026-03-04.txt")
    );
    assert_eq!(store.as_deref(), Some("albertsons"));
    assert!(dry_run);
}

#[test]
fn parses_latest_command() {
    let cli = Cli::try_parse_from(["flyerdb-cli", "latest"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Latest { store: None })));
}

#[test]
fn parses_db_ping_command() {
    let cli = Cli::try_parse_from(["flyerdb-cli", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_migrate_command() {
    let cli =
        Cli::try_parse_from(["flyerdb-cli", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["flyerdb-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}
