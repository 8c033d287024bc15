//! Ingestion command handlers for the CLI.
//!
//! These are called from `main` after logging is initialized. The flow
//! mirrors the data path: staging file → classify/normalize → Postgres.
//! Fatal input conditions (no staging file, empty scrape, missing validity
//! window) abort the run; per-line problems were already absorbed by the
//! engine as drops and nulled fields.

use std::path::Path;

use flyerdb_core::FlyerBatch;
use flyerdb_fetch::{find_latest_staging, Fetcher, StagingFile};

/// Resolve the staging file to ingest: an explicit path wins, otherwise the
/// newest `weeklyad_*` file in the configured staging directory.
fn resolve_staging_path(
    explicit: Option<&Path>,
    config: &flyerdb_core::AppConfig,
) -> anyhow::Result<std::path::PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    find_latest_staging(&config.staging_dir).ok_or_else(|| {
        anyhow::anyhow!(
            "no weeklyad_* staging file found in {}",
            config.staging_dir.display()
        )
    })
}

/// Parse one staged flyer scrape and store it as a flyer with line items.
///
/// When `dry_run` is `true` the function prints what would be stored and
/// returns without touching the database.
///
/// # Errors
///
/// Returns an error if configuration is incomplete, the staging file cannot
/// be located or read, the scrape fails validation (no lines or no validity
/// window), or the database write fails.
pub(crate) async fn run_ingest(
    path: Option<&Path>,
    store: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let config = flyerdb_core::load_app_config()?;
    let store = store.unwrap_or(&config.store_slug);

    let staging_path = resolve_staging_path(path, &config)?;
    tracing::info!(path = %staging_path.display(), store, "ingesting staged flyer");

    let scrape = StagingFile::new(&staging_path).fetch()?;
    let scraped_lines = scrape.lines.len();

    let batch = flyerdb_engine::assemble_batch(&scrape)?;
    tracing::info!(
        scraped = scraped_lines,
        kept = batch.item_count(),
        "normalized flyer batch"
    );

    if dry_run {
        print_batch_summary(store, &batch);
        return Ok(());
    }

    let pool = flyerdb_db::connect_pool(
        &config.database_url,
        flyerdb_db::PoolConfig {
            max_connections: config.db_max_connections,
            min_connections: config.db_min_connections,
            acquire_timeout_secs: config.db_acquire_timeout_secs,
        },
    )
    .await?;

    let flyer_id = flyerdb_db::insert_flyer_batch(&pool, store, &batch).await?;
    println!(
        "stored flyer {flyer_id} for {store} ({} - {}, {} items)",
        batch.valid_from,
        batch.valid_until,
        batch.item_count()
    );

    Ok(())
}

/// Print the most recently ingested flyer for a store.
///
/// # Errors
///
/// Returns an error if configuration is incomplete or the database cannot
/// be queried.
pub(crate) async fn run_latest(store: Option<&str>) -> anyhow::Result<()> {
    let config = flyerdb_core::load_app_config()?;
    let store = store.unwrap_or(&config.store_slug);

    let pool = flyerdb_db::connect_pool(
        &config.database_url,
        flyerdb_db::PoolConfig {
            max_connections: config.db_max_connections,
            min_connections: config.db_min_connections,
            acquire_timeout_secs: config.db_acquire_timeout_secs,
        },
    )
    .await?;

    let Some(flyer) = flyerdb_db::get_latest_flyer(&pool, store).await? else {
        println!("no flyers ingested for {store}");
        return Ok(());
    };

    println!(
        "flyer {} for {} ({} - {})",
        flyer.id, flyer.store, flyer.valid_from, flyer.valid_until
    );

    let items = flyerdb_db::list_flyer_items(&pool, flyer.id).await?;
    for item in items {
        let unit_price = item
            .unit_price
            .map_or_else(|| "-".to_string(), |p| format!("${p}"));
        let deal = item.deal.as_deref().unwrap_or("-");
        println!(
            "  {:<40} unit {:>8}  x{:<3} deal: {deal}",
            item.product, unit_price, item.units
        );
    }

    Ok(())
}

/// Dry-run output: one line per item that would be stored.
fn print_batch_summary(store: &str, batch: &FlyerBatch) {
    println!(
        "dry-run: would store {} items for {store} flyer {} - {}",
        batch.item_count(),
        batch.valid_from,
        batch.valid_until
    );
    for item in &batch.items {
        let unit_price = item
            .unit_price
            .map_or_else(|| "-".to_string(), |p| format!("${p:.2}"));
        println!("  {:<40} unit {:>8}  x{}", item.product, unit_price, item.units);
    }
}
