//! Database operations for the `flyers` and `flyer_items` tables.
//!
//! A flyer is written as one parent row plus its child line items. The
//! write is compensated, not transactional across calls: if any child
//! insert fails, the parent row is deleted so a flyer without items never
//! survives, and the whole batch is safe to retry as a unit.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;

use flyerdb_core::{FlyerBatch, NormalizedItem};

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `flyers` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FlyerRow {
    pub id: i64,
    pub store: String,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// A row from the `flyer_items` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FlyerItemRow {
    pub id: i64,
    pub flyer_id: i64,
    pub product: String,
    pub deal: Option<String>,
    /// Total bundle price as `NUMERIC(10,2)`.
    pub price: Option<Decimal>,
    /// Comparable per-unit price as `NUMERIC(10,2)`.
    pub unit_price: Option<Decimal>,
    pub units: i32,
    pub ounces: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// Convert an engine-side `f64` money/weight value to its `NUMERIC(10,2)`
/// representation. The engine already rounds to two decimals; rounding
/// again here squeezes out binary float noise at the persistence boundary.
fn to_numeric(value: Option<f64>) -> Option<Decimal> {
    value.and_then(Decimal::from_f64).map(|d| d.round_dp(2))
}

// ---------------------------------------------------------------------------
// flyers operations
// ---------------------------------------------------------------------------

/// Inserts one flyer and all of its line items.
///
/// Returns the internal `id` of the new flyer row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any insert fails. On a child-row failure
/// the parent flyer row is deleted before the error propagates.
pub async fn insert_flyer_batch(
    pool: &PgPool,
    store: &str,
    batch: &FlyerBatch,
) -> Result<i64, DbError> {
    let flyer_id: i64 = sqlx::query_scalar::<_, i64>(
        "INSERT INTO flyers (store, valid_from, valid_until) \
         VALUES ($1, $2, $3) \
         RETURNING id",
    )
    .bind(store)
    .bind(batch.valid_from)
    .bind(batch.valid_until)
    .fetch_one(pool)
    .await?;

    if let Err(e) = insert_items(pool, flyer_id, &batch.items).await {
        // Compensate: a flyer row without its items must not survive.
        if let Err(cleanup_err) = delete_flyer(pool, flyer_id).await {
            tracing::warn!(
                flyer_id,
                error = %cleanup_err,
                "failed to delete orphaned flyer row after item insert failure"
            );
        }
        return Err(e);
    }

    Ok(flyer_id)
}

async fn insert_items(
    pool: &PgPool,
    flyer_id: i64,
    items: &[NormalizedItem],
) -> Result<(), DbError> {
    for item in items {
        sqlx::query(
            "INSERT INTO flyer_items \
                 (flyer_id, product, deal, price, unit_price, units, ounces) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(flyer_id)
        .bind(&item.product)
        .bind(&item.deal)
        .bind(to_numeric(item.price))
        .bind(to_numeric(item.unit_price))
        .bind(i32::try_from(item.units).unwrap_or(i32::MAX))
        .bind(to_numeric(item.ounces))
        .execute(pool)
        .await?;
    }
    Ok(())
}

async fn delete_flyer(pool: &PgPool, flyer_id: i64) -> Result<(), DbError> {
    sqlx::query("DELETE FROM flyers WHERE id = $1")
        .bind(flyer_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Returns the most recently ingested flyer for `store`, or `None` if the
/// store has no flyers yet.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_latest_flyer(pool: &PgPool, store: &str) -> Result<Option<FlyerRow>, DbError> {
    let row = sqlx::query_as::<_, FlyerRow>(
        "SELECT id, store, valid_from, valid_until, created_at \
         FROM flyers \
         WHERE store = $1 \
         ORDER BY valid_from DESC, id DESC \
         LIMIT 1",
    )
    .bind(store)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Returns all line items for one flyer, in ingestion order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_flyer_items(pool: &PgPool, flyer_id: i64) -> Result<Vec<FlyerItemRow>, DbError> {
    let rows = sqlx::query_as::<_, FlyerItemRow>(
        "SELECT id, flyer_id, product, deal, price, unit_price, units, ounces, created_at \
         FROM flyer_items \
         WHERE flyer_id = $1 \
         ORDER BY id",
    )
    .bind(flyer_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
