use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One advertised item split into its textual spans, not yet parsed.
///
/// Produced by the classifier from a single raw ad line. At least one of
/// `deal`/`price` is `Some` — a line carrying neither is dropped by the
/// classifier rather than emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedItem {
    pub product: String,
    /// Promotional phrasing as printed, e.g. `"buy 2 get 1 free"`.
    pub deal: Option<String>,
    /// Raw price span as printed, e.g. `"$3.99 lb"` or `"2 for $5.00"`.
    pub price: Option<String>,
}

impl ClassifiedItem {
    /// `true` when the item carries any pricing signal at all. Items without
    /// one are not actionable and must not reach storage.
    #[must_use]
    pub fn has_signal(&self) -> bool {
        self.deal.is_some() || self.price.is_some()
    }
}

/// A fully normalized line item, the durable output of the engine.
///
/// Monetary fields are scrape-time `f64` convenience values rounded to two
/// decimal places. Persistence converts them to `NUMERIC(10,2)` in the DB
/// layer at write time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedItem {
    pub product: String,
    /// Cleaned deal text, kept as descriptive metadata once the numeric
    /// constraints have been extracted from it.
    pub deal: Option<String>,
    /// Total cost of the described purchase bundle. For multi-buy shapes
    /// (`"2 for $5"`) this is the group total, not `unit_price × units`.
    pub price: Option<f64>,
    /// Cost per single unit — the one metric comparable across all items.
    pub unit_price: Option<f64>,
    /// Units that must be bought to realize `price`; never less than 1.
    pub units: u32,
    /// `Some(16.0)` for per-pound items. The flyer never states an actual
    /// weight, so one nominal pound stands in to keep per-pound rows
    /// comparable on unit economics.
    pub ounces: Option<f64>,
}

impl NormalizedItem {
    /// `true` when any numeric price survived normalization.
    #[must_use]
    pub fn has_pricing(&self) -> bool {
        self.price.is_some() || self.unit_price.is_some()
    }

    /// `true` when the source price span was quoted per pound.
    #[must_use]
    pub fn is_per_pound(&self) -> bool {
        self.ounces.is_some()
    }
}

/// Raw output of the fetch collaborator, not yet validated.
///
/// The validity dates are `Option` because the source page may omit the
/// date label entirely; deciding that a missing window is fatal belongs to
/// the pipeline, not the fetcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedFlyer {
    /// Lowercase-normalized ad labels, one per advertised item, in scrape
    /// order.
    pub lines: Vec<String>,
    pub valid_from: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
}

/// The validated unit of output: ordered normalized items plus the flyer's
/// validity window. Item order is scrape order — preserved for
/// reproducibility, not semantically significant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlyerBatch {
    pub items: Vec<NormalizedItem>,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
}

impl FlyerBatch {
    /// Returns the number of line items in this flyer.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}
