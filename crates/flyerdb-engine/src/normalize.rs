//! Converts classified price/deal text into numeric fields.
//!
//! Promotional price phrasing is wildly heterogeneous (`"2 for $5"`,
//! `"$3.99 lb"`, `"5.00 when you buy 2"`, `"buy 3 get 1 free"`), so every
//! extraction here is try-parse: a fragment that fails to parse yields a
//! `None` field, never an error. The output's `unit_price` is the one
//! metric comparable across all items.

use std::sync::LazyLock;

use regex::Regex;

use flyerdb_core::{ClassifiedItem, NormalizedItem};

/// Reference weight assigned to per-pound items. The flyer never states an
/// actual weight, so every per-pound row gets one nominal pound to keep
/// unit economics comparable across items.
const PER_POUND_REFERENCE_OUNCES: f64 = 16.0;

static WHEN_YOU_BUY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"when\s*you\s*buy\s*(\d+)").expect("valid regex"));

/// `"2 for 5.00"` / `"2/5"` — a group total for a stated quantity.
static MULTI_BUY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(?:for|/)\s*(\d+\.\d+|\d+)").expect("valid regex"));

static BUY_N_GET_M_FREE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"buy\s*(\d+)\s*get\s*(\d+)\s*free").expect("valid regex"));

/// Phrases and tokens stripped from price text before numeric extraction,
/// applied in this order with a re-trim after each.
const PRICE_NOISE: &[&str] = &[
    "member price",
    "or more",
    "starting at",
    "$",
    ",",
    "ea",
    "ea.",
];

/// Phrases stripped from deal text before deal-side extraction.
const DEAL_NOISE: &[&str] = &["member price", "equal or lesser value"];

/// Layer numeric fields onto one classified item.
///
/// Runs the price-text pass, then the deal-text pass. All derived monetary
/// values are rounded to two decimal places; unparseable fragments produce
/// `None` fields and `units` falls back to 1. Never panics.
#[must_use]
pub fn normalize_item(item: ClassifiedItem) -> NormalizedItem {
    let ClassifiedItem {
        product,
        deal,
        price,
    } = item;

    let mut units: u32 = 1;
    // Whether the price pass itself matched a "when you buy N" clause; when
    // it did, the price side is the authoritative source for `units` and a
    // conflicting deal-side clause is ignored.
    let mut price_units_matched = false;
    let mut total: Option<f64> = None;
    let mut unit_price: Option<f64> = None;
    let mut ounces: Option<f64> = None;

    if let Some(raw) = price.as_deref() {
        let mut text = strip_noise(raw, PRICE_NOISE);

        if text.contains("lb") {
            ounces = Some(PER_POUND_REFERENCE_OUNCES);
            text = text.replace("lb", "").trim().to_string();
        }

        if let Some(caps) = WHEN_YOU_BUY.captures(&text) {
            if let Ok(n) = caps[1].parse::<u32>() {
                if n >= 1 {
                    units = n;
                    price_units_matched = true;
                    let matched = caps[0].to_string();
                    text = text.replace(&matched, "").trim().to_string();
                }
            }
        }

        let mut multi_buy = false;
        if let Some(caps) = MULTI_BUY.captures(&text) {
            let count = caps[1].parse::<f64>().ok();
            let amount = caps[2].parse::<f64>().ok();
            if let (Some(count), Some(amount)) = (count, amount) {
                if count > 0.0 {
                    // The group total, deliberately NOT amount × units.
                    total = Some(amount);
                    unit_price = Some(round2(amount / count));
                    multi_buy = true;
                }
            }
        }

        if !multi_buy {
            if let Ok(value) = text.trim().parse::<f64>() {
                unit_price = Some(value);
                total = Some(round2(value * f64::from(units)));
            } else {
                // Leftover is non-numeric garbage: null everything out and
                // reset units so a later pass cannot double-scale.
                total = None;
                unit_price = None;
                units = 1;
                price_units_matched = false;
            }
        }
    }

    let deal = deal.map(|raw| {
        let mut text = strip_noise(&raw, DEAL_NOISE);

        if let Some(caps) = WHEN_YOU_BUY.captures(&text) {
            if !price_units_matched {
                if let Ok(n) = caps[1].parse::<u32>() {
                    if n >= 1 {
                        units = n;
                    }
                }
            }
            let matched = caps[0].to_string();
            text = text.replace(&matched, "").trim().to_string();
        }

        text
    });

    if let Some(text) = deal.as_deref() {
        if let Some(caps) = BUY_N_GET_M_FREE.captures(text) {
            if let (Some(group_total), Ok(n)) = (total, caps[1].parse::<f64>()) {
                // Amortize the cost of the full purchased bundle across the
                // units required to trigger the deal.
                unit_price = Some(round2(n * group_total / f64::from(units)));
            }
        }
    }

    NormalizedItem {
        product,
        deal,
        price: total,
        unit_price,
        units,
        ounces,
    }
}

/// Remove each noise phrase in order, trimming after every removal.
fn strip_noise(raw: &str, noise: &[&str]) -> String {
    let mut text = raw.trim().to_string();
    for phrase in noise {
        text = text.replace(phrase, "").trim().to_string();
    }
    text
}

/// Round a monetary value to two decimal places, half away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
