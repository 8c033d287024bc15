//! Sequencing and filtering over one scraped flyer.
//!
//! The coordinator is a single linear pass with no retained state: validate
//! the scrape, classify every line, drop items with zero pricing signal,
//! normalize the rest. No I/O, no retries.

use flyerdb_core::{FlyerBatch, NormalizedItem, ScrapedFlyer};

use crate::classify::classify_line;
use crate::error::EngineError;
use crate::normalize::normalize_item;

/// Run the full classify → filter → normalize pass over one scraped flyer.
///
/// The validity window is required for every record, so an invalid scrape
/// aborts the run before any line is classified.
///
/// # Errors
///
/// Returns [`EngineError::EmptyFlyer`] if the scrape carries no ad lines,
/// or [`EngineError::MissingValidityWindow`] if either validity date is
/// absent.
pub fn assemble_batch(scrape: &ScrapedFlyer) -> Result<FlyerBatch, EngineError> {
    if scrape.lines.is_empty() {
        return Err(EngineError::EmptyFlyer);
    }
    let (Some(valid_from), Some(valid_until)) = (scrape.valid_from, scrape.valid_until) else {
        return Err(EngineError::MissingValidityWindow);
    };

    let items: Vec<NormalizedItem> = scrape
        .lines
        .iter()
        .filter_map(|line| classify_line(line))
        .filter(|item| item.has_signal())
        .map(normalize_item)
        .collect();

    tracing::debug!(
        scraped = scrape.lines.len(),
        kept = items.len(),
        "assembled flyer batch"
    );

    Ok(FlyerBatch {
        items,
        valid_from,
        valid_until,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn window(day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2026, 3, day)
    }

    fn scrape(lines: &[&str]) -> ScrapedFlyer {
        ScrapedFlyer {
            lines: lines.iter().map(|s| (*s).to_string()).collect(),
            valid_from: window(4),
            valid_until: window(10),
        }
    }

    #[test]
    fn empty_scrape_aborts_before_classification() {
        let err = assemble_batch(&scrape(&[])).expect_err("must abort");
        assert!(matches!(err, EngineError::EmptyFlyer));
    }

    #[test]
    fn missing_validity_date_aborts() {
        let mut flyer = scrape(&["organic bananas, , $0.99"]);
        flyer.valid_until = None;
        let err = assemble_batch(&flyer).expect_err("must abort");
        assert!(matches!(err, EngineError::MissingValidityWindow));
    }

    #[test]
    fn end_to_end_classifies_filters_and_normalizes() {
        let flyer = scrape(&[
            "organic bananas, , $0.99",
            "weekly ad page 3 of 12",
            "boneless chicken breast, , $3.99 lb",
            "pepsi 12-pack, buy 2 get 1 free when you buy 3, $4.99",
            "chips, $5 off when you spend $20, 3.99",
        ]);

        let batch = assemble_batch(&flyer).expect("valid batch");
        assert_eq!(batch.valid_from, window(4).expect("valid date"));
        assert_eq!(batch.item_count(), 3);

        let bananas = &batch.items[0];
        assert_eq!(bananas.product, "organic bananas");
        assert_eq!(bananas.unit_price, Some(0.99));

        let chicken = &batch.items[1];
        assert_eq!(chicken.ounces, Some(16.0));
        assert_eq!(chicken.price, Some(3.99));

        let pepsi = &batch.items[2];
        assert_eq!(pepsi.units, 3);
        assert_eq!(pepsi.unit_price, Some(3.33));
        assert_eq!(pepsi.deal.as_deref(), Some("buy 2 get 1 free"));
    }

    #[test]
    fn unparseable_price_is_retained_with_null_numerics() {
        let flyer = scrape(&["seasonal decor, , see store for details"]);
        let batch = assemble_batch(&flyer).expect("valid batch");

        assert_eq!(batch.item_count(), 1);
        let item = &batch.items[0];
        assert_eq!(item.price, None);
        assert_eq!(item.unit_price, None);
        assert_eq!(item.units, 1);
    }

    #[test]
    fn batch_preserves_scrape_order() {
        let flyer = scrape(&[
            "zucchini, , $1.29 lb",
            "apples, , $0.79 lb",
            "milk, , $2.49",
        ]);

        let batch = assemble_batch(&flyer).expect("valid batch");
        let products: Vec<&str> = batch.items.iter().map(|i| i.product.as_str()).collect();
        assert_eq!(products, ["zucchini", "apples", "milk"]);
    }
}
