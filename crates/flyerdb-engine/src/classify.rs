//! Splits raw flyer ad lines into product / deal / price spans.
//!
//! A raw line has no reliable delimiter: the scraper concatenates the
//! product label, optional deal phrasing, and optional price span with
//! commas, and product names themselves may contain commas. Classification
//! therefore dispatches on an ordered table of known line shapes — the
//! first entry that applies wins, and anything matching no entry is scrape
//! noise (image captions, section headers) and is dropped.

use std::sync::LazyLock;

use regex::Regex;

use flyerdb_core::ClassifiedItem;

/// `", $5 off "` / `", $5.00 off "` with text following — pure coupon
/// phrasing that carries no usable unit price.
static DOLLAR_OFF_REJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r", \$\d+(\.\d+)? off ").expect("valid regex"));

/// `", 20% off"` — percentage markdown, likewise excluded outright.
static PERCENT_OFF_REJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r", \d+% off").expect("valid regex"));

/// `", $5 off"` / `", 20% off"` used as a deal label. Only reachable when
/// the rejection patterns above did not consume the line: in practice the
/// dollar form with no text after `"off"`, since the percent rejection
/// subsumes every percent occurrence.
static DISCOUNT_DEAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r", (?:\$\d+(?:\.\d+)?|\d+%) off").expect("valid regex"));

/// Marker for a line with a price span but no deal span.
const NO_DEAL_MARKER: &str = ", , ";

/// One entry in the ordered dispatch table.
///
/// Adding a new promotional phrasing is a data change here, not a
/// control-flow change: append a variant (usually `Keyword`) at the right
/// priority position.
enum LineShape {
    /// Pure markdown/coupon phrasing; the whole line is dropped.
    Reject(&'static LazyLock<Regex>),
    /// `", , "` marker: product then price, with no deal span.
    NoDeal,
    /// A deal keyword; the keyword word (leading comma stripped) is
    /// prefixed back onto the deal text after the split.
    Keyword(&'static str),
    /// `"$X off"` / `"N% off"` used as a deal label rather than a pure
    /// discount.
    Discount,
}

/// The fixed priority order. The first shape that applies to a line wins;
/// list order is the tie-break when several keywords appear, not position
/// in the line.
static SHAPES: &[LineShape] = &[
    LineShape::Reject(&DOLLAR_OFF_REJECT),
    LineShape::Reject(&PERCENT_OFF_REJECT),
    LineShape::NoDeal,
    LineShape::Keyword(", buy "),
    LineShape::Keyword(", free "),
    LineShape::Keyword(", earn "),
    LineShape::Keyword(", up "),
    LineShape::Keyword(", get "),
    LineShape::Discount,
    LineShape::Keyword(", celebrate with "),
    LineShape::Keyword(", spend $"),
];

/// Result of applying one shape to one line.
enum Outcome {
    /// Shape matched and produced spans.
    Item(ClassifiedItem),
    /// Shape matched but the line is excluded or malformed.
    Drop,
    /// Shape did not match; try the next entry.
    Pass,
}

impl LineShape {
    fn apply(&self, line: &str) -> Outcome {
        match self {
            LineShape::Reject(re) => {
                if re.is_match(line) {
                    Outcome::Drop
                } else {
                    Outcome::Pass
                }
            }
            LineShape::NoDeal => match line.split_once(NO_DEAL_MARKER) {
                Some((_, price)) if price.contains(',') => Outcome::Drop,
                Some((product, price)) => emit(product, None, price),
                None => Outcome::Pass,
            },
            LineShape::Keyword(marker) => match line.split_once(marker) {
                Some((product, rest)) => {
                    split_deal(product, marker.trim_start_matches(", "), rest)
                }
                None => Outcome::Pass,
            },
            LineShape::Discount => match DISCOUNT_DEAL.find(line) {
                Some(m) => {
                    let product = &line[..m.start()];
                    // The match starts with the literal ", "; skipping those
                    // two bytes leaves the "$X off" label on the deal span.
                    let rest = &line[m.start() + 2..];
                    split_deal(product, "", rest)
                }
                None => Outcome::Pass,
            },
        }
    }
}

/// Split the text after a matched keyword at the first remaining comma into
/// `(deal, price)`. A missing comma means the line has no price span at
/// all; a further comma inside the price span means a third hidden field.
/// Both discard the line.
fn split_deal(product: &str, label: &str, rest: &str) -> Outcome {
    let Some((deal, price)) = rest.split_once(',') else {
        return Outcome::Drop;
    };
    if price.contains(',') {
        return Outcome::Drop;
    }
    let deal = format!("{label}{}", deal.trim());
    emit(product, Some(deal), price)
}

/// Trim and comma-trim one classified span, then build the item. Empty
/// price spans become `None`; an item with neither deal nor price is
/// discarded rather than emitted.
fn emit(product: &str, deal: Option<String>, price: &str) -> Outcome {
    let price = tidy(price);
    let price = if price.is_empty() {
        None
    } else {
        Some(price.to_string())
    };
    let deal = deal
        .as_deref()
        .map(tidy)
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    if deal.is_none() && price.is_none() {
        return Outcome::Drop;
    }

    Outcome::Item(ClassifiedItem {
        product: tidy(product).to_string(),
        deal,
        price,
    })
}

fn tidy(s: &str) -> &str {
    s.trim().trim_matches(',').trim()
}

/// Classify one raw ad line, already lowercase-normalized.
///
/// Returns `None` for excluded, malformed, and unrecognized lines — never
/// panics, whatever the input.
#[must_use]
pub fn classify_line(line: &str) -> Option<ClassifiedItem> {
    for shape in SHAPES {
        match shape.apply(line) {
            Outcome::Item(item) => return Some(item),
            Outcome::Drop => {
                tracing::debug!(line, "dropped ad line");
                return None;
            }
            Outcome::Pass => {}
        }
    }
    tracing::debug!(line, "ad line matched no known shape");
    None
}

/// Classify an ordered sequence of raw ad lines. Output preserves input
/// order and is never longer than the input.
#[must_use]
pub fn classify(lines: &[String]) -> Vec<ClassifiedItem> {
    lines.iter().filter_map(|line| classify_line(line)).collect()
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod tests;
