use super::*;

fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| (*s).to_string()).collect()
}

// -----------------------------------------------------------------------
// rejection shapes
// -----------------------------------------------------------------------

#[test]
fn dollar_off_with_trailing_text_is_rejected() {
    assert!(classify_line("chips, $5 off when you spend $20, 3.99").is_none());
}

#[test]
fn dollar_and_cents_off_is_rejected() {
    assert!(classify_line("detergent, $2.50 off select sizes, 8.99").is_none());
}

#[test]
fn percent_off_is_rejected() {
    assert!(classify_line("soda 12-pack, 20% off, 5.99").is_none());
}

#[test]
fn percent_off_anywhere_in_line_is_rejected() {
    assert!(classify_line("wine, mix and match, 10% off").is_none());
}

// -----------------------------------------------------------------------
// no-deal shape
// -----------------------------------------------------------------------

#[test]
fn no_deal_marker_splits_product_and_price() {
    let item = classify_line("organic bananas, , $0.99").expect("classified");
    assert_eq!(item.product, "organic bananas");
    assert_eq!(item.deal, None);
    assert_eq!(item.price.as_deref(), Some("$0.99"));
}

#[test]
fn no_deal_with_extra_comma_in_price_is_dropped() {
    assert!(classify_line("granola, , $3.99, $4.49").is_none());
}

#[test]
fn no_deal_with_empty_price_is_dropped() {
    // Neither a deal nor a price span survives; zero pricing signal.
    assert!(classify_line("organic bananas, , ").is_none());
}

// -----------------------------------------------------------------------
// deal keyword shapes
// -----------------------------------------------------------------------

#[test]
fn buy_keyword_prefixes_deal_text() {
    let item = classify_line("pepsi 12-pack, buy 2 get 1 free, 5.99 ea").expect("classified");
    assert_eq!(item.product, "pepsi 12-pack");
    assert_eq!(item.deal.as_deref(), Some("buy 2 get 1 free"));
    assert_eq!(item.price.as_deref(), Some("5.99 ea"));
}

#[test]
fn free_keyword_prefixes_deal_text() {
    let item = classify_line("bagels, free cream cheese with purchase, $2.99").expect("classified");
    assert_eq!(item.deal.as_deref(), Some("free cream cheese with purchase"));
    assert_eq!(item.price.as_deref(), Some("$2.99"));
}

#[test]
fn earn_keyword_classifies() {
    let item = classify_line("gift cards, earn 4x points, $25.00").expect("classified");
    assert_eq!(item.product, "gift cards");
    assert_eq!(item.deal.as_deref(), Some("earn 4x points"));
}

#[test]
fn spend_keyword_keeps_dollar_sign_on_deal() {
    let item = classify_line("household goods, spend $20 save $5, 4.99").expect("classified");
    assert_eq!(item.deal.as_deref(), Some("spend $20 save $5"));
    assert_eq!(item.price.as_deref(), Some("4.99"));
}

#[test]
fn celebrate_keyword_classifies() {
    let item = classify_line("flowers, celebrate with mom this weekend, $9.99").expect("classified");
    assert_eq!(item.deal.as_deref(), Some("celebrate with mom this weekend"));
}

#[test]
fn keyword_priority_is_list_order_not_line_order() {
    // ", get " appears earlier in the line, but ", free " outranks it in
    // the dispatch table, so the split happens at ", free ".
    let item = classify_line("milk, get one, free tote, 3.99").expect("classified");
    assert_eq!(item.product, "milk, get one");
    assert_eq!(item.deal.as_deref(), Some("free tote"));
    assert_eq!(item.price.as_deref(), Some("3.99"));
}

#[test]
fn keyword_line_missing_price_comma_is_dropped() {
    assert!(classify_line("pepsi, buy 2 get 1 free").is_none());
}

#[test]
fn keyword_line_with_third_field_is_dropped() {
    assert!(classify_line("pepsi, buy 2 get 1 free, 5.99, limit 4").is_none());
}

// -----------------------------------------------------------------------
// dollar-off deal label (not pure discount)
// -----------------------------------------------------------------------

#[test]
fn dollar_off_without_trailing_text_becomes_deal_label() {
    // No space after "off" before the comma, so the rejection pattern does
    // not fire and the span is kept as a deal label.
    let item = classify_line("ice cream, $5 off, 6.99").expect("classified");
    assert_eq!(item.product, "ice cream");
    assert_eq!(item.deal.as_deref(), Some("$5 off"));
    assert_eq!(item.price.as_deref(), Some("6.99"));
}

// -----------------------------------------------------------------------
// noise and batch behavior
// -----------------------------------------------------------------------

#[test]
fn unrecognized_line_is_dropped() {
    assert!(classify_line("weekly ad page 3 of 12").is_none());
    assert!(classify_line("").is_none());
}

#[test]
fn multibyte_input_does_not_panic() {
    assert!(classify_line("crème brûlée — très bon").is_none());
    let item = classify_line("crème brûlée, , $4.99").expect("classified");
    assert_eq!(item.product, "crème brûlée");
}

#[test]
fn batch_output_is_never_longer_and_preserves_order() {
    let input = lines(&[
        "organic bananas, , $0.99",
        "weekly ad page 3 of 12",
        "pepsi 12-pack, buy 2 get 1 free, 5.99",
        "chips, $5 off when you spend $20, 3.99",
    ]);

    let classified = classify(&input);
    assert_eq!(classified.len(), 2);
    assert_eq!(classified[0].product, "organic bananas");
    assert_eq!(classified[1].product, "pepsi 12-pack");
}

#[test]
fn every_emitted_item_has_signal() {
    let input = lines(&[
        "organic bananas, , $0.99",
        "pepsi, buy 2 get 1 free, 5.99",
        "bread, , ",
        "ad caption with no price",
    ]);

    for item in classify(&input) {
        assert!(item.has_signal());
    }
}
