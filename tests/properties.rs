//! Property-based tests
//!
//! Invariants that must hold for every input, not just the sample slips:
//! - Word wrap never exceeds the message width and never reorders words
//! - A set code wins over every looser code sharing the same SKU
//!
//! Run with:
//!   cargo test --test properties

use packslip_labels::layout::gift_note::MESSAGE_MAX_WIDTH;
use packslip_labels::layout::metrics::string_width;
use packslip_labels::layout::Font;
use packslip_labels::{classify, wrap_text, Classification, ProductType};
use proptest::prelude::*;

const MESSAGE_FONT: Font = Font::HelveticaOblique;
const MESSAGE_SIZE: f32 = 14.0;

const SIX_PIECE_LABELS: [&str; 6] = [
    "Washcloth 1",
    "Washcloth 2",
    "Hand Towel 1",
    "Hand Towel 2",
    "Bath Towel 1",
    "Bath Towel 2",
];
const THREE_PIECE_LABELS: [&str; 3] = ["Washcloth", "Hand Towel", "Bath Towel"];

fn slot_labels(c: &Classification) -> Vec<&'static str> {
    match c {
        Classification::Patterned { slots, .. } => slots.iter().map(|s| s.label).collect(),
        _ => vec![],
    }
}

fn looser_code() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["", "HT-2", "HT-2Pcs", "BT-2", "BT-2Pcs", "BS-1", "BS-1Pcs"])
}

// ============================================================================
// Word wrap
// ============================================================================

/// Property: every wrapped line fits when no single word is too wide
#[test]
fn proptest_wrapped_lines_fit() {
    proptest!(|(words in prop::collection::vec("[A-Za-z0-9,.!?'&]{1,16}", 1..60))| {
        for word in &words {
            prop_assume!(string_width(word, MESSAGE_FONT, MESSAGE_SIZE) <= MESSAGE_MAX_WIDTH);
        }
        let message = words.join(" ");
        let lines = wrap_text(&message, MESSAGE_FONT, MESSAGE_SIZE, MESSAGE_MAX_WIDTH);

        for line in &lines {
            let width = string_width(line, MESSAGE_FONT, MESSAGE_SIZE);
            prop_assert!(width <= MESSAGE_MAX_WIDTH, "{line:?} is {width}pt wide");
            prop_assert!(!line.is_empty());
        }
        prop_assert_eq!(lines.join(" "), message);
    });
}

/// Property: explicit newlines always break and words keep their order
#[test]
fn proptest_wrap_keeps_paragraph_order() {
    proptest!(|(paragraphs in prop::collection::vec(
        prop::collection::vec("[a-z]{1,10}", 1..20), 1..5))| {
        let message = paragraphs
            .iter()
            .map(|p| p.join(" "))
            .collect::<Vec<_>>()
            .join("\n");
        let lines = wrap_text(&message, MESSAGE_FONT, MESSAGE_SIZE, MESSAGE_MAX_WIDTH);

        prop_assert!(lines.len() >= paragraphs.len());
        let words: Vec<&str> = lines.iter().flat_map(|l| l.split_whitespace()).collect();
        let expected: Vec<&str> = paragraphs.iter().flatten().map(String::as_str).collect();
        prop_assert_eq!(words, expected);
    });
}

// ============================================================================
// SKU classification
// ============================================================================

/// Property: a 6-pc set code beats any looser code around it
#[test]
fn proptest_six_piece_code_wins() {
    proptest!(|(
        prefix in "[A-Z]{0,5}",
        before in looser_code(),
        after in looser_code(),
        color in "[A-Za-z]{1,8}",
    )| {
        let sku = format!("{prefix}-{before}-Set-6Pcs-{after}-{color}");
        let c = classify(&sku, "Monogrammed Hand Towels");
        prop_assert_eq!(c.product_type(), ProductType::SixPieceSet);
        prop_assert_eq!(slot_labels(&c), SIX_PIECE_LABELS.to_vec());
    });
}

/// Property: a 3-pc set code beats any looser code around it
#[test]
fn proptest_three_piece_code_wins() {
    proptest!(|(
        prefix in "[A-Z]{0,5}",
        before in looser_code(),
        after in looser_code(),
        color in "[A-Za-z]{1,8}",
    )| {
        let sku = format!("{prefix}-{before}-Set-3Pcs-{after}-{color}");
        let c = classify(&sku, "Monogrammed Hand Towels");
        prop_assert_eq!(c.product_type(), ProductType::ThreePieceSet);
        prop_assert_eq!(slot_labels(&c), THREE_PIECE_LABELS.to_vec());
    });
}
