//! SKU classification: product type and the customization slots to fill.
//!
//! SKU codes are not mutually exclusive substrings (`…Set-6Pcs…` may also
//! contain looser codes), so the rules below are checked in a fixed
//! priority order, most specific first, and the first hit wins.

use super::extract::{self, FieldPattern};
use crate::model::{Customization, ProductType};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// A named customization slot and how to find its text in an item's
/// content span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub label: &'static str,
    pub marker: &'static str,
    pub stops: &'static [&'static str],
}

const fn slot(
    label: &'static str,
    marker: &'static str,
    stops: &'static [&'static str],
) -> Slot {
    Slot {
        label,
        marker,
        stops,
    }
}

const END_OF_ITEM: &[&str] = &["\n", "Item", "Grand"];

const SIX_PIECE_SLOTS: &[Slot] = &[
    slot("Washcloth 1", "First Washcloth:", &["\n", "Second"]),
    slot("Washcloth 2", "Second Washcloth:", &["\n", "First Hand"]),
    slot("Hand Towel 1", "First Hand Towel:", &["\n", "Second Hand"]),
    slot("Hand Towel 2", "Second Hand Towel:", &["\n", "First Bath"]),
    slot("Bath Towel 1", "First Bath Towel:", &["\n", "Second Bath"]),
    slot("Bath Towel 2", "Second Bath Towel:", END_OF_ITEM),
];

const THREE_PIECE_SLOTS: &[Slot] = &[
    slot("Washcloth", "Washcloth:", &["\n", "Hand Towel"]),
    slot("Hand Towel", "Hand Towel:", &["\n", "Bath Towel"]),
    slot("Bath Towel", "Bath Towel:", &["\n", "Item", "Grand", "Gift", "Add"]),
];

const HAND_TOWEL_SLOTS: &[Slot] = &[
    slot("Hand Towel 1", "First Hand Towel:", &["\n", "Second"]),
    slot("Hand Towel 2", "Second Hand Towel:", END_OF_ITEM),
];

const BATH_TOWEL_SLOTS: &[Slot] = &[
    slot("Bath Towel 1", "First Bath Towel:", &["\n", "Second"]),
    slot("Bath Towel 2", "Second Bath Towel:", END_OF_ITEM),
];

const BATH_SHEET_SLOTS: &[Slot] = &[slot("Bath Sheet", "Oversized Bath Sheet:", END_OF_ITEM)];

/// Page text that marks a monogram listing.
pub const MONOGRAM_LISTING: &str = "Monogrammed Hand Towels";

/// Priority-ordered SKU code rules. Checked top to bottom.
const RULES: &[(&[&str], ProductType)] = &[
    (&["Set-6Pcs"], ProductType::SixPieceSet),
    (&["Set-3Pcs"], ProductType::ThreePieceSet),
    (&["HT-2", "HT-2PCS", "HT-2Pcs"], ProductType::HandTowelPair),
    (&["BT-2", "BT-2Pcs"], ProductType::BathTowelPair),
    (&["BS-1", "BS-1Pcs"], ProductType::BathSheet),
];

/// Slot table for a product type. Monogram towels reuse the hand-towel
/// labels; their text comes from the SKU, not from the page.
pub(crate) fn slots_for(product_type: ProductType) -> &'static [Slot] {
    match product_type {
        ProductType::SixPieceSet => SIX_PIECE_SLOTS,
        ProductType::ThreePieceSet => THREE_PIECE_SLOTS,
        ProductType::HandTowelPair | ProductType::MonogrammedHandTowelPair => HAND_TOWEL_SLOTS,
        ProductType::BathTowelPair => BATH_TOWEL_SLOTS,
        ProductType::BathSheet => BATH_SHEET_SLOTS,
        ProductType::Unknown => &[],
    }
}

static SLOT_PATTERNS: Lazy<HashMap<ProductType, Vec<FieldPattern>>> = Lazy::new(|| {
    RULES
        .iter()
        .map(|&(_, pt)| {
            let patterns = slots_for(pt)
                .iter()
                .map(|s| FieldPattern::new(s.marker, s.stops).unwrap())
                .collect();
            (pt, patterns)
        })
        .collect()
});

/// Outcome of classifying one SKU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// A known code whose slot texts are read from the item's content span.
    Patterned {
        product_type: ProductType,
        slots: &'static [Slot],
    },
    /// Monogrammed hand towels: both slots carry the SKU's trailing initial.
    Monogrammed { initial: Option<char> },
    /// Unrecognised code; no slots.
    Unknown,
}

impl Classification {
    pub fn product_type(&self) -> ProductType {
        match self {
            Classification::Patterned { product_type, .. } => *product_type,
            Classification::Monogrammed { .. } => ProductType::MonogrammedHandTowelPair,
            Classification::Unknown => ProductType::Unknown,
        }
    }

    /// Fill the slots in order. Slots with no match are omitted.
    pub fn customizations(&self, content: &str) -> Vec<Customization> {
        match self {
            Classification::Patterned {
                product_type,
                slots,
            } => {
                let Some(patterns) = SLOT_PATTERNS.get(product_type) else {
                    return Vec::new();
                };
                slots
                    .iter()
                    .zip(patterns)
                    .filter_map(|(slot, pattern)| {
                        pattern
                            .find(content)
                            .map(|text| Customization::new(slot.label, text))
                    })
                    .collect()
            }
            Classification::Monogrammed { initial: Some(c) } => HAND_TOWEL_SLOTS
                .iter()
                .map(|slot| Customization::new(slot.label, c.to_string()))
                .collect(),
            Classification::Monogrammed { initial: None } | Classification::Unknown => Vec::new(),
        }
    }
}

/// Classify `sku`; `page_text` is consulted only for the monogram fallback.
pub fn classify(sku: &str, page_text: &str) -> Classification {
    for &(codes, product_type) in RULES {
        if codes.iter().any(|code| sku.contains(code)) {
            return Classification::Patterned {
                product_type,
                slots: slots_for(product_type),
            };
        }
    }

    if page_text.contains(MONOGRAM_LISTING) {
        return Classification::Monogrammed {
            initial: extract::monogram_initial(sku),
        };
    }

    Classification::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(c: &Classification) -> Vec<&'static str> {
        match c {
            Classification::Patterned { slots, .. } => slots.iter().map(|s| s.label).collect(),
            _ => vec![],
        }
    }

    #[test]
    fn three_piece_has_three_ordered_slots() {
        for sku in ["TWL-Set-3Pcs-Blue", "X-Set-3Pcs-White Item total $10"] {
            let c = classify(sku, "");
            assert_eq!(c.product_type(), ProductType::ThreePieceSet);
            assert_eq!(labels(&c), vec!["Washcloth", "Hand Towel", "Bath Towel"]);
        }
    }

    #[test]
    fn six_piece_has_six_ordered_slots() {
        let c = classify("TWL-Set-6Pcs-Grey", "");
        assert_eq!(c.product_type(), ProductType::SixPieceSet);
        assert_eq!(
            labels(&c),
            vec![
                "Washcloth 1",
                "Washcloth 2",
                "Hand Towel 1",
                "Hand Towel 2",
                "Bath Towel 1",
                "Bath Towel 2"
            ]
        );
    }

    #[test]
    fn specific_set_code_beats_looser_codes() {
        // Contains "HT-2" and "BT-2" as well as the set code.
        let c = classify("WHT-2-BT-2-Set-6Pcs-Navy", "Monogrammed Hand Towels");
        assert_eq!(c.product_type(), ProductType::SixPieceSet);
        let c = classify("HT-2-Set-3Pcs-Navy", "");
        assert_eq!(c.product_type(), ProductType::ThreePieceSet);
    }

    #[test]
    fn pair_and_sheet_codes() {
        assert_eq!(classify("TWL-HT-2Pcs-Red", "").product_type(), ProductType::HandTowelPair);
        assert_eq!(classify("TWL-BT-2-Red", "").product_type(), ProductType::BathTowelPair);
        assert_eq!(classify("TWL-BS-1Pcs-Red", "").product_type(), ProductType::BathSheet);
        assert_eq!(ProductType::BathSheet.slots().len(), 1);
    }

    #[test]
    fn monogram_fallback_uses_page_text() {
        let c = classify("MHT-Navy-K", "Personalized Monogrammed Hand Towels");
        assert_eq!(c, Classification::Monogrammed { initial: Some('K') });
        assert_eq!(
            c.customizations("ignored"),
            vec![
                Customization::new("Hand Towel 1", "K"),
                Customization::new("Hand Towel 2", "K"),
            ]
        );
    }

    #[test]
    fn monogram_without_initial_has_no_customizations() {
        let c = classify("MHT-Navy", "Monogrammed Hand Towels");
        assert_eq!(c.product_type(), ProductType::MonogrammedHandTowelPair);
        assert!(c.customizations("First Hand Towel: A").is_empty());
    }

    #[test]
    fn unknown_code_has_no_slots() {
        let c = classify("MUG-11oz-White", "");
        assert_eq!(c, Classification::Unknown);
        assert!(c.customizations("Washcloth: x").is_empty());
    }

    #[test]
    fn three_piece_customizations_in_order() {
        let c = classify("TWL-Set-3Pcs-Blue", "");
        let content = "\nWashcloth: Hello\nHand Towel: World\nBath Towel: !";
        assert_eq!(
            c.customizations(content),
            vec![
                Customization::new("Washcloth", "Hello"),
                Customization::new("Hand Towel", "World"),
                Customization::new("Bath Towel", "!"),
            ]
        );
    }

    #[test]
    fn missing_slot_is_omitted() {
        let c = classify("TWL-BT-2Pcs-Red", "");
        let content = "\nSecond Bath Towel: Sam\n";
        assert_eq!(
            c.customizations(content),
            vec![Customization::new("Bath Towel 2", "Sam")]
        );
    }

    #[test]
    fn six_piece_glued_fields() {
        let c = classify("TWL-Set-6Pcs-Grey", "");
        let content = "\nFirst Washcloth: A Second Washcloth: B\n\
                       First Hand Towel: C\nSecond Hand Towel: D\n\
                       First Bath Towel: E\nSecond Bath Towel: F Item subtotal";
        let got: Vec<_> = c.customizations(content).into_iter().map(|c| c.text).collect();
        assert_eq!(got, vec!["A", "B", "C", "D", "E", "F"]);
    }
}
