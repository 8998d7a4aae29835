//! The order model reconstructed from packing-slip text.
//!
//! ```text
//! Order ──▶ Item ──▶ Customization
//!  (one     (one SKU   (slot label + embroidered text)
//!  buyer)   instance)
//! ```
//!
//! Records are plain owned data: the assembler builds them once and every
//! downstream stage (labels, gift notes, exports, plan) only reads them.

use crate::pipeline::classify::{self, Slot};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Product-type taxonomy derived from the SKU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProductType {
    #[serde(rename = "6-pc Set")]
    SixPieceSet,
    #[serde(rename = "3-pc Set")]
    ThreePieceSet,
    #[serde(rename = "2-pc Hand Towel")]
    HandTowelPair,
    #[serde(rename = "2-pc Hand Towel (Monogrammed)")]
    MonogrammedHandTowelPair,
    #[serde(rename = "2-pc Bath Towel")]
    BathTowelPair,
    #[serde(rename = "Bath Sheet (Oversized)")]
    BathSheet,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl ProductType {
    /// Human-readable name printed on labels and exports.
    pub fn label(self) -> &'static str {
        match self {
            ProductType::SixPieceSet => "6-pc Set",
            ProductType::ThreePieceSet => "3-pc Set",
            ProductType::HandTowelPair => "2-pc Hand Towel",
            ProductType::MonogrammedHandTowelPair => "2-pc Hand Towel (Monogrammed)",
            ProductType::BathTowelPair => "2-pc Bath Towel",
            ProductType::BathSheet => "Bath Sheet (Oversized)",
            ProductType::Unknown => "Unknown",
        }
    }

    /// Ordered customization slots expected for this product type.
    pub fn slots(self) -> &'static [Slot] {
        classify::slots_for(self)
    }

    /// Production units for `quantity` pieces: a 6-pc set is made as two
    /// 3-pc sets on the floor.
    pub fn production_units(self, quantity: u32) -> u32 {
        match self {
            ProductType::SixPieceSet => quantity.saturating_mul(2),
            _ => quantity,
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One filled customization slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customization {
    /// Slot label, e.g. `"Bath Towel 1"`.
    pub slot: String,
    /// Text to embroider.
    pub text: String,
}

impl Customization {
    pub fn new(slot: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            slot: slot.into(),
            text: text.into(),
        }
    }
}

/// One purchased SKU instance within an [`Order`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Raw SKU line as printed on the slip.
    pub sku: String,
    pub product_type: ProductType,
    /// Towel fabric color, taken from the trailing SKU segment.
    pub towel_color: String,
    /// Always ≥ 1.
    pub quantity: u32,
    /// Embroidery font name; empty when the slip does not say.
    pub font: String,
    /// Embroidery thread color; empty when the slip does not say.
    pub font_color: String,
    pub customizations: Vec<Customization>,
    /// Gift message text; empty means none.
    pub gift_message: String,
}

impl Item {
    pub fn has_gift_message(&self) -> bool {
        !self.gift_message.is_empty()
    }

    /// `"Washcloth: Hello | Hand Towel: World"` form used in exports.
    pub fn customization_summary(&self) -> String {
        self.customizations
            .iter()
            .map(|c| format!("{}: {}", c.slot, c.text))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// One buyer purchase transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub order_date: String,
    pub buyer_name: String,
    pub shipping_service: String,
    pub items: Vec<Item>,
}

/// A flattened (Order × Item) row with its position among the items that
/// share the same order id.
#[derive(Debug, Clone, Copy)]
pub struct LineItem<'a> {
    pub order: &'a Order,
    pub item: &'a Item,
    /// 1-based position of this item within its order.
    pub position: usize,
    /// Number of items carrying the same order id.
    pub count: usize,
}

/// Flatten orders into line items in assembly order.
///
/// Positions and counts are keyed on the order id across the whole record
/// set, so an order whose pages were split over two uploaded files still
/// numbers its items `[1 of 3]`, `[2 of 3]`, `[3 of 3]`.
pub fn line_items(orders: &[Order]) -> Vec<LineItem<'_>> {
    let mut totals: HashMap<&str, usize> = HashMap::new();
    for order in orders {
        *totals.entry(order.order_id.as_str()).or_default() += order.items.len();
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut rows = Vec::with_capacity(totals.values().sum());
    for order in orders {
        for item in &order.items {
            let position = seen.entry(order.order_id.as_str()).or_default();
            *position += 1;
            rows.push(LineItem {
                order,
                item,
                position: *position,
                count: totals[order.order_id.as_str()],
            });
        }
    }
    rows
}
