//! Field extraction: pull one labelled value out of loosely formatted text.
//!
//! Packing slips are not machine-readable. A field is recognised by the
//! literal label that precedes it (`"Order Date:"`) and ends at whichever
//! comes first of a set of stop markers (usually a newline, sometimes the
//! next label when the text extractor glued two fields onto one line) or
//! the end of the text. Every field is optional; absence is reported as
//! `None` and callers substitute an empty string.

use once_cell::sync::Lazy;
use regex::Regex;

/// A compiled `start marker → capture → stop markers` pattern.
#[derive(Debug, Clone)]
pub struct FieldPattern {
    regex: Regex,
}

impl FieldPattern {
    /// Compile a pattern for the value following `start`.
    ///
    /// The capture is non-greedy, may span lines, and stops at the first
    /// occurrence of any of `stops` or the end of the text. Whitespace after
    /// `start` is skipped.
    pub fn new(start: &str, stops: &[&str]) -> Result<Self, regex::Error> {
        let mut terminators: Vec<String> = stops.iter().map(|s| regex::escape(s)).collect();
        terminators.push("$".to_string());
        let pattern = format!(
            r"(?s){}\s*(.+?)(?:{})",
            regex::escape(start),
            terminators.join("|")
        );
        Ok(Self {
            regex: Regex::new(&pattern)?,
        })
    }

    /// Leftmost match in `text`, trimmed. Blank captures count as absent.
    pub fn find(&self, text: &str) -> Option<String> {
        self.regex
            .captures(text)
            .map(|caps| caps[1].trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// One-shot extraction of the value after `start_marker`.
///
/// Returns `None` when the marker is absent or the value is blank.
pub fn extract(text: &str, start_marker: &str, stop_markers: &[&str]) -> Option<String> {
    FieldPattern::new(start_marker, stop_markers)
        .ok()
        .and_then(|p| p.find(text))
}

// ── Order header fields ──────────────────────────────────────────────────────

/// Literal that opens a new order on a page.
pub const ORDER_START: &str = "Order ID:";

static RE_ORDER_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"Order ID:\s*([\d-]+)").unwrap());

static ORDER_DATE: Lazy<FieldPattern> =
    Lazy::new(|| FieldPattern::new("Order Date:", &["\n", "Shipping"]).unwrap());

static SHIPPING_SERVICE: Lazy<FieldPattern> =
    Lazy::new(|| FieldPattern::new("Shipping Service:", &["\n", "Buyer"]).unwrap());

static SHIP_TO: Lazy<FieldPattern> = Lazy::new(|| FieldPattern::new("Ship To:", &["\n"]).unwrap());

/// Header fields read from the page that opens an order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderHeader {
    pub order_id: String,
    pub order_date: String,
    pub buyer_name: String,
    pub shipping_service: String,
}

/// Read the order header fields. Missing fields come back empty.
pub fn order_header(text: &str) -> OrderHeader {
    OrderHeader {
        order_id: RE_ORDER_ID
            .captures(text)
            .map(|c| c[1].trim().to_string())
            .unwrap_or_default(),
        order_date: ORDER_DATE.find(text).unwrap_or_default(),
        buyer_name: SHIP_TO.find(text).unwrap_or_default(),
        shipping_service: SHIPPING_SERVICE.find(text).unwrap_or_default(),
    }
}

// ── Line-item fields ─────────────────────────────────────────────────────────

static RE_SKU_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"SKU:\s*([^\n]+)").unwrap());

/// Largest quantity believed on a single line item.
pub const MAX_QUANTITY: u32 = 999;

static RE_QUANTITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Quantity[^\d]*(\d+)").unwrap());

static RE_PRICE_TAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+(?:Tax|Item|total|\$)").unwrap());

static RE_MONOGRAM_INITIAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"-\s*([A-Z])\s*$").unwrap());

static FONT: Lazy<FieldPattern> =
    Lazy::new(|| FieldPattern::new("Choose Your Font:", &["\n", "Font Color"]).unwrap());

static FONT_COLOR: Lazy<FieldPattern> =
    Lazy::new(|| FieldPattern::new("Font Color:", &["(", "#", "\n"]).unwrap());

static GIFT_MESSAGE: Lazy<FieldPattern> =
    Lazy::new(|| FieldPattern::new("Gift Message:", &["\n", "Item", "Grand"]).unwrap());

static GIFT_CARD: Lazy<FieldPattern> =
    Lazy::new(|| FieldPattern::new("Add Gift Card:", &["\n", "Item", "Grand"]).unwrap());

/// One SKU occurrence on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkuSpan<'a> {
    /// Trimmed SKU value (rest of the `SKU:` line).
    pub sku: &'a str,
    /// Byte offset of the `SKU:` marker.
    pub start: usize,
    /// Text between the end of this SKU line and the next `SKU:` marker
    /// (or the end of the page).
    pub content: &'a str,
}

/// Split a page into SKU occurrences with their enclosing content spans.
pub fn sku_spans(text: &str) -> Vec<SkuSpan<'_>> {
    let lines: Vec<_> = RE_SKU_LINE.captures_iter(text).collect();
    lines
        .iter()
        .enumerate()
        .filter_map(|(i, caps)| {
            let whole = caps.get(0)?;
            let sku = caps.get(1)?.as_str().trim();
            let content_end = lines
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(text.len(), |m| m.start());
            Some(SkuSpan {
                sku,
                start: whole.start(),
                content: &text[whole.end()..content_end],
            })
        })
        .collect()
}

/// Quantity for the SKU at byte offset `sku_start`.
///
/// Scans backward to the nearest preceding `Quantity` marker that is
/// followed by a number; defaults to 1. Values above [`MAX_QUANTITY`] are
/// stray numbers (phone numbers, zip codes) and also fall back to 1.
pub fn quantity_before(text: &str, sku_start: usize) -> u32 {
    let prefix = &text[..sku_start.min(text.len())];
    prefix
        .rmatch_indices("Quantity")
        .find_map(|(idx, _)| {
            RE_QUANTITY
                .captures(&prefix[idx..])
                .map(|c| c[1].parse::<u32>().ok())
        })
        .flatten()
        .filter(|&q| (1..=MAX_QUANTITY).contains(&q))
        .unwrap_or(1)
}

/// Towel color: the trailing `-` segment of the SKU minus any price or tax
/// text the extractor glued onto the line.
pub fn towel_color(sku: &str) -> String {
    let tail = sku.rsplit('-').next().unwrap_or(sku).trim();
    RE_PRICE_TAIL
        .split(tail)
        .next()
        .unwrap_or(tail)
        .trim()
        .to_string()
}

/// Single trailing capital letter of a monogram SKU (`…-Navy-K` → `K`).
pub fn monogram_initial(sku: &str) -> Option<char> {
    RE_MONOGRAM_INITIAL
        .captures(sku)
        .and_then(|c| c[1].chars().next())
}

pub fn font(content: &str) -> String {
    FONT.find(content).unwrap_or_default()
}

pub fn font_color(content: &str) -> String {
    FONT_COLOR.find(content).unwrap_or_default()
}

/// Gift text for an item: an explicit gift message wins over a gift card.
pub fn gift_message(content: &str) -> String {
    GIFT_MESSAGE
        .find(content)
        .or_else(|| GIFT_CARD.find(content))
        .unwrap_or_default()
}
