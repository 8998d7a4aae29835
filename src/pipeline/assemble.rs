//! Order assembly: fold per-page text into orders and their line items.
//!
//! A packing-slip PDF is a run of pages. A page carrying `Order ID:` opens a
//! new order; pages without it continue the current one (long orders spill
//! over). Every page seen while an order is open is scanned for `SKU:` lines.
//!
//! ```text
//!            page with "Order ID:"
//!  NoOrder ───────────────────────────▶ InOrder(order)
//!                                        │  ▲
//!       page with "Order ID:"            │  │ page without marker
//!       (finalise, open next)            └──┘ (continuation)
//! ```
//!
//! Finalising an order with zero items drops it silently.

use super::classify::classify;
use super::extract::{self, ORDER_START};
use crate::model::{Item, Order};
use tracing::{debug, warn};

#[derive(Debug, Default)]
enum State {
    #[default]
    NoOrder,
    InOrder(Order),
}

/// Incremental order builder. Feed pages in document order, then
/// [`finish`](OrderAssembler::finish).
#[derive(Debug, Default)]
pub struct OrderAssembler {
    state: State,
    orders: Vec<Order>,
}

impl OrderAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one page of text.
    pub fn push_page(&mut self, text: &str) {
        if text.contains(ORDER_START) {
            if let State::InOrder(order) = std::mem::take(&mut self.state) {
                self.finalise(order);
            }
            let header = extract::order_header(text);
            debug!("Opening order '{}'", header.order_id);
            self.state = State::InOrder(Order {
                order_id: header.order_id,
                order_date: header.order_date,
                buyer_name: header.buyer_name,
                shipping_service: header.shipping_service,
                items: Vec::new(),
            });
        }

        if let State::InOrder(order) = &mut self.state {
            order.items.extend(scan_items(text));
        }
    }

    /// End of input: finalise any open order and return everything emitted.
    pub fn finish(mut self) -> Vec<Order> {
        if let State::InOrder(order) = std::mem::take(&mut self.state) {
            self.finalise(order);
        }
        self.orders
    }

    fn finalise(&mut self, order: Order) {
        if order.items.is_empty() {
            warn!("Dropping order '{}' with no line items", order.order_id);
            return;
        }
        debug!(
            "Finalised order '{}' with {} items",
            order.order_id,
            order.items.len()
        );
        self.orders.push(order);
    }
}

/// Assemble orders from a full sequence of page texts.
pub fn assemble<I, S>(pages: I) -> Vec<Order>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut assembler = OrderAssembler::new();
    for page in pages {
        assembler.push_page(page.as_ref());
    }
    assembler.finish()
}

/// Build one [`Item`] per `SKU:` occurrence on a page.
pub fn scan_items(text: &str) -> Vec<Item> {
    extract::sku_spans(text)
        .into_iter()
        .map(|span| {
            let classification = classify(span.sku, text);
            let item = Item {
                sku: span.sku.to_string(),
                product_type: classification.product_type(),
                towel_color: extract::towel_color(span.sku),
                quantity: extract::quantity_before(text, span.start),
                font: extract::font(span.content),
                font_color: extract::font_color(span.content),
                customizations: classification.customizations(span.content),
                gift_message: extract::gift_message(span.content),
            };
            debug!(
                "Scanned item {} ({}, qty {})",
                item.sku, item.product_type, item.quantity
            );
            item
        })
        .collect()
}
