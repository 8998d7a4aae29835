//! Manufacturing label: one 6 × 4 inch page per line item.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Buyer Name                          QTY: 2     [1 of 3]  │ header band
//! │ Order: 111-2223334                    Standard Shipping  │
//! │ Jan 1 2024                                               │
//! │━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━│
//! │┌──────────────────┬─────────────────────────────────────┐│
//! ││  PRODUCT TYPE:   │ PERSONALIZATION:                    ││
//! ││   3-PC SET       │ Washcloth:                          ││ content box
//! ││──────────────────│   Hello                             ││ (2.4 in)
//! ││  COLOR: BLUE     │ Hand Towel:                         ││
//! ││──────────────────│   World                             ││
//! ││  THREAD: GOLD    │ ...                                 ││
//! │└──────────────────┴─────────────────────────────────────┘│
//! │┌────────────────────────────────────────────────────────┐│
//! ││ GIFT NOTE: YES                                         ││ only with a
//! │└────────────────────────────────────────────────────────┘│ gift message
//! └──────────────────────────────────────────────────────────┘
//! ```

use super::{inch, Canvas, Font, Page, PAGE_HEIGHT, PAGE_WIDTH};
use crate::config::LabelVariant;
use crate::model::{Item, Order};

/// Quantities above this are set oblique so the packer notices them.
const EMPHASIS_QUANTITY: u32 = 2;

/// Height of the two-column content box.
const CONTENT_HEIGHT: f32 = inch(2.4);

/// A slot is only started while the cursor is this far above the box floor.
const SLOT_FLOOR: f32 = inch(0.2);

/// Fixed positions of the label's frame.
///
/// The header band has a fixed height, so every label shares one geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelGeometry {
    pub left: f32,
    pub right: f32,
    /// Baseline of the buyer name.
    pub header_top: f32,
    /// y of the thick rule under the header.
    pub divider_y: f32,
    pub content_top: f32,
    pub content_bottom: f32,
    pub left_col_right: f32,
    pub right_col_left: f32,
}

impl LabelGeometry {
    pub fn new() -> Self {
        let left = inch(0.25);
        let right = PAGE_WIDTH - inch(0.25);
        let header_top = PAGE_HEIGHT - inch(0.25);
        let divider_y = header_top - inch(0.16) - inch(0.15) - inch(0.22);
        let content_top = divider_y - inch(0.15);
        let left_col_right = left + (right - left) * 0.40;
        Self {
            left,
            right,
            header_top,
            divider_y,
            content_top,
            content_bottom: content_top - CONTENT_HEIGHT,
            left_col_right,
            right_col_left: left_col_right + inch(0.1),
        }
    }

    fn left_col_center(&self) -> f32 {
        (self.left + self.left_col_right) / 2.0
    }
}

impl Default for LabelGeometry {
    fn default() -> Self {
        Self::new()
    }
}

/// Compose the manufacturing label for one item.
///
/// `position` and `count` place the item among the items sharing its order
/// id; the `[k of n]` badge only appears when `count > 1`.
pub fn compose_label(
    item: &Item,
    order: &Order,
    position: usize,
    count: usize,
    variant: LabelVariant,
) -> Page {
    let geo = LabelGeometry::new();
    let mut c = Canvas::label_stock();

    draw_header(&mut c, &geo, item, order, position, count);

    c.set_line_width(2.0);
    c.rect(
        geo.left,
        geo.content_bottom,
        geo.right - geo.left,
        CONTENT_HEIGHT,
    );
    c.set_line_width(1.5);
    let divider_x = geo.left_col_right + inch(0.05);
    c.line(divider_x, geo.content_top, divider_x, geo.content_bottom);

    match variant {
        LabelVariant::Standard => draw_specs_standard(&mut c, &geo, item),
        LabelVariant::WithFont => draw_specs_with_font(&mut c, &geo, item),
    }
    draw_personalization(&mut c, &geo, item);

    if item.has_gift_message() {
        let top = geo.content_bottom - inch(0.15);
        let height = inch(0.25);
        c.set_line_width(2.0);
        c.rect(geo.left, top - height, geo.right - geo.left, height);
        c.set_font(Font::HelveticaBold, 10.0);
        c.draw_string(geo.left + inch(0.1), top - inch(0.16), "GIFT NOTE: YES");
    }

    c.finish()
}

fn draw_header(
    c: &mut Canvas,
    geo: &LabelGeometry,
    item: &Item,
    order: &Order,
    position: usize,
    count: usize,
) {
    let mut y = geo.header_top;

    c.set_font(Font::HelveticaBold, 13.0);
    c.draw_string(geo.left, y, &order.buyer_name);

    let qty_font = if item.quantity > EMPHASIS_QUANTITY {
        Font::HelveticaBoldOblique
    } else {
        Font::HelveticaBold
    };
    let qty_text = format!("QTY: {}", item.quantity);
    if count > 1 {
        c.set_font(qty_font, 15.0);
        c.draw_right(geo.right - inch(0.85), y, &qty_text);
        c.set_font(Font::HelveticaBold, 11.0);
        c.draw_right(geo.right, y, &format!("[{position} of {count}]"));
    } else {
        c.set_font(qty_font, 15.0);
        c.draw_right(geo.right, y, &qty_text);
    }

    y -= inch(0.16);
    c.set_font(Font::Helvetica, 11.0);
    c.draw_string(geo.left, y, &format!("Order: {}", order.order_id));
    c.set_font(Font::Helvetica, 9.0);
    c.draw_right(geo.right, y, &order.shipping_service);

    y -= inch(0.15);
    c.draw_string(geo.left, y, &order.order_date);

    c.set_line_width(2.0);
    c.line(geo.left, geo.divider_y, geo.right, geo.divider_y);
}

/// Caption, value, and the spacing that follows each.
struct SpecRow<'a> {
    caption: &'a str,
    value: String,
    value_size: f32,
    caption_gap: f32,
    after_value: f32,
}

/// Stack spec rows down the left column, with a thin rule after every row
/// but the last.
fn draw_spec_rows(c: &mut Canvas, geo: &LabelGeometry, rows: &[SpecRow<'_>], after_rule: f32) {
    let center = geo.left_col_center();
    let mut y = geo.content_top - inch(0.12);

    for (idx, row) in rows.iter().enumerate() {
        c.set_font(Font::Helvetica, 8.0);
        c.draw_centred(center, y, row.caption);
        y -= row.caption_gap;
        c.set_font(Font::HelveticaBold, row.value_size);
        c.draw_centred(center, y, &row.value);

        if idx + 1 < rows.len() {
            y -= row.after_value;
            c.set_line_width(0.5);
            c.line(geo.left + inch(0.05), y, geo.left_col_right - inch(0.05), y);
            y -= after_rule;
        }
    }
}

fn draw_specs_standard(c: &mut Canvas, geo: &LabelGeometry, item: &Item) {
    let rows = [
        SpecRow {
            caption: "PRODUCT TYPE:",
            value: item.product_type.label().to_uppercase(),
            value_size: 11.0,
            caption_gap: inch(0.2),
            after_value: inch(0.3),
        },
        SpecRow {
            caption: "COLOR:",
            value: item.towel_color.to_uppercase(),
            value_size: 16.0,
            caption_gap: inch(0.2),
            after_value: inch(0.32),
        },
        SpecRow {
            caption: "THREAD COLOR:",
            value: item.font_color.to_uppercase(),
            value_size: 13.0,
            caption_gap: inch(0.18),
            after_value: 0.0,
        },
    ];
    draw_spec_rows(c, geo, &rows, inch(0.22));
}

/// Four rows need tighter spacing to fit the same box.
fn draw_specs_with_font(c: &mut Canvas, geo: &LabelGeometry, item: &Item) {
    let rows = [
        SpecRow {
            caption: "PRODUCT TYPE:",
            value: item.product_type.label().to_uppercase(),
            value_size: 11.0,
            caption_gap: inch(0.18),
            after_value: inch(0.22),
        },
        SpecRow {
            caption: "COLOR:",
            value: item.towel_color.to_uppercase(),
            value_size: 16.0,
            caption_gap: inch(0.2),
            after_value: inch(0.24),
        },
        SpecRow {
            caption: "THREAD COLOR:",
            value: item.font_color.to_uppercase(),
            value_size: 13.0,
            caption_gap: inch(0.18),
            after_value: inch(0.2),
        },
        SpecRow {
            caption: "FONT:",
            value: item.font.to_uppercase(),
            value_size: 11.0,
            caption_gap: inch(0.18),
            after_value: 0.0,
        },
    ];
    draw_spec_rows(c, geo, &rows, inch(0.2));
}

/// Right column. Slots that would cross the box floor are not drawn.
fn draw_personalization(c: &mut Canvas, geo: &LabelGeometry, item: &Item) {
    let mut y = geo.content_top - inch(0.12);
    c.set_font(Font::HelveticaBold, 9.0);
    c.draw_string(geo.right_col_left + inch(0.05), y, "PERSONALIZATION:");
    y -= inch(0.24);

    let x = geo.right_col_left + inch(0.08);
    for custom in &item.customizations {
        if y <= geo.content_bottom + SLOT_FLOOR {
            break;
        }
        c.set_font(Font::Helvetica, 11.0);
        c.draw_string(x, y, &format!("{}:", custom.slot));
        y -= inch(0.18);
        c.set_font(Font::HelveticaBoldOblique, 15.0);
        c.draw_string(x, y, &custom.text);
        y -= inch(0.24);
    }
}
