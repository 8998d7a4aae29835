//! Gift note: a decorative card carrying the buyer's message.
//!
//! Same 6 × 4 inch stock as the labels. Double border, four corner
//! ornaments, a heart, then the message wrapped and centred, and the
//! recipient line near the bottom.

use super::{inch, metrics, Canvas, Font, Page, Rgb, PAGE_HEIGHT, PAGE_WIDTH};

const SADDLE_BROWN: Rgb = Rgb(0x8B, 0x45, 0x13);
const TAN: Rgb = Rgb(0xD4, 0xA5, 0x74);
const ROSE: Rgb = Rgb(0xC6, 0x4A, 0x7B);
const CHARCOAL: Rgb = Rgb(0x4A, 0x4A, 0x4A);

const MARGIN: f32 = inch(0.4);

const MESSAGE_FONT: Font = Font::HelveticaOblique;
const MESSAGE_SIZE: f32 = 14.0;
const MESSAGE_LEADING: f32 = inch(0.22);

/// Widest a message line may be.
pub const MESSAGE_MAX_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN - inch(0.8);

/// Compose the gift note for one item's message.
pub fn compose_gift_note(order_id: &str, buyer_name: &str, message: &str) -> Page {
    let (w, h) = (PAGE_WIDTH, PAGE_HEIGHT);
    let mut c = Canvas::label_stock();

    c.set_stroke(SADDLE_BROWN);
    c.set_line_width(3.0);
    c.rect(MARGIN, MARGIN, w - 2.0 * MARGIN, h - 2.0 * MARGIN);
    c.set_line_width(1.0);
    c.rect(
        MARGIN + inch(0.1),
        MARGIN + inch(0.1),
        w - 2.0 * MARGIN - inch(0.2),
        h - 2.0 * MARGIN - inch(0.2),
    );

    let inset = inch(0.15);
    let corners = [
        (MARGIN + inset, h - MARGIN - inset),
        (w - MARGIN - inset, h - MARGIN - inset),
        (MARGIN + inset, MARGIN + inset),
        (w - MARGIN - inset, MARGIN + inset),
    ];
    c.set_font(Font::ZapfDingbats, 16.0);
    c.set_fill(TAN);
    for (x, y) in corners {
        c.draw_centred(x, y - inch(0.05), "❀");
    }

    c.set_font(Font::ZapfDingbats, 20.0);
    c.set_fill(ROSE);
    c.draw_centred(w / 2.0, h - MARGIN - inch(0.5), "♥");

    c.set_font(MESSAGE_FONT, MESSAGE_SIZE);
    c.set_fill(CHARCOAL);
    let mut y = h / 2.0 + inch(0.3);
    for line in wrap_text(message, MESSAGE_FONT, MESSAGE_SIZE, MESSAGE_MAX_WIDTH) {
        c.draw_centred(w / 2.0, y, &line);
        y -= MESSAGE_LEADING;
    }

    c.set_font(Font::HelveticaBold, 12.0);
    c.set_fill(SADDLE_BROWN);
    c.draw_centred(w / 2.0, MARGIN + inch(0.6), &format!("To: {buyer_name}"));

    c.set_font(Font::Helvetica, 7.0);
    c.set_fill(Rgb::GREY);
    c.draw_right(w - MARGIN - inset, MARGIN + inch(0.2), &format!("Order: {order_id}"));

    c.finish()
}

/// Greedy word wrap by measured width.
///
/// Explicit newlines always break. Each produced line is no wider than
/// `max_width`, except a single word that is wider on its own, which gets
/// a line to itself.
pub fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{current} {word}");
            if metrics::string_width(&candidate, font, size) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        lines.push(current);
    }
    lines
}
