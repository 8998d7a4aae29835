//! Glyph advance widths for the base-14 fonts used on labels.
//!
//! Widths are in 1/1000 em, copied from the Adobe Font Metrics files of the
//! standard PDF fonts, indexed by WinAnsi code for printable ASCII. The
//! oblique faces share the upright widths. Characters outside the table
//! fall back to a typical lower-case advance.

use super::Font;

/// Advance of characters missing from the tables.
const FALLBACK_WIDTH: u16 = 556;

/// ZapfDingbats ornaments have no per-glyph table here.
const DINGBAT_WIDTH: u16 = 788;

/// Helvetica, codes 32..=126.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,      // 'p'..'~'
];

/// Helvetica-Bold, codes 32..=126.
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn char_width(c: char, font: Font) -> u16 {
    let table = match font {
        Font::Helvetica | Font::HelveticaOblique => &HELVETICA,
        Font::HelveticaBold | Font::HelveticaBoldOblique => &HELVETICA_BOLD,
        Font::ZapfDingbats => return DINGBAT_WIDTH,
    };
    match c as u32 {
        code @ 32..=126 => table[(code - 32) as usize],
        // no-break space
        0xA0 => table[0],
        _ => FALLBACK_WIDTH,
    }
}

/// Rendered width of `text` in points at `size`.
pub fn string_width(text: &str, font: Font, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(c, font))).sum();
    units as f32 * size / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_helvetica_widths() {
        // "Hello" = 722 + 556 + 222 + 222 + 556
        assert!((string_width("Hello", Font::Helvetica, 10.0) - 22.78).abs() < 1e-3);
        assert_eq!(string_width("", Font::Helvetica, 12.0), 0.0);
    }

    #[test]
    fn bold_is_wider_than_regular() {
        let text = "Monogrammed Hand Towels";
        assert!(
            string_width(text, Font::HelveticaBold, 11.0) > string_width(text, Font::Helvetica, 11.0)
        );
    }

    #[test]
    fn oblique_shares_upright_widths() {
        let text = "To my dearest friend";
        assert_eq!(
            string_width(text, Font::HelveticaOblique, 14.0),
            string_width(text, Font::Helvetica, 14.0)
        );
    }

    #[test]
    fn width_scales_with_size() {
        let w10 = string_width("QTY: 3", Font::HelveticaBold, 10.0);
        let w20 = string_width("QTY: 3", Font::HelveticaBold, 20.0);
        assert!((w20 - 2.0 * w10).abs() < 1e-3);
    }

    #[test]
    fn non_ascii_uses_fallback() {
        assert_eq!(string_width("é", Font::Helvetica, 1000.0), 556.0);
    }
}
