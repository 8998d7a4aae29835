//! Rendering collaborators: turn composed [`Page`]s into artifact bytes.
//!
//! The compositors in [`crate::layout`] are pure; everything that touches a
//! document engine lives behind [`Renderer`]. Two implementations ship:
//!
//! - [`PdfRenderer`] writes a PDF through pdfium using the base-14 fonts,
//!   so no font files need to be embedded.
//! - [`JsonRenderer`] dumps the draw primitives as JSON, which needs no
//!   native library at all.

use crate::error::PackslipError;
use crate::layout::{DrawOp, Font, Page, Rgb};
use crate::pipeline::text::bind_pdfium;
use pdfium_render::prelude::*;
use std::path::PathBuf;
use tracing::{debug, info};

/// Produces one artifact from a sequence of pages.
pub trait Renderer: Send + Sync {
    fn render(&self, pages: &[Page]) -> Result<Vec<u8>, PackslipError>;

    /// File extension of the produced artifact, without the dot.
    fn extension(&self) -> &'static str;
}

// ── PDF ──────────────────────────────────────────────────────────────────────

/// Renders pages into a single PDF via pdfium.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    library_dir: Option<PathBuf>,
}

impl PdfRenderer {
    pub fn new(library_dir: Option<PathBuf>) -> Self {
        Self { library_dir }
    }
}

impl Renderer for PdfRenderer {
    fn render(&self, pages: &[Page]) -> Result<Vec<u8>, PackslipError> {
        let pdfium = bind_pdfium(self.library_dir.as_deref())?;
        let fail = |e: PdfiumError| PackslipError::RenderFailed {
            kind: "PDF".into(),
            detail: format!("{e:?}"),
        };

        let mut document = pdfium.create_new_pdf().map_err(fail)?;
        let fonts = FontSet {
            helvetica: document.fonts_mut().helvetica(),
            helvetica_bold: document.fonts_mut().helvetica_bold(),
            helvetica_oblique: document.fonts_mut().helvetica_oblique(),
            helvetica_bold_oblique: document.fonts_mut().helvetica_bold_oblique(),
            zapf_dingbats: document.fonts_mut().zapf_dingbats(),
        };

        for (idx, composed) in pages.iter().enumerate() {
            let mut page = document
                .pages_mut()
                .create_page_at_end(PdfPagePaperSize::Custom(
                    PdfPoints::new(composed.width),
                    PdfPoints::new(composed.height),
                ))
                .map_err(fail)?;
            for op in &composed.ops {
                draw(&mut page, op, &fonts).map_err(fail)?;
            }
            debug!("Rendered page {} ({} ops)", idx + 1, composed.ops.len());
        }

        let bytes = document.save_to_bytes().map_err(fail)?;
        info!("PDF rendered: {} pages, {} bytes", pages.len(), bytes.len());
        Ok(bytes)
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }
}

struct FontSet {
    helvetica: PdfFontToken,
    helvetica_bold: PdfFontToken,
    helvetica_oblique: PdfFontToken,
    helvetica_bold_oblique: PdfFontToken,
    zapf_dingbats: PdfFontToken,
}

impl FontSet {
    fn token(&self, font: Font) -> PdfFontToken {
        match font {
            Font::Helvetica => self.helvetica,
            Font::HelveticaBold => self.helvetica_bold,
            Font::HelveticaOblique => self.helvetica_oblique,
            Font::HelveticaBoldOblique => self.helvetica_bold_oblique,
            Font::ZapfDingbats => self.zapf_dingbats,
        }
    }
}

fn color(rgb: Rgb) -> PdfColor {
    PdfColor::new(rgb.0, rgb.1, rgb.2, 255)
}

fn draw(page: &mut PdfPage, op: &DrawOp, fonts: &FontSet) -> Result<(), PdfiumError> {
    match op {
        DrawOp::Text {
            y,
            text,
            font,
            size,
            color: fill,
            ..
        } => {
            // pdfium positions text runs by their left edge
            let x = op.left_x().unwrap_or_default();
            let text = match font {
                Font::ZapfDingbats => text.chars().map(dingbat_code).collect(),
                _ => text.clone(),
            };
            let mut object = page.objects_mut().create_text_object(
                PdfPoints::new(x),
                PdfPoints::new(*y),
                text,
                fonts.token(*font),
                PdfPoints::new(*size),
            )?;
            object.set_fill_color(color(*fill))?;
        }
        DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            width,
            color: stroke,
        } => {
            page.objects_mut().create_path_object_line(
                PdfPoints::new(*x1),
                PdfPoints::new(*y1),
                PdfPoints::new(*x2),
                PdfPoints::new(*y2),
                color(*stroke),
                PdfPoints::new(*width),
            )?;
        }
        DrawOp::Rect {
            x,
            y,
            width,
            height,
            stroke_width,
            color: stroke,
        } => {
            page.objects_mut().create_path_object_rect(
                PdfRect::new_from_values(*y, *x, y + height, x + width),
                Some(color(*stroke)),
                Some(PdfPoints::new(*stroke_width)),
                None,
            )?;
        }
    }
    Ok(())
}

/// Map a Unicode dingbat to its ZapfDingbats character code.
fn dingbat_code(c: char) -> char {
    match c {
        '♥' => '\u{AA}',
        // U+2701..=U+275E sit at 0x21..=0x7E in the font's built-in encoding
        '\u{2701}'..='\u{275E}' => char::from((c as u32 - 0x2700 + 0x20) as u8),
        other => other,
    }
}

// ── JSON ─────────────────────────────────────────────────────────────────────

/// Renders pages as pretty-printed JSON draw lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, pages: &[Page]) -> Result<Vec<u8>, PackslipError> {
        serde_json::to_vec_pretty(pages).map_err(|e| PackslipError::RenderFailed {
            kind: "JSON".into(),
            detail: e.to_string(),
        })
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compose_gift_note;

    #[test]
    fn dingbat_codes() {
        assert_eq!(dingbat_code('❀'), '\u{60}');
        assert_eq!(dingbat_code('♥'), '\u{AA}');
        assert_eq!(dingbat_code('a'), 'a');
    }

    #[test]
    fn json_renderer_emits_page_list() {
        let pages = vec![compose_gift_note("1-2", "Al", "Hi")];
        let bytes = JsonRenderer.render(&pages).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["width"], 432.0);
        assert!(value[0]["ops"]
            .as_array()
            .unwrap()
            .iter()
            .any(|op| op["text"] == "To: Al"));
        assert_eq!(JsonRenderer.extension(), "json");
    }

    #[test]
    fn pdf_renderer_extension() {
        assert_eq!(PdfRenderer::default().extension(), "pdf");
    }
}
