//! Page text: pull one UTF-8 string per page out of a document and clean it.
//!
//! Text extraction itself is a collaborator behind [`PageTextSource`]. Two
//! implementations ship with the crate:
//!
//! - [`PdfiumTextSource`] reads a real PDF through `pdfium-render`.
//! - [`PlainTextSource`] reads a text dump whose pages are separated by form
//!   feeds, the format `pdftotext` writes. Handy for tests and for machines
//!   without libpdfium.
//!
//! Whatever the source, [`normalise_page`] runs before parsing. pdfium in
//! particular ends lines with `\r\n` and sprinkles zero-width characters
//! into text copied from web forms; both would defeat the field patterns.

use crate::error::{DocumentError, PackslipError};
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Produces the text of every page of a document, in page order.
pub trait PageTextSource: Send + Sync {
    fn page_texts(&self, path: &Path, password: Option<&str>) -> Result<Vec<String>, DocumentError>;
}

/// Bind to the pdfium shared library.
///
/// With `library_dir` set, only that directory is tried. Otherwise the
/// working directory is tried first, then the system library path.
pub fn bind_pdfium(library_dir: Option<&Path>) -> Result<Pdfium, PackslipError> {
    let bindings = match library_dir {
        Some(dir) => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir)),
        None => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library()),
    }
    .map_err(|e| PackslipError::PdfiumBindingFailed(format!("{e:?}")))?;
    Ok(Pdfium::new(bindings))
}

// ── pdfium ───────────────────────────────────────────────────────────────────

/// Text source backed by pdfium.
#[derive(Debug, Clone, Default)]
pub struct PdfiumTextSource {
    library_dir: Option<PathBuf>,
}

impl PdfiumTextSource {
    pub fn new(library_dir: Option<PathBuf>) -> Self {
        Self { library_dir }
    }
}

impl PageTextSource for PdfiumTextSource {
    fn page_texts(&self, path: &Path, password: Option<&str>) -> Result<Vec<String>, DocumentError> {
        let pdfium = bind_pdfium(self.library_dir.as_deref())
            .map_err(|e| DocumentError::EngineUnavailable(e.to_string()))?;

        let document = pdfium.load_pdf_from_file(path, password).map_err(|e| {
            let err_str = format!("{:?}", e);
            if err_str.contains("Password") || err_str.contains("password") {
                if password.is_some() {
                    DocumentError::WrongPassword {
                        path: path.to_path_buf(),
                    }
                } else {
                    DocumentError::PasswordRequired {
                        path: path.to_path_buf(),
                    }
                }
            } else {
                DocumentError::CorruptPdf {
                    path: path.to_path_buf(),
                    detail: err_str,
                }
            }
        })?;

        let pages = document.pages();
        info!("PDF loaded: {} pages", pages.len());

        pages
            .iter()
            .enumerate()
            .map(|(idx, page)| {
                let text = page
                    .text()
                    .map_err(|e| DocumentError::TextExtraction {
                        path: path.to_path_buf(),
                        page: idx + 1,
                        detail: format!("{:?}", e),
                    })?
                    .all();
                debug!("Page {} → {} chars", idx + 1, text.len());
                Ok(text)
            })
            .collect()
    }
}

// ── Plain text ───────────────────────────────────────────────────────────────

/// Page separator in plain-text dumps.
pub const FORM_FEED: char = '\u{000C}';

/// Text source for form-feed separated text dumps.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextSource;

impl PageTextSource for PlainTextSource {
    fn page_texts(&self, path: &Path, _password: Option<&str>) -> Result<Vec<String>, DocumentError> {
        let raw = std::fs::read_to_string(path).map_err(|e| DocumentError::ReadFailed {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        Ok(split_pages(&raw))
    }
}

/// Split a text dump into pages. A trailing form feed does not start an
/// extra empty page.
pub fn split_pages(raw: &str) -> Vec<String> {
    let body = raw.strip_suffix(FORM_FEED).unwrap_or(raw);
    body.split(FORM_FEED).map(str::to_string).collect()
}

// ── Normalisation ────────────────────────────────────────────────────────────

/// Clean one page of extracted text before parsing.
///
/// 1. Normalise line endings (CRLF / CR → LF)
/// 2. Strip invisible Unicode (zero-width spaces, BOM, soft hyphens, joiners)
/// 3. Trim trailing whitespace per line
pub fn normalise_page(input: &str) -> String {
    let s = normalise_line_endings(input);
    let s = remove_invisible_chars(&s);
    trim_trailing_whitespace(&s)
}

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

fn remove_invisible_chars(input: &str) -> String {
    input.replace(
        [
            '\u{200B}', '\u{FEFF}', '\u{00AD}', '\u{200C}', '\u{200D}', '\u{2060}',
        ],
        "",
    )
}

fn trim_trailing_whitespace(input: &str) -> String {
    let trimmed = input
        .lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n");
    if input.ends_with('\n') {
        trimmed + "\n"
    } else {
        trimmed
    }
}
