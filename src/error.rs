//! Error types for the packslip-labels library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`PackslipError`]: **Fatal**: the operation cannot proceed at all
//!   (every document failed, the PDF engine cannot be bound, an artifact
//!   could not be rendered or written). Returned as `Err(PackslipError)`
//!   from the top-level entry points.
//!
//! * [`DocumentError`]: **Non-fatal**: one uploaded document failed
//!   (missing file, corrupt PDF, page text unavailable) but the rest of the
//!   batch is fine. Stored inside [`crate::output::DocumentResult`] so
//!   callers can report it and keep the orders parsed from the other files.
//!
//! A field that cannot be found on a slip is not an error at all: it
//! resolves to an empty string. Likewise an unrecognised SKU becomes
//! [`crate::model::ProductType::Unknown`].

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the packslip-labels library.
///
/// Per-document failures use [`DocumentError`] and are stored in
/// [`crate::output::DocumentResult`] rather than propagated here.
#[derive(Debug, Error)]
pub enum PackslipError {
    // ── Batch errors ──────────────────────────────────────────────────────
    /// Every document in the batch failed; there is nothing to show.
    #[error("All {total} documents failed to parse.\nFirst error: {first_error}")]
    AllDocumentsFailed { total: usize, first_error: String },

    // ── Engine errors ─────────────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
You can:\n\
  • Place libpdfium next to the binary or in the working directory.\n\
  • Set PDFIUM_LIB_PATH=/path/to/dir/containing/libpdfium.\n\
  • Feed plain-text page dumps (pages separated by form feeds) instead of PDFs.\n"
    )]
    PdfiumBindingFailed(String),

    /// The rendering collaborator could not produce an artifact.
    #[error("Rendering {kind} failed: {detail}")]
    RenderFailed { kind: String, detail: String },

    // ── Export errors ─────────────────────────────────────────────────────
    /// Tabular export (CSV or spreadsheet) failed.
    #[error("{format} export failed: {detail}")]
    ExportFailed { format: &'static str, detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write an output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A non-fatal error for a single document.
///
/// Stored alongside [`crate::output::DocumentResult`] when a document fails.
/// The batch continues unless ALL documents fail.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum DocumentError {
    /// Input file was not found at the given path.
    #[error("File not found: '{path}'")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'")]
    PermissionDenied { path: PathBuf },

    /// The file is neither a PDF nor UTF-8 text.
    #[error("Unsupported document '{path}': {detail}")]
    Unsupported { path: PathBuf, detail: String },

    /// Reading the file failed part-way.
    #[error("Failed to read '{path}': {detail}")]
    ReadFailed { path: PathBuf, detail: String },

    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{path}' is encrypted and requires a password")]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{path}'")]
    WrongPassword { path: PathBuf },

    /// pdfium could not produce text for one page.
    #[error("Text extraction failed for page {page} of '{path}': {detail}")]
    TextExtraction {
        path: PathBuf,
        page: usize,
        detail: String,
    },

    /// The PDF engine could not be loaded for this document.
    #[error("PDF engine unavailable: {0}")]
    EngineUnavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_documents_failed_display() {
        let e = PackslipError::AllDocumentsFailed {
            total: 3,
            first_error: "File not found: 'a.pdf'".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("All 3 documents"), "got: {msg}");
        assert!(msg.contains("a.pdf"));
    }

    #[test]
    fn export_failed_display() {
        let e = PackslipError::ExportFailed {
            format: "CSV",
            detail: "disk full".into(),
        };
        assert_eq!(e.to_string(), "CSV export failed: disk full");
    }

    #[test]
    fn text_extraction_display() {
        let e = DocumentError::TextExtraction {
            path: PathBuf::from("slips.pdf"),
            page: 4,
            detail: "bad stream".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("page 4"));
        assert!(msg.contains("slips.pdf"));
    }

    #[test]
    fn document_error_round_trips_through_json() {
        let e = DocumentError::PasswordRequired {
            path: PathBuf::from("locked.pdf"),
        };
        let json = serde_json::to_string(&e).unwrap();
        let back: DocumentError = serde_json::from_str(&json).unwrap();
        assert!(back.to_string().contains("locked.pdf"));
    }
}
