//! # packslip-labels
//!
//! Turn marketplace packing-slip PDFs for personalised towel orders into
//! print-ready manufacturing labels and gift notes.
//!
//! ## Why this crate?
//!
//! Packing slips are meant for people, not programs: field labels wander,
//! values run into each other, and one order can spill across pages. This
//! crate recovers the orders with tolerant pattern heuristics (a missing
//! field is an empty string, never an error) and then lays every line item
//! out on fixed 6 × 4 inch label stock.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF / text dump
//!  │
//!  ├─ 1. Input     resolve the path, sniff PDF vs. text
//!  ├─ 2. Text      one string per page (pdfium or form-feed dump), normalised
//!  ├─ 3. Assemble  pages → orders → items  (extract + classify)
//!  ├─ 4. Compose   item → label page, gift message → gift-note page
//!  └─ 5. Render    pages → PDF (or JSON draw lists)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use packslip_labels::{parse_documents, PackslipConfig, PdfRenderer, Selection, Session};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PackslipConfig::default();
//!     let batch = parse_documents(&["slips.pdf"], &config)?;
//!
//!     let mut session = Session::new(config.label_variant);
//!     session.load(batch);
//!     if let Some(labels) = session.generate_labels(&PdfRenderer::default(), &Selection::All)? {
//!         packslip_labels::write_artifact(labels.file_name(), &labels.bytes)?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `packslip` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! packslip-labels = { version = "0.3", default-features = false }
//! ```
//!
//! ## Without libpdfium
//!
//! Both ends of the pipeline talk to pdfium through traits. Feed text dumps
//! (`pdftotext` output, pages separated by form feeds) and render with
//! [`JsonRenderer`] to run with no native library at all.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod batch;
pub mod config;
pub mod error;
pub mod export;
pub mod layout;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod plan;
pub mod progress;
pub mod render;
pub mod session;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use batch::{parse_documents, parse_pages};
pub use config::{LabelVariant, PackslipConfig, PackslipConfigBuilder, Selection};
pub use error::{DocumentError, PackslipError};
pub use export::{to_csv, to_xlsx};
pub use layout::{compose_gift_note, compose_label, wrap_text, DrawOp, Page};
pub use model::{line_items, Customization, Item, LineItem, Order, ProductType};
pub use output::{BatchOutput, BatchStats, DocumentResult};
pub use pipeline::classify::{classify, Classification};
pub use pipeline::extract::extract;
pub use pipeline::text::{PageTextSource, PdfiumTextSource, PlainTextSource};
pub use plan::ProductionPlan;
pub use progress::{BatchProgressCallback, NoopProgressCallback, ProgressCallback};
pub use render::{JsonRenderer, PdfRenderer, Renderer};
pub use session::{write_artifact, Artifact, ArtifactKind, Session};
