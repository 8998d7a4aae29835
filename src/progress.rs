//! Progress-callback trait for per-document parsing events.
//!
//! Inject an [`Arc<dyn BatchProgressCallback>`] via
//! [`crate::config::PackslipConfigBuilder::progress_callback`] to receive
//! events as the batch walks each uploaded document.
//!
//! # Example
//!
//! ```rust
//! use packslip_labels::{BatchProgressCallback, PackslipConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct ItemCounter {
//!     items: AtomicUsize,
//! }
//!
//! impl BatchProgressCallback for ItemCounter {
//!     fn on_document_complete(&self, index: usize, total: usize, orders: usize, items: usize) {
//!         self.items.fetch_add(items, Ordering::SeqCst);
//!         eprintln!("Document {}/{}: {} orders", index, total, orders);
//!     }
//! }
//!
//! let counter = Arc::new(ItemCounter { items: AtomicUsize::new(0) });
//!
//! let config = PackslipConfig::builder()
//!     .progress_callback(counter as Arc<dyn BatchProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by [`crate::batch::parse_documents`] as it processes each document.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Indices are 1-based.
pub trait BatchProgressCallback: Send + Sync {
    /// Called once before the first document is opened.
    fn on_batch_start(&self, total_documents: usize) {
        let _ = total_documents;
    }

    /// Called just before a document is read.
    fn on_document_start(&self, index: usize, total: usize, name: &str) {
        let _ = (index, total, name);
    }

    /// Called when a document has been parsed.
    ///
    /// # Arguments
    /// * `orders`: orders emitted from this document
    /// * `items` : line items across those orders
    fn on_document_complete(&self, index: usize, total: usize, orders: usize, items: usize) {
        let _ = (index, total, orders, items);
    }

    /// Called when a document could not be read or parsed.
    fn on_document_error(&self, index: usize, total: usize, error: &str) {
        let _ = (index, total, error);
    }

    /// Called once after every document has been attempted.
    ///
    /// # Arguments
    /// * `succeeded`: documents that parsed without error
    fn on_batch_complete(&self, total: usize, succeeded: usize) {
        let _ = (total, succeeded);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl BatchProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::PackslipConfig`].
pub type ProgressCallback = Arc<dyn BatchProgressCallback>;
