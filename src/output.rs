//! Result types returned by [`crate::batch::parse_documents`].

use crate::error::DocumentError;
use crate::model::{line_items, LineItem, Order};
use serde::Serialize;
use std::path::PathBuf;

/// Everything a batch produced: the orders from all documents, in upload
/// order, plus what happened to each document.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutput {
    pub orders: Vec<Order>,
    pub documents: Vec<DocumentResult>,
    pub stats: BatchStats,
}

impl BatchOutput {
    /// True when no document yielded an order. Not an error: the documents
    /// were readable, they just held no packing slips.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Flattened (order, item) rows, numbered within each order id.
    pub fn line_items(&self) -> Vec<LineItem<'_>> {
        line_items(&self.orders)
    }

    /// Documents that could not be parsed.
    pub fn failures(&self) -> impl Iterator<Item = &DocumentResult> {
        self.documents.iter().filter(|d| d.error.is_some())
    }
}

/// Outcome for one uploaded document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentResult {
    /// File name shown in reports.
    pub name: String,
    pub path: PathBuf,
    /// Pages read from the document (after page selection).
    pub page_count: usize,
    pub order_count: usize,
    pub item_count: usize,
    /// Set when the document failed; counts are then zero.
    pub error: Option<DocumentError>,
}

impl DocumentResult {
    pub fn failed(name: String, path: PathBuf, error: DocumentError) -> Self {
        Self {
            name,
            path,
            page_count: 0,
            order_count: 0,
            item_count: 0,
            error: Some(error),
        }
    }
}

/// Aggregate counters for a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchStats {
    pub total_documents: usize,
    pub parsed_documents: usize,
    pub failed_documents: usize,
    pub orders: usize,
    pub items: usize,
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_batch_is_informational() {
        let out = BatchOutput {
            orders: vec![],
            documents: vec![DocumentResult {
                name: "blank.txt".into(),
                path: PathBuf::from("blank.txt"),
                page_count: 1,
                order_count: 0,
                item_count: 0,
                error: None,
            }],
            stats: BatchStats::default(),
        };
        assert!(out.is_empty());
        assert!(out.line_items().is_empty());
        assert_eq!(out.failures().count(), 0);
    }

    #[test]
    fn failed_result_has_zero_counts() {
        let r = DocumentResult::failed(
            "x.pdf".into(),
            PathBuf::from("x.pdf"),
            DocumentError::FileNotFound {
                path: PathBuf::from("x.pdf"),
            },
        );
        assert_eq!((r.page_count, r.order_count, r.item_count), (0, 0, 0));
        let json = serde_json::to_value(&r).unwrap();
        assert!(json["error"]["FileNotFound"].is_object());
    }
}
