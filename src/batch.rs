//! Batch entry points: parse a set of uploaded documents into orders.
//!
//! Documents are processed one after another, in the order given. A
//! document that cannot be read is recorded in its [`DocumentResult`] and
//! the batch moves on; only a batch in which every document failed is an
//! error.

use crate::config::PackslipConfig;
use crate::error::{DocumentError, PackslipError};
use crate::model::Order;
use crate::output::{BatchOutput, BatchStats, DocumentResult};
use crate::pipeline::assemble::assemble;
use crate::pipeline::input::{resolve_input, InputKind, ResolvedInput};
use crate::pipeline::text::{normalise_page, PageTextSource, PdfiumTextSource, PlainTextSource};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Parse every document in `paths` and concatenate their orders.
///
/// # Returns
/// `Ok(BatchOutput)` as long as at least one document parsed, even if it
/// held no orders (check [`BatchOutput::is_empty`]).
///
/// # Errors
/// [`PackslipError::AllDocumentsFailed`] when no document could be parsed.
pub fn parse_documents<P: AsRef<Path>>(
    paths: &[P],
    config: &PackslipConfig,
) -> Result<BatchOutput, PackslipError> {
    let start = Instant::now();
    let total = paths.len();
    info!("Parsing {} documents", total);

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(total);
    }

    let mut orders = Vec::new();
    let mut documents = Vec::with_capacity(total);

    for (idx, path) in paths.iter().enumerate() {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        if let Some(ref cb) = config.progress_callback {
            cb.on_document_start(idx + 1, total, &name);
        }

        match parse_document(path, config) {
            Ok((page_count, doc_orders)) => {
                let item_count = doc_orders.iter().map(|o| o.items.len()).sum();
                info!(
                    "{}: {} pages, {} orders, {} items",
                    name,
                    page_count,
                    doc_orders.len(),
                    item_count
                );
                if let Some(ref cb) = config.progress_callback {
                    cb.on_document_complete(idx + 1, total, doc_orders.len(), item_count);
                }
                documents.push(DocumentResult {
                    name,
                    path: path.to_path_buf(),
                    page_count,
                    order_count: doc_orders.len(),
                    item_count,
                    error: None,
                });
                orders.extend(doc_orders);
            }
            Err(e) => {
                warn!("{}: {}", name, e);
                if let Some(ref cb) = config.progress_callback {
                    cb.on_document_error(idx + 1, total, &e.to_string());
                }
                documents.push(DocumentResult::failed(name, path.to_path_buf(), e));
            }
        }
    }

    let failed = documents.iter().filter(|d| d.error.is_some()).count();
    let parsed = total - failed;

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_complete(total, parsed);
    }

    if total > 0 && parsed == 0 {
        let first_error = documents
            .iter()
            .find_map(|d| d.error.as_ref())
            .map(|e| e.to_string())
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(PackslipError::AllDocumentsFailed { total, first_error });
    }

    let stats = BatchStats {
        total_documents: total,
        parsed_documents: parsed,
        failed_documents: failed,
        orders: orders.len(),
        items: orders.iter().map(|o| o.items.len()).sum(),
        duration_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        "Batch complete: {}/{} documents, {} orders, {} items, {}ms",
        parsed, total, stats.orders, stats.items, stats.duration_ms
    );

    Ok(BatchOutput {
        orders,
        documents,
        stats,
    })
}

/// Assemble orders from in-memory page texts, normalising each page first.
pub fn parse_pages<S: AsRef<str>>(pages: &[S]) -> Vec<Order> {
    assemble(pages.iter().map(|p| normalise_page(p.as_ref())))
}

/// One document: resolve, extract, select pages, assemble.
fn parse_document(
    path: &Path,
    config: &PackslipConfig,
) -> Result<(usize, Vec<Order>), DocumentError> {
    let resolved = resolve_input(path)?;
    let source = text_source_for(&resolved, config);
    let pages = source.page_texts(&resolved.path, config.password.as_deref())?;

    let indices = config.pages.to_indices(pages.len());
    debug!(
        "{}: {} of {} pages selected",
        resolved.display_name(),
        indices.len(),
        pages.len()
    );
    let selected: Vec<&str> = indices.iter().map(|&i| pages[i].as_str()).collect();
    Ok((selected.len(), parse_pages(&selected)))
}

fn text_source_for(resolved: &ResolvedInput, config: &PackslipConfig) -> Arc<dyn PageTextSource> {
    if let Some(ref source) = config.text_source {
        return Arc::clone(source);
    }
    match resolved.kind {
        InputKind::Pdf => Arc::new(PdfiumTextSource::new(config.pdfium_library.clone())),
        InputKind::Text => Arc::new(PlainTextSource),
    }
}
