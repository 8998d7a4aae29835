//! Session state: the current order set and the last generated artifacts.
//!
//! A session holds exactly one slot per artifact kind. Loading a new batch
//! replaces the orders and empties both slots, so an artifact can never
//! describe orders other than the ones currently loaded. Generation is
//! all-or-nothing: every page is composed and rendered before the slot is
//! replaced, and a failure leaves the previous artifact untouched.

use crate::config::{LabelVariant, Selection};
use crate::error::PackslipError;
use crate::layout::{compose_gift_note, compose_label, Page};
use crate::model::{line_items, LineItem, Order};
use crate::output::BatchOutput;
use crate::render::Renderer;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// The two printable artifact kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArtifactKind {
    ManufacturingLabels,
    GiftNotes,
}

impl ArtifactKind {
    fn stem(self) -> &'static str {
        match self {
            ArtifactKind::ManufacturingLabels => "all_manufacturing_labels",
            ArtifactKind::GiftNotes => "all_gift_notes",
        }
    }
}

/// A rendered artifact.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub page_count: usize,
    pub bytes: Vec<u8>,
    /// Extension reported by the renderer that produced `bytes`.
    pub extension: &'static str,
}

impl Artifact {
    /// Download file name, e.g. `all_manufacturing_labels.pdf`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.kind.stem(), self.extension)
    }
}

#[derive(Debug, Default)]
pub struct Session {
    orders: Vec<Order>,
    label_variant: LabelVariant,
    labels: Option<Artifact>,
    gift_notes: Option<Artifact>,
}

impl Session {
    pub fn new(label_variant: LabelVariant) -> Self {
        Self {
            label_variant,
            ..Self::default()
        }
    }

    /// Replace the order set with a new batch, discarding both artifacts.
    pub fn load(&mut self, batch: BatchOutput) {
        self.orders = batch.orders;
        self.labels = None;
        self.gift_notes = None;
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn line_items(&self) -> Vec<LineItem<'_>> {
        line_items(&self.orders)
    }

    pub fn labels(&self) -> Option<&Artifact> {
        self.labels.as_ref()
    }

    pub fn gift_notes(&self) -> Option<&Artifact> {
        self.gift_notes.as_ref()
    }

    /// Render one label per selected line item.
    ///
    /// Returns `Ok(None)` and leaves the slot alone when nothing is selected.
    pub fn generate_labels(
        &mut self,
        renderer: &dyn Renderer,
        selection: &Selection,
    ) -> Result<Option<&Artifact>, PackslipError> {
        let variant = self.label_variant;
        let pages: Vec<Page> = self
            .selected(selection)
            .iter()
            .map(|row| compose_label(row.item, row.order, row.position, row.count, variant))
            .collect();
        let artifact = render_artifact(renderer, ArtifactKind::ManufacturingLabels, &pages)?;
        if let Some(artifact) = artifact {
            self.labels = Some(artifact);
            return Ok(self.labels.as_ref());
        }
        Ok(None)
    }

    /// Render one gift note per selected line item that carries a message.
    ///
    /// Returns `Ok(None)` and leaves the slot alone when no selected item
    /// has a gift message.
    pub fn generate_gift_notes(
        &mut self,
        renderer: &dyn Renderer,
        selection: &Selection,
    ) -> Result<Option<&Artifact>, PackslipError> {
        let pages: Vec<Page> = self
            .selected(selection)
            .iter()
            .filter(|row| row.item.has_gift_message())
            .map(|row| {
                compose_gift_note(
                    &row.order.order_id,
                    &row.order.buyer_name,
                    &row.item.gift_message,
                )
            })
            .collect();
        let artifact = render_artifact(renderer, ArtifactKind::GiftNotes, &pages)?;
        if let Some(artifact) = artifact {
            self.gift_notes = Some(artifact);
            return Ok(self.gift_notes.as_ref());
        }
        Ok(None)
    }

    fn selected(&self, selection: &Selection) -> Vec<LineItem<'_>> {
        let rows = line_items(&self.orders);
        selection
            .to_indices(rows.len())
            .into_iter()
            .map(|i| rows[i])
            .collect()
    }
}

fn render_artifact(
    renderer: &dyn Renderer,
    kind: ArtifactKind,
    pages: &[Page],
) -> Result<Option<Artifact>, PackslipError> {
    if pages.is_empty() {
        info!("No pages for {:?}; nothing rendered", kind);
        return Ok(None);
    }
    let bytes = renderer.render(pages)?;
    info!("Generated {:?}: {} pages", kind, pages.len());
    Ok(Some(Artifact {
        kind,
        page_count: pages.len(),
        bytes,
        extension: renderer.extension(),
    }))
}

/// Write `bytes` to `path` atomically: a temp file in the same directory is
/// written, flushed, then renamed over the target.
pub fn write_artifact(path: impl AsRef<Path>, bytes: &[u8]) -> Result<(), PackslipError> {
    let path = path.as_ref();
    let write_failed = |source: std::io::Error| PackslipError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(write_failed)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_failed)?;
    tmp.write_all(bytes).map_err(write_failed)?;
    tmp.flush().map_err(write_failed)?;
    tmp.persist(path).map_err(|e| write_failed(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Item, ProductType};
    use crate::output::BatchStats;
    use crate::render::JsonRenderer;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn item(gift: &str) -> Item {
        Item {
            sku: "TWL-HT-2Pcs-Red".into(),
            product_type: ProductType::HandTowelPair,
            towel_color: "Red".into(),
            quantity: 1,
            font: String::new(),
            font_color: "White".into(),
            customizations: vec![],
            gift_message: gift.into(),
        }
    }

    fn batch(items: Vec<Item>) -> BatchOutput {
        BatchOutput {
            orders: vec![Order {
                order_id: "9-9".into(),
                buyer_name: "Kim".into(),
                items,
                ..Order::default()
            }],
            documents: vec![],
            stats: BatchStats::default(),
        }
    }

    struct FailingRenderer;

    impl Renderer for FailingRenderer {
        fn render(&self, _pages: &[Page]) -> Result<Vec<u8>, PackslipError> {
            Err(PackslipError::RenderFailed {
                kind: "test".into(),
                detail: "boom".into(),
            })
        }
        fn extension(&self) -> &'static str {
            "pdf"
        }
    }

    struct FlagRenderer(AtomicBool);

    impl Renderer for FlagRenderer {
        fn render(&self, _pages: &[Page]) -> Result<Vec<u8>, PackslipError> {
            self.0.store(true, Ordering::SeqCst);
            Ok(vec![])
        }
        fn extension(&self) -> &'static str {
            "pdf"
        }
    }

    #[test]
    fn labels_cover_every_item_notes_only_gifts() {
        let mut session = Session::default();
        session.load(batch(vec![item("Love you"), item(""), item("Cheers")]));

        let labels = session
            .generate_labels(&JsonRenderer, &Selection::All)
            .unwrap()
            .unwrap();
        assert_eq!(labels.page_count, 3);
        assert_eq!(labels.file_name(), "all_manufacturing_labels.json");

        let notes = session
            .generate_gift_notes(&JsonRenderer, &Selection::All)
            .unwrap()
            .unwrap();
        assert_eq!(notes.page_count, 2);
        assert_eq!(notes.file_name(), "all_gift_notes.json");
    }

    #[test]
    fn selection_limits_rows() {
        let mut session = Session::default();
        session.load(batch(vec![item("a"), item(""), item("c")]));
        let notes = session
            .generate_gift_notes(&JsonRenderer, &Selection::Range(1, 2))
            .unwrap()
            .unwrap();
        assert_eq!(notes.page_count, 1);
    }

    #[test]
    fn nothing_eligible_renders_nothing() {
        let mut session = Session::default();
        session.load(batch(vec![item("")]));
        let renderer = FlagRenderer(AtomicBool::new(false));
        assert!(session
            .generate_gift_notes(&renderer, &Selection::All)
            .unwrap()
            .is_none());
        assert!(!renderer.0.load(Ordering::SeqCst));
        assert!(session.gift_notes().is_none());
    }

    #[test]
    fn failed_render_keeps_previous_artifact() {
        let mut session = Session::default();
        session.load(batch(vec![item("")]));
        session.generate_labels(&JsonRenderer, &Selection::All).unwrap();

        let err = session
            .generate_labels(&FailingRenderer, &Selection::All)
            .unwrap_err();
        assert!(matches!(err, PackslipError::RenderFailed { .. }));
        assert_eq!(session.labels().unwrap().extension, "json");
    }

    #[test]
    fn load_clears_both_slots() {
        let mut session = Session::default();
        session.load(batch(vec![item("x")]));
        session.generate_labels(&JsonRenderer, &Selection::All).unwrap();
        session.generate_gift_notes(&JsonRenderer, &Selection::All).unwrap();
        assert!(session.labels().is_some() && session.gift_notes().is_some());

        session.load(batch(vec![item("")]));
        assert!(session.labels().is_none());
        assert!(session.gift_notes().is_none());
        assert_eq!(session.orders().len(), 1);
    }

    #[test]
    fn write_artifact_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("labels.pdf");
        write_artifact(&path, b"first").unwrap();
        write_artifact(&path, b"second").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        assert_eq!(std::fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
    }
}
