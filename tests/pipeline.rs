//! Integration tests over plain-text slip dumps.
//!
//! Text dumps go through the same assembly, layout, and export code as PDFs
//! and need no native library, so these run everywhere. Rendering uses
//! [`JsonRenderer`] for the same reason.
//!
//! Run with:
//!   cargo test --test pipeline

use packslip_labels::layout::LabelGeometry;
use packslip_labels::{
    compose_label, parse_documents, to_csv, DocumentError, JsonRenderer, LabelVariant,
    PackslipConfig, PackslipError, ProductType, ProductionPlan, Selection, Session,
};
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Two orders across three pages; the second order continues onto page 3.
const PAGE_1: &str = "Order ID: 111-2223334\n\
    Order Date: Jan 1 2024\n\
    Shipping Service: Standard\n\
    Ship To:\nJane Doe\n\
    Quantity 2\n\
    SKU: TWL-Set-3Pcs-Blue\n\
    Choose Your Font: Script\n\
    Font Color: Gold (#FFD700)\n\
    Washcloth: Hello\n\
    Hand Towel: World\n\
    Bath Towel: Again\n\
    Gift Message: Happy birthday, Jane!\n";

const PAGE_2: &str = "Order ID: 222-3334445\n\
    Order Date: Jan 2 2024\n\
    Shipping Service: Expedited\n\
    Ship To:\nSam Lee\n\
    Quantity 1\n\
    SKU: TWL-BS-1Pcs-White\n\
    Font Color: Navy\n\
    Oversized Bath Sheet: Lee\n";

const PAGE_3: &str = "Quantity 3\n\
    SKU: TWL-HT-2Pcs-Sage\n\
    Font Color: Navy\n\
    First Hand Towel: S\n\
    Second Hand Towel: L\n";

/// Write pages as a form-feed separated dump, like `pdftotext` output.
fn dump(dir: &Path, name: &str, pages: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(pages.join("\u{c}").as_bytes()).unwrap();
    path
}

fn load(paths: &[PathBuf]) -> Session {
    let config = PackslipConfig::default();
    let batch = parse_documents(paths, &config).unwrap();
    let mut session = Session::new(config.label_variant);
    session.load(batch);
    session
}

fn rendered_pages(bytes: &[u8]) -> Vec<Value> {
    match serde_json::from_slice(bytes).unwrap() {
        Value::Array(pages) => pages,
        other => panic!("expected an array of pages, got {other}"),
    }
}

fn page_texts(page: &Value) -> Vec<String> {
    page["ops"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|op| op["op"] == "text")
        .map(|op| op["text"].as_str().unwrap().to_string())
        .collect()
}

// ── Parsing ──────────────────────────────────────────────────────────────────

#[test]
fn slips_become_orders_and_line_items() {
    let dir = tempfile::tempdir().unwrap();
    let path = dump(dir.path(), "slips.txt", &[PAGE_1, PAGE_2, PAGE_3]);
    let session = load(&[path]);

    let orders = session.orders();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].buyer_name, "Jane Doe");
    assert_eq!(orders[1].items.len(), 2, "page 3 continues order 2");

    let rows = session.line_items();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].item.product_type, ProductType::ThreePieceSet);
    assert_eq!(rows[0].item.font_color, "Gold");
    assert_eq!(rows[1].item.product_type, ProductType::BathSheet);
    assert_eq!(rows[2].item.quantity, 3);
    assert_eq!((rows[2].position, rows[2].count), (2, 2));
}

#[test]
fn one_bad_document_does_not_sink_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let good = dump(dir.path(), "good.txt", &[PAGE_1]);
    let missing = dir.path().join("missing.pdf");

    let batch = parse_documents(&[good, missing], &PackslipConfig::default()).unwrap();
    assert_eq!(batch.orders.len(), 1);
    assert_eq!(batch.stats.total_documents, 2);
    assert_eq!(batch.stats.failed_documents, 1);

    let failures: Vec<_> = batch.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].name, "missing.pdf");
    assert!(matches!(
        failures[0].error,
        Some(DocumentError::FileNotFound { .. })
    ));
}

#[test]
fn every_document_failing_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = parse_documents(
        &[dir.path().join("a.pdf"), dir.path().join("b.pdf")],
        &PackslipConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, PackslipError::AllDocumentsFailed { total: 2, .. }));
}

// ── Artifacts ────────────────────────────────────────────────────────────────

#[test]
fn labels_and_gift_notes_from_one_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dump(dir.path(), "slips.txt", &[PAGE_1, PAGE_2, PAGE_3]);
    let mut session = load(&[path]);

    let labels = session
        .generate_labels(&JsonRenderer, &Selection::All)
        .unwrap()
        .unwrap();
    assert_eq!(labels.page_count, 3);
    let pages = rendered_pages(&labels.bytes);
    assert_eq!(pages.len(), 3);

    let first = page_texts(&pages[0]);
    assert!(first.contains(&"Jane Doe".to_string()));
    assert!(first.contains(&"QTY: 2".to_string()));
    assert!(first.contains(&"GIFT NOTE: YES".to_string()));
    assert!(!first.iter().any(|t| t.contains(" of ")), "single-item order has no badge");

    let third = page_texts(&pages[2]);
    assert!(third.contains(&"[2 of 2]".to_string()));
    assert!(third.contains(&"SAGE".to_string()));

    let notes = session
        .generate_gift_notes(&JsonRenderer, &Selection::All)
        .unwrap()
        .unwrap();
    assert_eq!(notes.page_count, 1);
    let note = page_texts(&rendered_pages(&notes.bytes)[0]).join("\n");
    assert!(note.contains("Happy birthday, Jane!"));
}

#[test]
fn selected_rows_without_gifts_yield_no_note_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dump(dir.path(), "slips.txt", &[PAGE_1, PAGE_2, PAGE_3]);
    let mut session = load(&[path]);

    let notes = session
        .generate_gift_notes(&JsonRenderer, &Selection::Range(2, 3))
        .unwrap();
    assert!(notes.is_none());
    assert!(session.gift_notes().is_none());
}

#[test]
fn artifacts_write_to_their_download_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dump(dir.path(), "slips.txt", &[PAGE_1]);
    let mut session = load(&[path]);

    let labels = session
        .generate_labels(&JsonRenderer, &Selection::All)
        .unwrap()
        .unwrap();
    let out = dir.path().join("out").join(labels.file_name());
    packslip_labels::write_artifact(&out, &labels.bytes).unwrap();

    assert!(out.ends_with("all_manufacturing_labels.json"));
    assert_eq!(std::fs::read(&out).unwrap(), labels.bytes);
}

#[test]
fn personalization_stays_inside_the_content_box() {
    let dir = tempfile::tempdir().unwrap();
    let crowded = "Order ID: 9-9\nShip To:\nMax Crowd\n\
        Quantity 1\nSKU: TWL-Set-6Pcs-Grey\nFont Color: Black\n\
        First Washcloth: One\nSecond Washcloth: Two\n\
        First Hand Towel: Three\nSecond Hand Towel: Four\n\
        First Bath Towel: Five\nSecond Bath Towel: Six\n";
    let path = dump(dir.path(), "crowded.txt", &[crowded]);
    let session = load(&[path]);
    let rows = session.line_items();
    assert_eq!(rows[0].item.customizations.len(), 6);

    let geo = LabelGeometry::new();
    for variant in [LabelVariant::Standard, LabelVariant::WithFont] {
        let page = compose_label(rows[0].item, rows[0].order, 1, 1, variant);
        for op in &page.ops {
            let (Some(left), Some(text)) = (op.left_x(), op.text()) else {
                continue;
            };
            if let packslip_labels::DrawOp::Text { y, .. } = op {
                if *y < geo.divider_y && left >= geo.right_col_left - 0.01 {
                    assert!(
                        *y >= geo.content_bottom,
                        "{text:?} at y={y} is below the box floor"
                    );
                }
            }
        }
    }
}

// ── Export and plan ──────────────────────────────────────────────────────────

#[test]
fn csv_export_lists_every_line_item() {
    let dir = tempfile::tempdir().unwrap();
    let path = dump(dir.path(), "slips.txt", &[PAGE_1, PAGE_2, PAGE_3]);
    let session = load(&[path]);

    let bytes = to_csv(&session.line_items()).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Order ID,Date,Buyer,Shipping,Product Type"));
    assert!(lines[1].starts_with("111-2223334,Jan 1 2024,Jane Doe,Standard,3-pc Set,Blue,2"));
    assert!(lines[1].ends_with(",YES"));
    assert!(lines[3].ends_with(",NO"));
}

#[test]
fn plan_counts_production_units() {
    let dir = tempfile::tempdir().unwrap();
    let path = dump(dir.path(), "slips.txt", &[PAGE_1, PAGE_2, PAGE_3]);
    let session = load(&[path]);

    let plan = ProductionPlan::from_line_items(&session.line_items());
    assert_eq!(plan.totals.orders, 2);
    assert_eq!(plan.totals.line_items, 3);
    assert_eq!(plan.totals.units, 2 + 1 + 3);
    assert_eq!(plan.totals.gift_notes, 1);
    assert_eq!(plan.by_thread_color[0].name, "Navy");
    assert_eq!(plan.matrix.get("Sage", "Navy"), 3);
}
