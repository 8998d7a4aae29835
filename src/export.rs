//! Tabular export of the flattened (order, item) record set.
//!
//! Both formats carry the same columns in the same order:
//!
//! | Column | Source |
//! |--------|--------|
//! | Order ID, Date, Buyer, Shipping | order header |
//! | Product Type, Color, Quantity, Font, Thread Color | item |
//! | Customizations | `slot: text` pairs joined with ` \| ` |
//! | Gift Message | `YES` / `NO` |

use crate::error::PackslipError;
use crate::model::LineItem;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use serde::Serialize;
use tracing::debug;

/// Column headers, in export order.
pub const COLUMNS: [&str; 11] = [
    "Order ID",
    "Date",
    "Buyer",
    "Shipping",
    "Product Type",
    "Color",
    "Quantity",
    "Font",
    "Thread Color",
    "Customizations",
    "Gift Message",
];

const SHEET_NAME: &str = "Orders";
const QUANTITY_COLUMN: usize = 6;

/// One export row. Field order and names must match [`COLUMNS`].
#[derive(Debug, Serialize)]
struct Record<'a> {
    #[serde(rename = "Order ID")]
    order_id: &'a str,
    #[serde(rename = "Date")]
    date: &'a str,
    #[serde(rename = "Buyer")]
    buyer: &'a str,
    #[serde(rename = "Shipping")]
    shipping: &'a str,
    #[serde(rename = "Product Type")]
    product_type: &'static str,
    #[serde(rename = "Color")]
    color: &'a str,
    #[serde(rename = "Quantity")]
    quantity: u32,
    #[serde(rename = "Font")]
    font: &'a str,
    #[serde(rename = "Thread Color")]
    thread_color: &'a str,
    #[serde(rename = "Customizations")]
    customizations: String,
    #[serde(rename = "Gift Message")]
    gift_message: &'static str,
}

impl<'a> Record<'a> {
    fn new(row: &LineItem<'a>) -> Self {
        let (order, item) = (row.order, row.item);
        Self {
            order_id: &order.order_id,
            date: &order.order_date,
            buyer: &order.buyer_name,
            shipping: &order.shipping_service,
            product_type: item.product_type.label(),
            color: &item.towel_color,
            quantity: item.quantity,
            font: &item.font,
            thread_color: &item.font_color,
            customizations: item.customization_summary(),
            gift_message: if item.has_gift_message() { "YES" } else { "NO" },
        }
    }

    /// Text cells in column order, with the quantity rendered as text.
    fn cells(&self) -> [String; 11] {
        [
            self.order_id.to_string(),
            self.date.to_string(),
            self.buyer.to_string(),
            self.shipping.to_string(),
            self.product_type.to_string(),
            self.color.to_string(),
            self.quantity.to_string(),
            self.font.to_string(),
            self.thread_color.to_string(),
            self.customizations.clone(),
            self.gift_message.to_string(),
        ]
    }
}

/// Export rows as comma-separated text with a header line.
pub fn to_csv(rows: &[LineItem<'_>]) -> Result<Vec<u8>, PackslipError> {
    let fail = |detail: String| PackslipError::ExportFailed {
        format: "CSV",
        detail,
    };

    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    if rows.is_empty() {
        // serialize() only emits headers alongside the first record
        writer.write_record(COLUMNS).map_err(|e| fail(e.to_string()))?;
    }
    for row in rows {
        writer
            .serialize(Record::new(row))
            .map_err(|e| fail(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| fail(e.to_string()))?;
    debug!("CSV export: {} rows, {} bytes", rows.len(), bytes.len());
    Ok(bytes)
}

/// Export rows as an `.xlsx` workbook with a single `Orders` sheet.
pub fn to_xlsx(rows: &[LineItem<'_>]) -> Result<Vec<u8>, PackslipError> {
    let bytes = build_workbook(rows).map_err(|e| PackslipError::ExportFailed {
        format: "XLSX",
        detail: e.to_string(),
    })?;
    debug!("XLSX export: {} rows, {} bytes", rows.len(), bytes.len());
    Ok(bytes)
}

fn build_workbook(rows: &[LineItem<'_>]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;
    for (col, title) in COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &header)?;
    }
    sheet.set_freeze_panes(1, 0)?;

    for (idx, row) in rows.iter().enumerate() {
        let r = idx as u32 + 1;
        let record = Record::new(row);
        for (col, cell) in record.cells().iter().enumerate() {
            if col == QUANTITY_COLUMN {
                sheet.write_number(r, col as u16, f64::from(record.quantity))?;
            } else {
                sheet.write_string(r, col as u16, cell)?;
            }
        }
    }
    sheet.autofit();

    workbook.save_to_buffer()
}
