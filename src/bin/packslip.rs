//! CLI binary for packslip-labels.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `PackslipConfig`, prints the parsed records and writes the artifacts.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use packslip_labels::plan::saturating_sum;
use packslip_labels::{
    line_items, parse_documents, to_csv, to_xlsx, write_artifact, Artifact, BatchOutput,
    BatchProgressCallback, JsonRenderer, LabelVariant, LineItem, PackslipConfig, PdfRenderer,
    ProductionPlan, ProgressCallback, Renderer, Selection, Session,
};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar over the documents in the batch and
/// a log line per document.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:32.green/238}] {pos:>3}/{len} documents  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        let bar = ProgressBar::new(0);
        bar.set_style(style);
        bar.set_prefix("Parsing");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }
}

impl BatchProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total_documents: usize) {
        self.bar.set_length(total_documents as u64);
    }

    fn on_document_start(&self, _index: usize, _total: usize, name: &str) {
        self.bar.set_message(name.to_string());
    }

    fn on_document_complete(&self, index: usize, total: usize, orders: usize, items: usize) {
        self.bar.println(format!(
            "  {} Document {:>2}/{:<2}  {}",
            green("✓"),
            index,
            total,
            dim(&format!("{orders} orders, {items} items")),
        ));
        self.bar.inc(1);
    }

    fn on_document_error(&self, index: usize, total: usize, error: &str) {
        let first_line = error.lines().next().unwrap_or(error);
        self.bar.println(format!(
            "  {} Document {:>2}/{:<2}  {}",
            red("✗"),
            index,
            total,
            red(first_line),
        ));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, total: usize, succeeded: usize) {
        self.bar.finish_and_clear();
        let failed = total.saturating_sub(succeeded);
        if failed == 0 {
            eprintln!("{} {} documents parsed", green("✔"), bold(&succeeded.to_string()));
        } else {
            eprintln!(
                "{} {}/{} documents parsed  ({} failed)",
                if failed == total { red("✘") } else { cyan("⚠") },
                bold(&succeeded.to_string()),
                total,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Parse slips, print the records, write labels and gift notes to ./out
  packslip slips.pdf

  # Several uploads at once, labels with the FONT row
  packslip --variant with-font monday.pdf tuesday.pdf

  # Only the first ten line items, plus a spreadsheet
  packslip --items 1-10 --xlsx orders.xlsx slips.pdf

  # Production planning only
  packslip --plan --no-labels --no-gift-notes slips.pdf

  # No libpdfium: feed pdftotext output and inspect the draw lists
  pdftotext -layout slips.pdf slips.txt
  packslip --format json slips.txt

OUTPUT FILES (in --out-dir):
  all_manufacturing_labels.pdf   one 6x4in label per line item
  all_gift_notes.pdf             one 6x4in note per item with a gift message

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH   Directory containing libpdfium
  RUST_LOG          Override the log filter (e.g. packslip_labels=debug)
"#;

/// Parse packing slips and generate manufacturing labels and gift notes.
#[derive(Parser, Debug)]
#[command(
    name = "packslip",
    version,
    about = "Parse packing-slip PDFs and generate manufacturing labels and gift notes",
    long_about = "Parse marketplace packing-slip PDFs (or pdftotext dumps) for personalised \
towel orders, then lay out one 6x4in manufacturing label per line item and one gift note \
per item that carries a gift message.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Packing-slip PDFs or text dumps (pages separated by form feeds).
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory for the generated label and gift-note files.
    #[arg(short, long, env = "PACKSLIP_OUT_DIR", default_value = "out")]
    out_dir: PathBuf,

    /// Label layout: standard, or with-font to add a FONT row.
    #[arg(long, env = "PACKSLIP_VARIANT", value_enum, default_value = "standard")]
    variant: VariantArg,

    /// Pages of each document to parse: all, 5, 3-15, or 1,3,5,7.
    #[arg(long, default_value = "all")]
    pages: String,

    /// Line items (1-indexed rows of the record table) to list and print
    /// artifacts for: all, 5, 3-15, or 1,3,5,7.
    #[arg(long, default_value = "all")]
    items: String,

    /// Do not generate manufacturing labels.
    #[arg(long)]
    no_labels: bool,

    /// Do not generate gift notes.
    #[arg(long)]
    no_gift_notes: bool,

    /// Export the record table as CSV to this path.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Export the record table as an Excel workbook to this path.
    #[arg(long)]
    xlsx: Option<PathBuf>,

    /// Print the manufacturing plan (units by color, thread and product).
    #[arg(long)]
    plan: bool,

    /// Print the parsed orders as JSON instead of a table.
    #[arg(long)]
    json: bool,

    /// Artifact format: pdf, or json draw lists (no libpdfium needed).
    #[arg(long, value_enum, default_value = "pdf")]
    format: FormatArg,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PACKSLIP_PASSWORD")]
    password: Option<String>,

    /// Directory containing libpdfium.
    #[arg(long, env = "PDFIUM_LIB_PATH")]
    pdfium_lib: Option<PathBuf>,

    /// Disable progress bar.
    #[arg(long, env = "PACKSLIP_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PACKSLIP_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PACKSLIP_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum VariantArg {
    Standard,
    WithFont,
}

impl From<VariantArg> for LabelVariant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::Standard => LabelVariant::Standard,
            VariantArg::WithFont => LabelVariant::WithFont,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Pdf,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO logs; --verbose brings everything back.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // ── Parse ────────────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn BatchProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb)?;
    let items = parse_selection(&cli.items).context("Invalid --items")?;

    let batch = parse_documents(&cli.inputs, &config).context("Parsing failed")?;
    report_failures(&cli, &batch);

    if batch.is_empty() {
        if !cli.quiet {
            eprintln!("{} No orders found in the uploaded documents.", cyan("ℹ"));
        }
        return Ok(());
    }

    // ── Report ───────────────────────────────────────────────────────────
    let rows = line_items(&batch.orders);
    if cli.json {
        let json =
            serde_json::to_string_pretty(&batch.orders).context("Failed to serialise orders")?;
        println!("{json}");
    } else if !cli.quiet {
        print_records(&rows, &items);
    }

    if cli.plan {
        let plan = ProductionPlan::from_line_items(&rows);
        write_plan(&cli, &plan, &mut std::io::stdout(), &mut std::io::stderr())
            .context("Failed to print the plan")?;
    }

    // ── Exports ──────────────────────────────────────────────────────────
    if let Some(ref path) = cli.csv {
        let bytes = to_csv(&rows)?;
        write_artifact(path, &bytes)?;
        note(&cli, &format!("CSV       → {}", path.display()));
    }
    if let Some(ref path) = cli.xlsx {
        let bytes = to_xlsx(&rows)?;
        write_artifact(path, &bytes)?;
        note(&cli, &format!("XLSX      → {}", path.display()));
    }

    // ── Artifacts ────────────────────────────────────────────────────────
    let renderer: Box<dyn Renderer> = match cli.format {
        FormatArg::Pdf => Box::new(PdfRenderer::new(cli.pdfium_lib.clone())),
        FormatArg::Json => Box::new(JsonRenderer),
    };
    let mut session = Session::new(config.label_variant);
    session.load(batch);

    if !cli.no_labels {
        let labels = session
            .generate_labels(renderer.as_ref(), &items)
            .context("Label generation failed")?;
        save(&cli, labels, "labels")?;
    }
    if !cli.no_gift_notes {
        let notes = session
            .generate_gift_notes(renderer.as_ref(), &items)
            .context("Gift note generation failed")?;
        save(&cli, notes, "gift notes")?;
    }

    Ok(())
}

/// Map CLI args to `PackslipConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<PackslipConfig> {
    let pages = parse_selection(&cli.pages).context("Invalid --pages")?;

    let mut builder = PackslipConfig::builder()
        .pages(pages)
        .label_variant(cli.variant.into());

    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd.clone());
    }
    if let Some(ref dir) = cli.pdfium_lib {
        builder = builder.pdfium_library(dir.clone());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Parse a selection string: all, 5, 3-15, or 1,3,5,7.
fn parse_selection(s: &str) -> Result<Selection> {
    Ok(s.parse::<Selection>()?)
}

/// Print the plan as text. With `--json` stdout carries only the orders,
/// so the plan goes to `err` instead.
fn write_plan(
    cli: &Cli,
    plan: &ProductionPlan,
    out: &mut impl Write,
    err: &mut impl Write,
) -> std::io::Result<()> {
    let target: &mut dyn Write = if cli.json { err } else { out };
    writeln!(target, "\n{plan}")
}

fn note(cli: &Cli, msg: &str) {
    if !cli.quiet {
        eprintln!("{} {}", green("✔"), msg);
    }
}

fn report_failures(cli: &Cli, batch: &BatchOutput) {
    // With the bar active the callback already printed each failure.
    if cli.quiet || (!cli.no_progress && !cli.json) {
        return;
    }
    for doc in batch.failures() {
        if let Some(ref e) = doc.error {
            eprintln!("{} {}: {}", red("✗"), doc.name, e);
        }
    }
}

fn save(cli: &Cli, artifact: Option<&Artifact>, what: &str) -> Result<()> {
    let Some(artifact) = artifact else {
        note(cli, &format!("No {what} to generate"));
        return Ok(());
    };
    let path = cli.out_dir.join(artifact.file_name());
    write_artifact(&path, &artifact.bytes)?;
    note(
        cli,
        &format!(
            "{:<9} → {}  {}",
            what,
            bold(&path.display().to_string()),
            dim(&format!("{} pages", artifact.page_count)),
        ),
    );
    Ok(())
}

/// Print the selected rows of the flattened record set as a table.
fn print_records(rows: &[LineItem<'_>], selection: &Selection) {
    println!(
        "{}",
        bold(&format!(
            "{:>3}  {:<20} {:<20} {:<22} {:<12} {:>3}  {:<12} {:<4}",
            "#", "Order ID", "Buyer", "Product", "Color", "Qty", "Thread", "Gift"
        ))
    );
    for idx in selection.to_indices(rows.len()) {
        let row = &rows[idx];
        let (order, item) = (row.order, row.item);
        println!(
            "{:>3}  {:<20} {:<20} {:<22} {:<12} {:>3}  {:<12} {:<4}",
            idx + 1,
            clip(&order.order_id, 20),
            clip(&order.buyer_name, 20),
            clip(item.product_type.label(), 22),
            clip(&item.towel_color, 12),
            item.quantity,
            clip(&item.font_color, 12),
            if item.has_gift_message() { "YES" } else { "" },
        );
    }
    let total_units = saturating_sum(
        rows.iter()
            .map(|r| r.item.product_type.production_units(r.item.quantity)),
    );
    println!(
        "{}",
        dim(&format!("{} line items, {} production units", rows.len(), total_units))
    );
}

/// Truncate to `max` characters, marking the cut with an ellipsis.
fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
