//! Manufacturing plan: what the production floor has to make.
//!
//! Everything is counted in production units. A 6-pc set is produced as two
//! 3-pc sets, so it counts double; every other product counts its ordered
//! quantity.

use crate::model::{LineItem, ProductType};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

/// Units and line items for one key (thread color, towel color, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub name: String,
    pub units: u32,
    pub line_items: usize,
}

/// Per product type counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductTally {
    pub product_type: ProductType,
    /// Quantity as ordered by buyers.
    pub ordered: u32,
    /// Quantity after 6-pc sets are doubled.
    pub units: u32,
    pub line_items: usize,
}

/// Units by towel color (rows) and thread color (columns).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColorMatrix {
    /// Towel colors, sorted.
    pub rows: Vec<String>,
    /// Thread colors, sorted.
    pub columns: Vec<String>,
    /// `cells[r][c]` = units of towel color `rows[r]` in thread `columns[c]`.
    pub cells: Vec<Vec<u32>>,
    pub row_totals: Vec<u32>,
    pub column_totals: Vec<u32>,
    pub grand_total: u32,
}

impl ColorMatrix {
    pub fn get(&self, towel: &str, thread: &str) -> u32 {
        let r = self.rows.iter().position(|x| x == towel);
        let c = self.columns.iter().position(|x| x == thread);
        match (r, c) {
            (Some(r), Some(c)) => self.cells[r][c],
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlanTotals {
    /// Distinct order ids.
    pub orders: usize,
    pub line_items: usize,
    pub units: u32,
    /// Line items carrying a gift message.
    pub gift_notes: usize,
}

/// Aggregated production requirements for a record set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductionPlan {
    pub totals: PlanTotals,
    pub by_thread_color: Vec<Tally>,
    pub by_towel_color: Vec<Tally>,
    pub by_product_type: Vec<ProductTally>,
    pub matrix: ColorMatrix,
}

/// Placeholder key for a blank color field.
const UNSPECIFIED: &str = "(unspecified)";

fn key(value: &str) -> String {
    if value.is_empty() {
        UNSPECIFIED.to_string()
    } else {
        value.to_string()
    }
}

impl ProductionPlan {
    pub fn from_line_items(rows: &[LineItem<'_>]) -> Self {
        let mut order_ids = BTreeSet::new();
        let mut threads: HashMap<String, (u32, usize)> = HashMap::new();
        let mut towels: HashMap<String, (u32, usize)> = HashMap::new();
        let mut products: BTreeMap<ProductType, (u32, u32, usize)> = BTreeMap::new();
        let mut matrix: BTreeMap<String, BTreeMap<String, u32>> = BTreeMap::new();
        let mut thread_keys = BTreeSet::new();
        let mut totals = PlanTotals::default();

        for row in rows {
            let item = row.item;
            let units = item.product_type.production_units(item.quantity);
            let thread = key(&item.font_color);
            let towel = key(&item.towel_color);

            order_ids.insert(row.order.order_id.as_str());
            totals.line_items += 1;
            totals.units = totals.units.saturating_add(units);
            if item.has_gift_message() {
                totals.gift_notes += 1;
            }

            let t = threads.entry(thread.clone()).or_default();
            t.0 = t.0.saturating_add(units);
            t.1 += 1;
            let t = towels.entry(towel.clone()).or_default();
            t.0 = t.0.saturating_add(units);
            t.1 += 1;
            let p = products.entry(item.product_type).or_default();
            p.0 = p.0.saturating_add(item.quantity);
            p.1 = p.1.saturating_add(units);
            p.2 += 1;

            let cell = matrix
                .entry(towel)
                .or_default()
                .entry(thread.clone())
                .or_default();
            *cell = cell.saturating_add(units);
            thread_keys.insert(thread);
        }
        totals.orders = order_ids.len();

        Self {
            totals,
            by_thread_color: ranked(threads),
            by_towel_color: ranked(towels),
            by_product_type: products
                .into_iter()
                .map(|(product_type, (ordered, units, line_items))| ProductTally {
                    product_type,
                    ordered,
                    units,
                    line_items,
                })
                .collect(),
            matrix: build_matrix(matrix, thread_keys.into_iter().collect()),
        }
    }
}

/// Units descending, then name.
fn ranked(counts: HashMap<String, (u32, usize)>) -> Vec<Tally> {
    let mut tallies: Vec<Tally> = counts
        .into_iter()
        .map(|(name, (units, line_items))| Tally {
            name,
            units,
            line_items,
        })
        .collect();
    tallies.sort_by(|a, b| b.units.cmp(&a.units).then_with(|| a.name.cmp(&b.name)));
    tallies
}

/// Unit counts come from slip text; clamp instead of overflowing.
pub fn saturating_sum(values: impl IntoIterator<Item = u32>) -> u32 {
    values.into_iter().fold(0, u32::saturating_add)
}

fn build_matrix(sparse: BTreeMap<String, BTreeMap<String, u32>>, columns: Vec<String>) -> ColorMatrix {
    let mut rows = Vec::with_capacity(sparse.len());
    let mut cells = Vec::with_capacity(sparse.len());
    for (towel, by_thread) in sparse {
        cells.push(
            columns
                .iter()
                .map(|c| by_thread.get(c).copied().unwrap_or(0))
                .collect::<Vec<_>>(),
        );
        rows.push(towel);
    }
    let row_totals: Vec<u32> = cells.iter().map(|r| saturating_sum(r.iter().copied())).collect();
    let column_totals: Vec<u32> = (0..columns.len())
        .map(|c| saturating_sum(cells.iter().map(|r| r[c])))
        .collect();
    ColorMatrix {
        grand_total: saturating_sum(row_totals.iter().copied()),
        rows,
        columns,
        cells,
        row_totals,
        column_totals,
    }
}

impl fmt::Display for ProductionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.totals;
        writeln!(f, "MANUFACTURING PLAN")?;
        writeln!(
            f,
            "  {} orders, {} line items, {} units, {} gift notes",
            t.orders, t.line_items, t.units, t.gift_notes
        )?;

        writeln!(f, "\nBy product type:")?;
        for p in &self.by_product_type {
            writeln!(
                f,
                "  {:<32} ordered {:>4}  units {:>4}  items {:>4}",
                p.product_type.label(),
                p.ordered,
                p.units,
                p.line_items
            )?;
        }

        for (title, tallies) in [
            ("By thread color:", &self.by_thread_color),
            ("By towel color:", &self.by_towel_color),
        ] {
            writeln!(f, "\n{title}")?;
            for tally in tallies {
                writeln!(
                    f,
                    "  {:<24} units {:>4}  items {:>4}",
                    tally.name, tally.units, tally.line_items
                )?;
            }
        }

        let m = &self.matrix;
        if m.rows.is_empty() {
            return Ok(());
        }
        let width = m
            .rows
            .iter()
            .chain(m.columns.iter())
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0)
            .max(5);
        writeln!(f, "\nTowel color x thread color:")?;
        write!(f, "  {:<width$}", "")?;
        for c in &m.columns {
            write!(f, " {c:>width$}")?;
        }
        writeln!(f, " {:>width$}", "Total")?;
        for (r, towel) in m.rows.iter().enumerate() {
            write!(f, "  {towel:<width$}")?;
            for v in &m.cells[r] {
                write!(f, " {v:>width$}")?;
            }
            writeln!(f, " {:>width$}", m.row_totals[r])?;
        }
        write!(f, "  {:<width$}", "Total")?;
        for v in &m.column_totals {
            write!(f, " {v:>width$}")?;
        }
        writeln!(f, " {:>width$}", m.grand_total)
    }
}
