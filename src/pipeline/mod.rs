//! Pipeline stages for packing-slip parsing.
//!
//! Each submodule implements exactly one transformation step, so each is
//! independently testable and the text backend can be swapped without
//! touching the heuristics.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ text ──▶ assemble ──▶ Vec<Order>
//! (path)   (pages)     │
//!                      ├── extract   (labelled fields)
//!                      └── classify  (SKU → product type + slots)
//! ```
//!
//! 1. [`input`]   : validate the path and sniff PDF vs. text dump
//! 2. [`text`]    : one UTF-8 string per page, normalised
//! 3. [`extract`] : pattern-based single-field scanner
//! 4. [`classify`]: priority-ordered SKU taxonomy
//! 5. [`assemble`]: state machine folding pages into orders

pub mod assemble;
pub mod classify;
pub mod extract;
pub mod input;
pub mod text;
