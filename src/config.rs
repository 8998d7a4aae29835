//! Configuration types for parsing and label generation.
//!
//! All batch behaviour is controlled through [`PackslipConfig`], built via
//! its [`PackslipConfigBuilder`]. Set only what you care about; every other
//! knob has a documented default.

use crate::error::PackslipError;
use crate::pipeline::text::PageTextSource;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration for a parsing batch and the labels generated from it.
///
/// # Example
/// ```rust
/// use packslip_labels::{LabelVariant, PackslipConfig, Selection};
///
/// let config = PackslipConfig::builder()
///     .label_variant(LabelVariant::WithFont)
///     .pages(Selection::Range(1, 4))
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Default)]
pub struct PackslipConfig {
    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Pages of each document to parse. Default: all pages.
    pub pages: Selection,

    /// Manufacturing label layout. Default: [`LabelVariant::Standard`].
    pub label_variant: LabelVariant,

    /// Directory holding libpdfium. If None, the working directory and then
    /// the system library path are tried.
    pub pdfium_library: Option<PathBuf>,

    /// Pre-constructed text source. Takes precedence over the automatic
    /// PDF / text-dump choice.
    pub text_source: Option<Arc<dyn PageTextSource>>,

    /// Optional per-document progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl fmt::Debug for PackslipConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackslipConfig")
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("pages", &self.pages)
            .field("label_variant", &self.label_variant)
            .field("pdfium_library", &self.pdfium_library)
            .field(
                "text_source",
                &self.text_source.as_ref().map(|_| "<dyn PageTextSource>"),
            )
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn BatchProgressCallback>"),
            )
            .finish()
    }
}

impl PackslipConfig {
    /// Create a new builder for `PackslipConfig`.
    pub fn builder() -> PackslipConfigBuilder {
        PackslipConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`PackslipConfig`].
#[derive(Debug)]
pub struct PackslipConfigBuilder {
    config: PackslipConfig,
}

impl PackslipConfigBuilder {
    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn pages(mut self, selection: Selection) -> Self {
        self.config.pages = selection;
        self
    }

    pub fn label_variant(mut self, variant: LabelVariant) -> Self {
        self.config.label_variant = variant;
        self
    }

    pub fn pdfium_library(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.pdfium_library = Some(dir.into());
        self
    }

    pub fn text_source(mut self, source: Arc<dyn PageTextSource>) -> Self {
        self.config.text_source = Some(source);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<PackslipConfig, PackslipError> {
        self.config.pages.validate()?;
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Manufacturing label layout.
///
/// | Variant | Left column rows |
/// |---------|------------------|
/// | `Standard` | product type, towel color, thread color |
/// | `WithFont` | product type, towel color, thread color, font |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelVariant {
    #[default]
    Standard,
    WithFont,
}

/// 1-indexed selection of pages (of a document) or rows (of the flattened
/// line-item list).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Everything (default).
    #[default]
    All,
    /// One entry (1-indexed).
    Single(usize),
    /// A contiguous range (1-indexed, inclusive).
    Range(usize, usize),
    /// Specific entries (1-indexed, deduplicated).
    Set(Vec<usize>),
}

impl Selection {
    /// Expand the selection into a sorted, deduplicated list of 0-indexed
    /// positions. Entries past `total` are ignored.
    pub fn to_indices(&self, total: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = match self {
            Selection::All => (0..total).collect(),
            Selection::Single(p) => {
                if *p >= 1 && *p <= total {
                    vec![p - 1]
                } else {
                    vec![]
                }
            }
            Selection::Range(start, end) => {
                let s = (*start).max(1) - 1;
                let e = (*end).min(total);
                (s..e).collect()
            }
            Selection::Set(items) => items
                .iter()
                .filter(|&&p| p >= 1 && p <= total)
                .map(|p| p - 1)
                .collect(),
        };
        indices.sort_unstable();
        indices.dedup();
        indices
    }

    /// Reject selections that can never match anything.
    pub fn validate(&self) -> Result<(), PackslipError> {
        match self {
            Selection::Single(0) => Err(PackslipError::InvalidConfig(
                "Selections are 1-indexed, got 0".into(),
            )),
            Selection::Range(start, end) if start > end => Err(PackslipError::InvalidConfig(
                format!("Invalid range {start}-{end}: start must be <= end"),
            )),
            Selection::Set(items) if items.is_empty() => Err(PackslipError::InvalidConfig(
                "Selection set is empty".into(),
            )),
            _ => Ok(()),
        }
    }
}

impl std::str::FromStr for Selection {
    type Err = PackslipError;

    /// Parse `all`, `5`, `3-15` or `1,3,5,7`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let parse = |p: &str| -> Result<usize, PackslipError> {
            let n: usize = p
                .trim()
                .parse()
                .map_err(|_| PackslipError::InvalidConfig(format!("Invalid number: '{}'", p.trim())))?;
            if n < 1 {
                return Err(PackslipError::InvalidConfig(format!(
                    "Selections are 1-indexed, minimum is 1 (got {n})"
                )));
            }
            Ok(n)
        };

        let selection = if s == "all" {
            Selection::All
        } else if let Some((start, end)) = s.split_once('-') {
            Selection::Range(parse(start)?, parse(end)?)
        } else if s.contains(',') {
            Selection::Set(s.split(',').map(parse).collect::<Result<Vec<_>, _>>()?)
        } else {
            Selection::Single(parse(&s)?)
        };
        selection.validate()?;
        Ok(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_to_indices() {
        assert_eq!(Selection::All.to_indices(5), vec![0, 1, 2, 3, 4]);
        assert_eq!(Selection::Single(3).to_indices(5), vec![2]);
        assert_eq!(Selection::Single(6).to_indices(5), Vec::<usize>::new());
        assert_eq!(Selection::Range(2, 4).to_indices(5), vec![1, 2, 3]);
        assert_eq!(Selection::Range(4, 9).to_indices(5), vec![3, 4]);
        assert_eq!(Selection::Set(vec![3, 1, 3]).to_indices(5), vec![0, 2]);
    }

    #[test]
    fn test_selection_parse() {
        assert_eq!("all".parse::<Selection>().unwrap(), Selection::All);
        assert_eq!(" 5 ".parse::<Selection>().unwrap(), Selection::Single(5));
        assert_eq!("3-15".parse::<Selection>().unwrap(), Selection::Range(3, 15));
        assert_eq!(
            "1,3,5".parse::<Selection>().unwrap(),
            Selection::Set(vec![1, 3, 5])
        );
    }

    #[test]
    fn test_selection_parse_rejects_bad_input() {
        assert!("0".parse::<Selection>().is_err());
        assert!("5-2".parse::<Selection>().is_err());
        assert!("a,b".parse::<Selection>().is_err());
        assert!("".parse::<Selection>().is_err());
    }

    #[test]
    fn test_builder_validates_pages() {
        let err = PackslipConfig::builder()
            .pages(Selection::Range(4, 2))
            .build()
            .unwrap_err();
        assert!(matches!(err, PackslipError::InvalidConfig(_)));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = PackslipConfig::builder().password("hunter2").build().unwrap();
        let dbg = format!("{config:?}");
        assert!(!dbg.contains("hunter2"));
        assert!(dbg.contains("Standard"));
    }
}
