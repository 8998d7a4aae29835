//! Input resolution: validate a user-supplied path and sniff its kind.
//!
//! Two document kinds are accepted: real PDFs (recognised by the `%PDF`
//! magic bytes) and plain UTF-8 text dumps such as `pdftotext` output. We
//! check before handing the file to a text source so the user gets a
//! meaningful per-document error instead of an engine failure.

use crate::error::DocumentError;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// What kind of document a path holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Pdf,
    Text,
}

/// A validated input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInput {
    pub path: PathBuf,
    pub kind: InputKind,
}

impl ResolvedInput {
    /// File name for reports, falling back to the full path.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Sample size used to decide whether a non-PDF file is text.
const SNIFF_BYTES: usize = 4096;

/// Resolve a local path, validating existence, readability and kind.
pub fn resolve_input(path: impl AsRef<Path>) -> Result<ResolvedInput, DocumentError> {
    let path = path.as_ref().to_path_buf();

    if !path.exists() {
        return Err(DocumentError::FileNotFound { path });
    }

    let mut file = match std::fs::File::open(&path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(DocumentError::PermissionDenied { path });
        }
        Err(e) => {
            return Err(DocumentError::ReadFailed {
                path,
                detail: e.to_string(),
            });
        }
    };

    let mut head = Vec::with_capacity(SNIFF_BYTES);
    if let Err(e) = file.by_ref().take(SNIFF_BYTES as u64).read_to_end(&mut head) {
        return Err(DocumentError::ReadFailed {
            path,
            detail: e.to_string(),
        });
    }

    let kind = sniff_kind(&head).ok_or_else(|| DocumentError::Unsupported {
        path: path.clone(),
        detail: "neither a PDF nor UTF-8 text".into(),
    })?;

    debug!("Resolved {:?} input: {}", kind, path.display());
    Ok(ResolvedInput { path, kind })
}

/// Classify the leading bytes of a file.
fn sniff_kind(head: &[u8]) -> Option<InputKind> {
    if head.starts_with(b"%PDF") {
        return Some(InputKind::Pdf);
    }
    match std::str::from_utf8(head) {
        Ok(_) => Some(InputKind::Text),
        // A multi-byte character cut off by the sample boundary is still text.
        Err(e) if e.error_len().is_none() => Some(InputKind::Text),
        Err(_) => None,
    }
}
