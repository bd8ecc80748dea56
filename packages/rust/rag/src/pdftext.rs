//! PDF text extraction.
//!
//! Each PDF becomes one text unit. Paths missing from local storage are
//! skipped with a warning so a partially-available document set still
//! produces a usable corpus; a file that exists but yields no extractable
//! text stays in the corpus as an empty unit (the index builder uses that
//! distinction for its empty-corpus check).

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Extracted text of one document.
#[derive(Debug, Clone)]
pub struct DocText {
    /// Source file the text came from.
    pub source: PathBuf,
    /// Extracted text; empty when extraction produced nothing.
    pub text: String,
}

/// Load extractable text from each path that exists on local storage.
///
/// The returned list has one entry per *present* file, in input order.
pub fn load_documents(paths: &[PathBuf]) -> Vec<DocText> {
    let mut docs = Vec::new();

    for path in paths {
        if !path.exists() {
            warn!(path = %path.display(), "file not found, skipping");
            continue;
        }

        let text = extract_text(path);
        debug!(path = %path.display(), chars = text.len(), "extracted text");
        docs.push(DocText {
            source: path.clone(),
            text,
        });
    }

    docs
}

/// Extract a PDF's text, treating extraction failure as an empty unit.
fn extract_text(path: &Path) -> String {
    match pdf_extract::extract_text(path) {
        Ok(text) => text,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "text extraction failed");
            String::new()
        }
    }
}
