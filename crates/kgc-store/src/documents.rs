//! Raw corpus loading.
//!
//! A corpus is a directory of `.json` files, each holding an array of
//! crawled documents. Files load in lexicographic name order so a
//! corpus always produces the same document sequence. A path to a
//! single file is accepted too.

use std::fs;
use std::path::Path;

use kgc_core::{KgcError, RawDocument, Result};
use tracing::{debug, info};

/// Load every document under `path`.
pub fn load_documents(path: &Path) -> Result<Vec<RawDocument>> {
    if path.is_file() {
        return load_file(path);
    }
    if !path.is_dir() {
        return Err(KgcError::DocumentLoad(format!(
            "corpus path not found: {}",
            path.display()
        )));
    }

    let mut files: Vec<_> = fs::read_dir(path)
        .map_err(|e| {
            KgcError::DocumentLoad(format!("cannot read corpus dir {}: {e}", path.display()))
        })?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    let mut documents = Vec::new();
    for file in &files {
        let batch = load_file(file)?;
        debug!("loaded {} documents from {}", batch.len(), file.display());
        documents.extend(batch);
    }
    info!(
        "corpus loaded: {} documents from {} files",
        documents.len(),
        files.len()
    );
    Ok(documents)
}

fn load_file(path: &Path) -> Result<Vec<RawDocument>> {
    let text = fs::read_to_string(path)
        .map_err(|e| KgcError::DocumentLoad(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| KgcError::DocumentLoad(format!("invalid JSON in {}: {e}", path.display())))
}

// ============================================================================
// Tests
// ============================================================================
