// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Reading a directory of plain-text documents.
//!
//! Files are listed, sorted by name and numbered; that order is the doc id
//! order, so two builds over the same directory agree on every id. Reading is
//! parallel. A file that cannot be read is logged and skipped; it keeps its id
//! slot so the ids of the other files do not shift.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use indicatif::ProgressBar;
use rayon::prelude::*;
use tracing::warn;

use crate::error::{Error, Result};
use crate::types::{DocId, Document};

/// A file that was listed but could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct LoadedDocuments {
    pub docs: Vec<Document>,
    pub skipped: Vec<SkippedFile>,
}

/// Regular files directly inside `dir`, sorted by file name.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| Error::InputDirectory {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Error::InputDirectory {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Display name used for a document: its file name.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn load_documents(dir: &Path) -> Result<LoadedDocuments> {
    load_documents_with_progress(dir, &ProgressBar::hidden())
}

/// Load every listed file in parallel, ticking `progress` once per file.
pub fn load_documents_with_progress(dir: &Path, progress: &ProgressBar) -> Result<LoadedDocuments> {
    let files = list_files(dir)?;
    let total = files.len();
    progress.set_length(total as u64);
    let counter = AtomicUsize::new(0);

    let results: Vec<std::result::Result<Document, SkippedFile>> = files
        .par_iter()
        .enumerate()
        .map(|(i, path)| {
            let loaded = fs::read_to_string(path)
                .map(|text| Document::new(DocId(i as u32), display_name(path), &text))
                .map_err(|e| {
                    warn!(path = %path.display(), error = %e, "skipping unreadable file");
                    SkippedFile {
                        path: path.clone(),
                        reason: e.to_string(),
                    }
                });

            let count = counter.fetch_add(1, Ordering::Relaxed) + 1;
            progress.set_position(count as u64);
            if count % 10 == 0 || count == total {
                progress.set_message(format!("{}/{}", count, total));
            }
            loaded
        })
        .collect();

    let mut loaded = LoadedDocuments::default();
    for result in results {
        match result {
            Ok(doc) => loaded.docs.push(doc),
            Err(skipped) => loaded.skipped.push(skipped),
        }
    }
    Ok(loaded)
}
