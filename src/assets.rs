//! Release asset links and local asset discovery.

use crate::error::{ReleaseError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name/URL pair attached to a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLink {
    /// Display name
    pub name: String,
    /// Download location
    pub url: String,
}

impl AssetLink {
    /// Create a new asset link
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Collect the files to upload from `root`
///
/// A regular file yields itself. A directory is walked recursively in
/// lexical order per level; directories themselves and entries whose name
/// starts with a dot are left out, but every directory is descended into.
/// Returned paths keep the form of `root` (relative stays relative).
pub fn resolve_local_assets(root: &Path) -> Result<Vec<PathBuf>> {
    let absolute = std::path::absolute(root).map_err(|e| ReleaseError::Path {
        context: "Get absolute path failed",
        path: root.to_path_buf(),
        source: e,
    })?;

    let metadata = std::fs::metadata(&absolute).map_err(|e| ReleaseError::Path {
        context: "Get file stat failed",
        path: root.to_path_buf(),
        source: e,
    })?;

    if !metadata.is_dir() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            ReleaseError::Path {
                context: "Walk directory failed",
                path,
                source: e.into(),
            }
        })?;

        if entry.file_type().is_dir() || is_hidden(entry.file_name()) {
            continue;
        }
        files.push(entry.into_path());
    }

    log::debug!("Found {} local asset(s) under {}", files.len(), root.display());
    Ok(files)
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}
