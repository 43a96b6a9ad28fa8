//! Staged file handles and their projection to [`FileMetadata`].
//!
//! A staged file is a live handle held by a draft before submission.
//! On submit only the descriptive tuple (name, type, size, preview)
//! is committed to the entry; the bytes stay wherever they live.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::FileMetadata;

/// A file attached to a draft but not yet committed to an entry.
#[derive(Debug, Clone)]
pub struct StagedFile {
    pub name: String,
    pub content_type: String,
    pub size: u64,
    path: Option<PathBuf>,
}

impl StagedFile {
    /// Stage a file described by a presentation layer that owns the
    /// bytes itself (no backing path).
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            size,
            path: None,
        }
    }

    /// Stage a file from disk: name from the final path component,
    /// size from its metadata, MIME type from its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let meta = fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let resolved = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        Ok(Self {
            name,
            content_type: content_type_for(path).to_string(),
            size: meta.len(),
            path: Some(resolved),
        })
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    /// Project into the persisted metadata tuple. Image files get a
    /// transient preview handle; everything else gets none.
    pub fn to_metadata(&self) -> FileMetadata {
        FileMetadata {
            name: self.name.clone(),
            content_type: self.content_type.clone(),
            size: self.size,
            preview: self.preview_handle(),
        }
    }

    fn preview_handle(&self) -> Option<String> {
        if !self.is_image() {
            return None;
        }
        match &self.path {
            Some(path) => Some(format!("file://{}", path.display())),
            None => Some(format!("staged://{}", self.name)),
        }
    }
}

/// MIME type for a path based on its extension. Unknown extensions
/// fall back to the generic binary type.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("csv") => "text/csv",
        _ => "application/octet-stream",
    }
}
