//! ZIP bundle writing
//!
//! Bundles are written in memory with stored (uncompressed) entries, so the
//! size accounting used by the batcher tracks the bytes that actually land
//! on disk. Entry names are sanitized for cross-platform extraction and
//! deduplicated within a bundle.

use crate::domain::{DocumentId, Result, SignPackError};
use regex::Regex;
use std::collections::HashSet;
use std::io::{Cursor, Write};
use std::sync::OnceLock;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Fixed per-entry overhead used when estimating bundle size
///
/// Upper-bounds the local file header, central directory record, and a share
/// of the end-of-central-directory record for a stored entry.
pub const ENTRY_OVERHEAD_BYTES: u64 = 128;

/// Estimated on-disk cost of adding one entry to a bundle
///
/// The entry name appears twice in the archive (local header and central
/// directory), hence the doubled name length.
pub fn entry_cost(entry_name: &str, content_len: u64) -> u64 {
    ENTRY_OVERHEAD_BYTES + 2 * entry_name.len() as u64 + content_len
}

fn unsafe_chars_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("static regex"))
}

/// Sanitize a file name for use as a ZIP entry
///
/// Replaces characters that are path separators or reserved on common
/// filesystems with underscores and guarantees a `.pdf` extension.
pub fn sanitize_entry_name(name: &str) -> String {
    let cleaned = unsafe_chars_re().replace_all(name.trim(), "_");
    let cleaned = cleaned.trim_matches(|c: char| c == '.' || c.is_whitespace());

    let base = if cleaned.is_empty() { "document" } else { cleaned };
    if base.to_lowercase().ends_with(".pdf") {
        base.to_string()
    } else {
        format!("{base}.pdf")
    }
}

fn dedup_entry_name(name: &str, used: &HashSet<String>) -> String {
    if !used.contains(name) {
        return name.to_string();
    }

    let (stem, ext) = match name.rfind('.') {
        Some(pos) => (&name[..pos], &name[pos..]),
        None => (name, ""),
    };

    let mut counter = 1;
    loop {
        let candidate = format!("{stem} ({counter}){ext}");
        if !used.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// File name for an archive part
///
/// A single-part export keeps the plain prefix; multi-part exports get a
/// `partNNofMM` suffix.
pub fn bundle_file_name(prefix: &str, index: usize, total: usize) -> String {
    if total <= 1 {
        format!("{prefix}.zip")
    } else {
        format!("{prefix}.part{index:02}of{total:02}.zip")
    }
}

/// A finished archive part
#[derive(Debug, Clone)]
pub struct ArchivePart {
    /// 1-based position in the export
    pub index: usize,
    /// Complete ZIP file bytes
    pub data: Vec<u8>,
    /// Final size of the part
    pub size_bytes: u64,
    /// Documents contained in the part, in packing order
    pub document_ids: Vec<DocumentId>,
    /// True when the part holds a single document larger than the budget
    pub oversized: bool,
}

/// Incrementally builds one ZIP bundle in memory
pub struct BundleWriter {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    used_names: HashSet<String>,
    document_ids: Vec<DocumentId>,
    estimated_bytes: u64,
}

impl BundleWriter {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            used_names: HashSet::new(),
            document_ids: Vec::new(),
            estimated_bytes: 0,
        }
    }

    /// Number of documents added so far
    pub fn len(&self) -> usize {
        self.document_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document_ids.is_empty()
    }

    /// Estimated size of the bundle if finished now
    pub fn estimated_bytes(&self) -> u64 {
        self.estimated_bytes
    }

    /// Add a document to the bundle
    ///
    /// The entry name is sanitized and, if already taken within this bundle,
    /// suffixed with ` (n)` before the extension.
    ///
    /// # Errors
    ///
    /// Returns [`SignPackError::Export`] if the underlying ZIP writer fails.
    pub fn add_document(&mut self, id: &DocumentId, entry_name: &str, content: &[u8]) -> Result<()> {
        let sanitized = sanitize_entry_name(entry_name);
        let final_name = dedup_entry_name(&sanitized, &self.used_names);

        let options: FileOptions<'_, ()> =
            FileOptions::default().compression_method(CompressionMethod::Stored);

        self.writer
            .start_file(&final_name, options)
            .map_err(|e| SignPackError::Export(format!("Failed to start archive entry: {e}")))?;
        self.writer
            .write_all(content)
            .map_err(|e| SignPackError::Export(format!("Failed to write archive entry: {e}")))?;

        self.estimated_bytes += entry_cost(&final_name, content.len() as u64);
        self.used_names.insert(final_name);
        self.document_ids.push(id.clone());

        Ok(())
    }

    /// Finish the bundle and return it as an archive part
    ///
    /// # Errors
    ///
    /// Returns [`SignPackError::Export`] if the central directory cannot be
    /// written.
    pub fn finish(self, index: usize, oversized: bool) -> Result<ArchivePart> {
        let cursor = self
            .writer
            .finish()
            .map_err(|e| SignPackError::Export(format!("Failed to finish archive: {e}")))?;
        let data = cursor.into_inner();
        let size_bytes = data.len() as u64;

        Ok(ArchivePart {
            index,
            data,
            size_bytes,
            document_ids: self.document_ids,
            oversized,
        })
    }
}

impl Default for BundleWriter {
    fn default() -> Self {
        Self::new()
    }
}
