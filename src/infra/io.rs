//! File reading tuned for large embedding files.
//!
//! Embedding tables routinely run to hundreds of megabytes; memory-mapping
//! them avoids a copy, while small fixture files take the plain buffered
//! path. Content must be valid UTF-8 — a mis-encoded table is a user error
//! worth reporting, not papering over.

use anyhow::{Context, Result};
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

const MMAP_THRESHOLD: u64 = 4 * 1024 * 1024; // 4 MiB

/// Text content backed either by a memory map or an owned buffer.
pub enum FileContent {
    Mapped(Mmap),
    Buffered(String),
}

impl FileContent {
    /// The content as one `&str`.
    pub fn as_str(&self) -> &str {
        match self {
            // Validity checked once at load in read_text_smart
            FileContent::Mapped(mmap) => std::str::from_utf8(mmap).expect("validated at load"),
            FileContent::Buffered(s) => s.as_str(),
        }
    }

    /// Iterate over lines without further allocation.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.as_str().lines()
    }
}

/// Read `path` as UTF-8 text, memory-mapped above [`MMAP_THRESHOLD`].
pub fn read_text_smart<P: AsRef<Path>>(path: P) -> Result<FileContent> {
    let path = path.as_ref();
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to read metadata for {}", path.display()))?;

    if metadata.len() > MMAP_THRESHOLD {
        let file =
            File::open(path).with_context(|| format!("Failed to open file {}", path.display()))?;

        // Safety: read-only map; the loader treats the file as immutable
        let mmap = unsafe { Mmap::map(&file) }
            .with_context(|| format!("Failed to memory-map {}", path.display()))?;

        std::str::from_utf8(&mmap)
            .with_context(|| format!("{} is not valid UTF-8", path.display()))?;

        Ok(FileContent::Mapped(mmap))
    } else {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file {}", path.display()))?;

        Ok(FileContent::Buffered(content))
    }
}
