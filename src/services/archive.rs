// src/services/archive.rs

//! Shard archive access.
//!
//! A shard is one zip container of HTML documents. Entries are listed in
//! central-directory order and read one at a time, so at most one document's
//! bytes are held in memory.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::error::{AppError, Result};
use crate::utils::base_name;

/// Upper bound on the buffer reserved from an entry's declared size.
const MAX_PREALLOC: usize = 1 << 20;

/// One listed archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardEntry {
    /// Position in the central directory
    pub index: usize,
    /// Full entry name inside the archive
    pub name: String,
}

impl ShardEntry {
    /// Base filename, empty for directory pseudo-entries.
    pub fn base_name(&self) -> &str {
        base_name(&self.name)
    }
}

/// An opened shard archive.
pub struct Shard<R = BufReader<File>> {
    path: PathBuf,
    archive: ZipArchive<R>,
}

impl Shard {
    /// Open a shard from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(AppError::missing("shard", path));
        }
        let file = BufReader::new(File::open(path)?);
        Self::from_reader(path, file)
    }
}

impl<R: Read + Seek> Shard<R> {
    /// Open a shard from any seekable source; `path` is only used for logs.
    pub fn from_reader(path: impl Into<PathBuf>, reader: R) -> Result<Self> {
        Ok(Self {
            path: path.into(),
            archive: ZipArchive::new(reader)?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Total number of entries, directories included.
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }

    /// List entries in archive order, optionally sorted by name, then
    /// truncated to the first `limit`.
    pub fn entries(&mut self, sort: bool, limit: Option<usize>) -> Result<Vec<ShardEntry>> {
        let mut entries = Vec::with_capacity(self.archive.len());
        for index in 0..self.archive.len() {
            let name = self.archive.by_index_raw(index)?.name().to_string();
            entries.push(ShardEntry { index, name });
        }

        if sort {
            entries.sort_by(|a, b| a.name.cmp(&b.name));
        }
        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        Ok(entries)
    }

    /// Decompress one entry fully.
    ///
    /// Failures are reported as faults of that entry only.
    pub fn read_entry(&mut self, entry: &ShardEntry) -> Result<Vec<u8>> {
        let mut file = self
            .archive
            .by_index(entry.index)
            .map_err(|e| AppError::document(&entry.name, e))?;

        let mut bytes = Vec::with_capacity(prealloc_hint(file.size()));
        file.read_to_end(&mut bytes)
            .map_err(|e| AppError::document(&entry.name, e))?;
        Ok(bytes)
    }
}

/// Buffer size to reserve for an entry whose header claims `size` bytes.
///
/// The header is untrusted; reading grows the buffer past the hint as needed.
fn prealloc_hint(size: u64) -> usize {
    usize::try_from(size).unwrap_or(usize::MAX).min(MAX_PREALLOC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in entries {
            if name.ends_with('/') {
                writer.add_directory(*name, SimpleFileOptions::default()).unwrap();
            } else {
                writer.start_file(*name, SimpleFileOptions::default()).unwrap();
                writer.write_all(body.as_bytes()).unwrap();
            }
        }
        writer.finish().unwrap().into_inner()
    }

    fn shard(entries: &[(&str, &str)]) -> Shard<Cursor<Vec<u8>>> {
        Shard::from_reader("test.zip", Cursor::new(build_zip(entries))).unwrap()
    }

    #[test]
    fn test_entries_in_archive_order() {
        let mut shard = shard(&[("b.html", "b"), ("docs/", ""), ("docs/a.html", "a")]);
        let names: Vec<_> = shard
            .entries(false, None)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["b.html", "docs/", "docs/a.html"]);
        assert_eq!(shard.len(), 3);
    }

    #[test]
    fn test_entries_sorted_and_limited() {
        let mut shard = shard(&[("c.html", ""), ("a.html", ""), ("b.html", "")]);
        let entries = shard.entries(true, Some(2)).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "a.html");
        assert_eq!(entries[1].name, "b.html");
    }

    #[test]
    fn test_directory_entries_have_empty_base_name() {
        let mut shard = shard(&[("docs/", ""), ("docs/page.html", "x")]);
        let entries = shard.entries(false, None).unwrap();
        assert_eq!(entries[0].base_name(), "");
        assert_eq!(entries[1].base_name(), "page.html");
    }

    #[test]
    fn test_read_entry() {
        let mut shard = shard(&[("page.html", "<p>hi</p>")]);
        let entries = shard.entries(false, None).unwrap();
        let bytes = shard.read_entry(&entries[0]).unwrap();
        assert_eq!(bytes, b"<p>hi</p>");
    }

    #[test]
    fn test_prealloc_hint_is_capped() {
        assert_eq!(prealloc_hint(0), 0);
        assert_eq!(prealloc_hint(4096), 4096);
        assert_eq!(prealloc_hint(u64::MAX), MAX_PREALLOC);
    }

    #[test]
    fn test_read_entry_larger_than_hint() {
        let body = "x".repeat(MAX_PREALLOC + 10);
        let mut shard = shard(&[("big.html", body.as_str())]);
        let entries = shard.entries(false, None).unwrap();
        let bytes = shard.read_entry(&entries[0]).unwrap();
        assert_eq!(bytes.len(), MAX_PREALLOC + 10);
    }

    #[test]
    fn test_open_missing_shard() {
        assert!(matches!(
            Shard::open("/no/such/shard.zip"),
            Err(AppError::MissingInput { kind: "shard", .. })
        ));
    }

    #[test]
    fn test_open_non_zip_is_error() {
        let err = Shard::from_reader("bad.zip", Cursor::new(b"not a zip".to_vec()));
        assert!(matches!(err, Err(AppError::Zip(_))));
    }
}
