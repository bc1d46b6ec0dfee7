//! Test utilities for building and inspecting ZIP archives.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Read;
use std::io::Write;
use zip::DateTime;
use zip::ZipArchive;
use zip::write::SimpleFileOptions;

/// Timestamp used by [`ZipTestBuilder::add_file`].
///
/// Seconds are even because the DOS time format stores two-second steps.
#[must_use]
pub fn fixed_timestamp() -> DateTime {
    DateTime::from_date_and_time(2021, 3, 14, 15, 9, 26).unwrap()
}

/// Builder for ZIP test archives with explicit timestamps.
///
/// # Examples
///
/// ```
/// use zipscrub_core::test_utils::ZipTestBuilder;
///
/// let zip_data = ZipTestBuilder::new()
///     .add_directory("icons/")
///     .add_file("icons/app.png", b"png")
///     .build();
/// ```
pub struct ZipTestBuilder {
    zip: zip::ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Creates a new ZIP test builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: zip::ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a stored file stamped with [`fixed_timestamp`].
    #[must_use]
    pub fn add_file(self, name: &str, data: &[u8]) -> Self {
        self.add_file_at(name, data, fixed_timestamp())
    }

    /// Adds a stored file with a custom modification time.
    #[must_use]
    pub fn add_file_at(mut self, name: &str, data: &[u8], modified: DateTime) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored)
            .last_modified_time(modified);

        self.zip.start_file(name, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a directory entry.
    #[must_use]
    pub fn add_directory(mut self, name: &str) -> Self {
        let options = SimpleFileOptions::default().last_modified_time(fixed_timestamp());
        self.zip.add_directory(name, options).unwrap();
        self
    }

    /// Builds and returns the ZIP archive data.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds an archive with two stored entries that share `name`.
///
/// `ZipWriter` refuses duplicate names, so the second entry is written under
/// an alias of the same length and renamed in the encoded bytes. Neither
/// `first` nor `second` may contain the alias (`name.len()` `#` characters).
#[must_use]
pub fn duplicate_name_zip(name: &str, first: &[u8], second: &[u8]) -> Vec<u8> {
    let alias = "#".repeat(name.len());
    let mut bytes = ZipTestBuilder::new()
        .add_file(name, first)
        .add_file(&alias, second)
        .build();

    let (alias, name) = (alias.as_bytes(), name.as_bytes());
    let mut pos = 0;
    while pos + alias.len() <= bytes.len() {
        if &bytes[pos..pos + alias.len()] == alias {
            bytes[pos..pos + alias.len()].copy_from_slice(name);
            pos += alias.len();
        } else {
            pos += 1;
        }
    }
    bytes
}

/// Decoded view of one entry, for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySnapshot {
    /// Entry name.
    pub name: String,
    /// Decompressed content.
    pub data: Vec<u8>,
    /// Modification time, if recorded.
    pub modified: Option<DateTime>,
    /// Whether the entry is a directory.
    pub is_dir: bool,
    /// Compression method used.
    pub compression: zip::CompressionMethod,
}

/// Reads every entry of an in-memory ZIP archive in source order.
#[must_use]
pub fn read_entries(zip_data: &[u8]) -> Vec<EntrySnapshot> {
    let mut archive = ZipArchive::new(Cursor::new(zip_data)).unwrap();
    (0..archive.len())
        .map(|index| {
            let mut entry = archive.by_index(index).unwrap();
            let mut data = Vec::new();
            entry.read_to_end(&mut data).unwrap();
            EntrySnapshot {
                name: entry.name().to_string(),
                data,
                modified: entry.last_modified(),
                is_dir: entry.is_dir(),
                compression: entry.compression(),
            }
        })
        .collect()
}

/// Reads the entry names of an in-memory ZIP archive in source order.
#[must_use]
pub fn entry_names(zip_data: &[u8]) -> Vec<String> {
    read_entries(zip_data).into_iter().map(|e| e.name).collect()
}
