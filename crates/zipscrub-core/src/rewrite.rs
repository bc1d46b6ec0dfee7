//! In-place archive rewriting.
//!
//! The new archive is built entirely in memory and only then written over
//! the original, so a failure before the final write leaves the file as it
//! was. The final write truncates and replaces; it is not atomic.

use crate::Placeholder;
use crate::Result;
use crate::ScrubError;
use crate::filter::EntryAction;
use crate::filter::classify;
use crate::report::RewriteReport;
use std::fs::File;
use std::io::BufReader;
use std::io::Cursor;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use std::time::Instant;
use tracing::debug;
use tracing::info;
use zip::CompressionMethod;
use zip::DateTime;
use zip::ZipArchive;
use zip::ZipWriter;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;

const EOCD_SIGNATURE: [u8; 4] = [0x50, 0x4b, 0x05, 0x06];
const EOCD_LEN: usize = 22;
/// End of central directory record plus the longest possible comment.
const EOCD_SEARCH_LEN: u64 = 22 + 65_535;
const ZIP64_LOCATOR_SIGNATURE: [u8; 4] = [0x50, 0x4b, 0x06, 0x07];
const ZIP64_LOCATOR_LEN: usize = 20;
const ZIP64_EOCD_SIGNATURE: [u8; 4] = [0x50, 0x4b, 0x06, 0x06];
const ZIP64_EOCD_PREFIX_LEN: usize = 40;

/// Rewrites the archive at `path` in place.
///
/// Entries are processed in source order: excluded entries are dropped,
/// `.png` entries get the placeholder as content, everything else is copied.
/// Every retained entry keeps its name and modification time and is stored
/// with Deflate. `on_excluded` is called with each excluded name as soon as
/// the entry is reached, so it also fires for archives that later fail.
///
/// Archives holding several entries with the same name are rejected before
/// anything is written, since the reader would silently keep only one.
///
/// # Examples
///
/// ```no_run
/// use zipscrub_core::Placeholder;
/// use zipscrub_core::rewrite_archive;
///
/// let placeholder = Placeholder::load("./placeholder.png")?;
/// let report = rewrite_archive("mods/textures.zip", &placeholder, &mut |name| {
///     println!("Excluding file {name}");
/// })?;
/// println!("replaced {} images", report.placeholders_written);
/// # Ok::<(), zipscrub_core::ScrubError>(())
/// ```
///
/// # Errors
///
/// Returns an error naming the failed stage if the archive cannot be opened
/// or parsed, contains duplicate entry names, an entry cannot be read or written, the output cannot be
/// finalized, or the original cannot be overwritten.
pub fn rewrite_archive<P: AsRef<Path>>(
    path: P,
    placeholder: &Placeholder,
    on_excluded: &mut dyn FnMut(&str),
) -> Result<RewriteReport> {
    let path = path.as_ref();
    let start = Instant::now();
    let open_error = |source: ZipError| ScrubError::Open {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(|e| open_error(ZipError::from(e)))?;
    let bytes_before = file
        .metadata()
        .map_err(|e| open_error(ZipError::from(e)))?
        .len();
    let mut reader = BufReader::new(file);
    let declared =
        declared_entry_count(&mut reader).map_err(|e| open_error(ZipError::from(e)))?;
    let mut archive = ZipArchive::new(reader).map_err(open_error)?;

    if let Some(declared) = declared
        && declared > archive.len() as u64
    {
        return Err(ScrubError::DuplicateEntries {
            declared,
            distinct: archive.len(),
        });
    }

    let (buffer, mut report) = rewrite_zip(&mut archive, placeholder, on_excluded)?;
    // Release the source handle before truncating the file underneath it.
    drop(archive);

    std::fs::write(path, &buffer).map_err(|source| ScrubError::Overwrite {
        path: path.to_path_buf(),
        source,
    })?;

    report.bytes_before = bytes_before;
    report.bytes_after = buffer.len() as u64;
    report.duration = start.elapsed();

    info!(
        "rewrote {}: {} replaced, {} copied, {} excluded ({} -> {} bytes)",
        path.display(),
        report.placeholders_written,
        report.entries_copied,
        report.excluded.len(),
        report.bytes_before,
        report.bytes_after
    );

    Ok(report)
}

/// Rewrites an already opened archive into a new in-memory archive.
///
/// Returns the encoded archive and a report. `bytes_before`, `bytes_after`
/// and `duration` are left at zero; [`rewrite_archive`] fills them in.
/// Duplicate entry names are not detected here.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use zipscrub_core::Placeholder;
/// use zipscrub_core::rewrite_zip;
/// use zipscrub_core::test_utils::ZipTestBuilder;
/// use zipscrub_core::test_utils::read_entries;
///
/// let source = ZipTestBuilder::new()
///     .add_file("icon.png", b"original")
///     .add_file("LICENSE", b"MIT")
///     .build();
/// let mut archive = zip::ZipArchive::new(Cursor::new(source)).unwrap();
/// let placeholder = Placeholder::from_bytes(b"tiny".to_vec());
///
/// let (output, report) = rewrite_zip(&mut archive, &placeholder, &mut |_| {}).unwrap();
/// let entries = read_entries(&output);
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].data, b"tiny");
/// assert_eq!(report.excluded, vec!["LICENSE"]);
/// ```
///
/// # Errors
///
/// Returns an error if an entry cannot be read, written, or copied, or the
/// output cannot be finalized.
pub fn rewrite_zip<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    placeholder: &Placeholder,
    on_excluded: &mut dyn FnMut(&str),
) -> Result<(Vec<u8>, RewriteReport)> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let mut report = RewriteReport::default();

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|source| ScrubError::ReadEntry { index, source })?;
        let name = entry.name().to_string();
        let modified = entry.last_modified();

        match classify(&name, entry.is_dir()) {
            EntryAction::Exclude => {
                debug!("excluding {name}");
                on_excluded(&name);
                report.excluded.push(name);
            }
            EntryAction::Directory => {
                let options = entry_options(modified, 0);
                zip.add_directory(name.as_str(), options)
                    .map_err(|source| ScrubError::WriteEntry { name, source })?;
                report.directories_copied += 1;
            }
            EntryAction::Placeholder => {
                let options = entry_options(modified, placeholder.len() as u64);
                start_entry(&mut zip, &name, options)?;
                zip.write_all(placeholder.as_bytes())
                    .map_err(|source| ScrubError::CopyEntry {
                        name: name.clone(),
                        source,
                    })?;
                debug!("replaced {name} with placeholder");
                report.placeholders_written += 1;
            }
            EntryAction::Copy => {
                let options = entry_options(modified, entry.size());
                start_entry(&mut zip, &name, options)?;
                std::io::copy(&mut entry, &mut zip)
                    .map_err(|source| ScrubError::CopyEntry { name, source })?;
                report.entries_copied += 1;
            }
        }
    }

    let buffer = zip.finish().map_err(ScrubError::Finalize)?.into_inner();
    Ok((buffer, report))
}

fn start_entry(
    zip: &mut ZipWriter<Cursor<Vec<u8>>>,
    name: &str,
    options: SimpleFileOptions,
) -> Result<()> {
    zip.start_file(name, options)
        .map_err(|source| ScrubError::WriteEntry {
            name: name.to_string(),
            source,
        })
}

/// Reads the entry count recorded in the end of central directory record.
///
/// Returns `None` if the record cannot be located; the reader's own parse
/// then stands.
fn declared_entry_count<R: Read + Seek>(reader: &mut R) -> io::Result<Option<u64>> {
    let len = reader.seek(SeekFrom::End(0))?;
    let tail_len = len.min(EOCD_SEARCH_LEN);
    reader.seek(SeekFrom::Start(len - tail_len))?;
    let mut tail = Vec::new();
    reader.by_ref().take(tail_len).read_to_end(&mut tail)?;

    if tail.len() < EOCD_LEN {
        return Ok(None);
    }
    let Some(eocd) = (0..=tail.len() - EOCD_LEN)
        .rev()
        .find(|&pos| tail[pos..].starts_with(&EOCD_SIGNATURE))
    else {
        return Ok(None);
    };

    let total = u16::from_le_bytes([tail[eocd + 10], tail[eocd + 11]]);
    if total != u16::MAX {
        return Ok(Some(u64::from(total)));
    }

    // Saturated count: the real one is in the zip64 record.
    let Some(locator) = eocd.checked_sub(ZIP64_LOCATOR_LEN) else {
        return Ok(None);
    };
    if !tail[locator..].starts_with(&ZIP64_LOCATOR_SIGNATURE) {
        return Ok(None);
    }
    let record_offset = le_u64(&tail[locator + 8..locator + 16]);

    let mut record = [0u8; ZIP64_EOCD_PREFIX_LEN];
    if reader.seek(SeekFrom::Start(record_offset)).is_err()
        || reader.read_exact(&mut record).is_err()
        || !record.starts_with(&ZIP64_EOCD_SIGNATURE)
    {
        return Ok(None);
    }
    Ok(Some(le_u64(&record[32..40])))
}

fn le_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[..8]);
    u64::from_le_bytes(buf)
}

/// Deflate options carrying the source entry's timestamp.
fn entry_options(modified: Option<DateTime>, content_len: u64) -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(modified.unwrap_or_default())
        .large_file(content_len >= u64::from(u32::MAX))
}
