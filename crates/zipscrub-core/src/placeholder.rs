//! Placeholder image loaded once per run.

use crate::Result;
use crate::ScrubError;
use std::io::ErrorKind;
use std::path::Path;

/// Default placeholder location, relative to the working directory.
pub const DEFAULT_PLACEHOLDER_PATH: &str = "./placeholder.png";

/// Immutable replacement content for every retained PNG entry.
///
/// Jobs borrow the same value for the whole run; it is never mutated after
/// loading.
///
/// # Examples
///
/// ```
/// use zipscrub_core::Placeholder;
///
/// let placeholder = Placeholder::from_bytes(vec![0x89, b'P', b'N', b'G']);
/// assert_eq!(placeholder.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    bytes: Box<[u8]>,
}

impl Placeholder {
    /// Reads the placeholder from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ScrubError::PlaceholderMissing`] if the file does not exist
    /// and [`ScrubError::PlaceholderRead`] for any other read failure.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read(path) {
            Ok(bytes) => Ok(Self::from_bytes(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ScrubError::PlaceholderMissing {
                path: path.to_path_buf(),
            }),
            Err(source) => Err(ScrubError::PlaceholderRead {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Wraps bytes already in memory.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Box<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Returns the placeholder content.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the content length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the placeholder is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
