//! Attachment model

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};

const ID_PREFIX: &str = "attachment-";
const KIB_BYTES: u64 = 1024;
const MIB_BYTES: u64 = KIB_BYTES * 1024;

/// Session-local attachment identifier, rendered as `attachment-<n>`.
///
/// Issued monotonically by the attachment store and never derived from the
/// file itself, so duplicate file names stay distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttachmentId(u64);

impl AttachmentId {
    /// Wrap a raw sequence number.
    #[must_use]
    pub const fn from_sequence(sequence: u64) -> Self {
        Self(sequence)
    }

    /// The sequence number this id was issued with.
    #[must_use]
    pub const fn sequence(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ID_PREFIX}{}", self.0)
    }
}

impl FromStr for AttachmentId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .strip_prefix(ID_PREFIX)
            .and_then(|sequence| sequence.parse::<u64>().ok())
            .map(Self)
            .ok_or_else(|| Error::InvalidInput(format!("Not an attachment id: {s}")))
    }
}

/// A user-selected file staged for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentFile {
    /// Original file name, sent as the multipart file name.
    pub name: String,
    /// Declared content type, if the picker supplied one.
    pub mime_type: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl AttachmentFile {
    /// Create a file from a name and its contents.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            mime_type: None,
            bytes: bytes.into(),
        }
    }

    /// Attach a declared content type.
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Read a file from disk, keeping its final path component as the name.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                Error::InvalidInput(format!("Attachment path has no file name: {}", path.display()))
            })?;
        let bytes = std::fs::read(path)?;
        Ok(Self::new(name, bytes))
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Content type to send: the declared one, else a guess from the name.
    #[must_use]
    pub fn content_type(&self) -> String {
        infer_mime_type(self.mime_type.as_deref(), &self.name)
    }
}

/// An attachment held by the store. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub id: AttachmentId,
    pub file: AttachmentFile,
}

/// Pick a content type for an upload part.
///
/// Prefers a non-blank declared type, then the extension guess, then
/// `application/octet-stream`.
#[must_use]
pub fn infer_mime_type(declared: Option<&str>, file_name: &str) -> String {
    if let Some(declared) = declared {
        let trimmed = declared.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Human-readable size: bytes below 1 KB, then KB and MB with one decimal.
///
/// Tenths are rounded half up, so 1280 bytes reads `1.3 KB`. The unit is
/// picked before rounding; 1 MB minus one byte reads `1024.0 KB`.
#[must_use]
pub fn format_file_size(size: u64) -> String {
    if size < KIB_BYTES {
        format!("{size} B")
    } else if size < MIB_BYTES {
        format_scaled_one_decimal(size, KIB_BYTES, "KB")
    } else {
        format_scaled_one_decimal(size, MIB_BYTES, "MB")
    }
}

fn format_scaled_one_decimal(size: u64, unit: u64, suffix: &str) -> String {
    let tenths = (u128::from(size) * 10 + u128::from(unit) / 2) / u128::from(unit);
    format!("{}.{} {suffix}", tenths / 10, tenths % 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_id_display_and_parse() {
        let id = AttachmentId::from_sequence(3);
        assert_eq!(id.to_string(), "attachment-3");
        assert_eq!("attachment-3".parse::<AttachmentId>().unwrap(), id);
        assert_eq!(" attachment-3 ".parse::<AttachmentId>().unwrap(), id);
    }

    #[test]
    fn attachment_id_rejects_foreign_values() {
        assert!("3".parse::<AttachmentId>().is_err());
        assert!("attachment-".parse::<AttachmentId>().is_err());
        assert!("attachment-x".parse::<AttachmentId>().is_err());
        assert!("screenshot.png".parse::<AttachmentId>().is_err());
    }

    #[test]
    fn format_file_size_thresholds() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(1024), "1.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1024 * 1024), "1.0 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 + 300 * 1024), "5.3 MB");
    }

    #[test]
    fn format_file_size_rounds_ties_up() {
        assert_eq!(format_file_size(1280), "1.3 KB");
        assert_eq!(format_file_size(1_310_720), "1.3 MB");
        assert_eq!(format_file_size(1075), "1.0 KB");
        assert_eq!(format_file_size(1076), "1.1 KB");
        assert_eq!(format_file_size(1024 * 1024 - 1), "1024.0 KB");
    }

    #[test]
    fn content_type_prefers_declared_then_extension() {
        let declared = AttachmentFile::new("log.bin", vec![1]).with_mime_type("text/plain");
        assert_eq!(declared.content_type(), "text/plain");

        let guessed = AttachmentFile::new("screenshot.png", vec![1]);
        assert_eq!(guessed.content_type(), "image/png");

        let blank = AttachmentFile::new("dump", vec![1]).with_mime_type("  ");
        assert_eq!(blank.content_type(), "application/octet-stream");
    }

    #[test]
    fn from_path_reads_name_and_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.log");
        std::fs::write(&path, b"panic at line 4").unwrap();

        let file = AttachmentFile::from_path(&path).unwrap();
        assert_eq!(file.name, "trace.log");
        assert_eq!(file.size(), 15);
        assert_eq!(file.bytes, b"panic at line 4");
    }

    #[test]
    fn from_path_surfaces_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let error = AttachmentFile::from_path(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(error, Error::Io(_)));
    }
}
