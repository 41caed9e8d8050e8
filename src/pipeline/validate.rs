//! Upload validation: size cap, emptiness, PDF magic bytes.

use thiserror::Error;

use crate::config::MAX_UPLOAD_BYTES;

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("file is {size} bytes, maximum allowed is {max}")]
    TooLarge { size: usize, max: usize },

    #[error("uploaded file is empty")]
    Empty,

    #[error("uploaded file is not a PDF")]
    NotAPdf,
}

/// Checks an upload before any parsing is attempted.
///
/// Order matters: an oversized upload reports 413 even if it is also
/// not a PDF, and emptiness is decided before the magic-byte check.
pub fn validate_upload(bytes: &[u8]) -> Result<(), ValidationError> {
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(ValidationError::TooLarge {
            size: bytes.len(),
            max: MAX_UPLOAD_BYTES,
        });
    }
    if bytes.is_empty() {
        return Err(ValidationError::Empty);
    }
    // Any "%PDF-" header is accepted regardless of version suffix.
    if !bytes.starts_with(b"%PDF-") {
        return Err(ValidationError::NotAPdf);
    }
    Ok(())
}
