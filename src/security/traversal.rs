//! Path traversal detection for static serving.
//!
//! The request path is percent-decoded and split into segments. Any segment
//! that would climb out of the asset root, or that smuggles a separator the
//! file system may honour, rejects the whole request.

use std::path::PathBuf;

use percent_encoding::percent_decode_str;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TraversalError {
    #[error("path is not valid utf-8 once decoded")]
    NotUtf8,

    #[error("path segment {0:?} escapes the asset root")]
    ParentSegment(String),

    #[error("path segment {0:?} contains a forbidden character")]
    ForbiddenCharacter(String),
}

/// Decode a request path into a path relative to the asset root.
pub fn relative_asset_path(request_path: &str) -> Result<PathBuf, TraversalError> {
    let decoded = percent_decode_str(request_path)
        .decode_utf8()
        .map_err(|_| TraversalError::NotUtf8)?;

    let mut relative = PathBuf::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => return Err(TraversalError::ParentSegment(segment.to_string())),
            s if s.contains(['\\', '\0']) || is_drive_prefix(s) => {
                return Err(TraversalError::ForbiddenCharacter(s.to_string()));
            }
            s => relative.push(s),
        }
    }
    Ok(relative)
}

/// `C:` only means something to Windows paths; elsewhere it is a plain name.
#[cfg(windows)]
fn is_drive_prefix(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

#[cfg(not(windows))]
fn is_drive_prefix(_segment: &str) -> bool {
    false
}
