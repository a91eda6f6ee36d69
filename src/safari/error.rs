//! Access error taxonomy for Safari ingestion.
//!
//! Each stage maps its native failure to exactly one kind where it occurs.
//! Later stages never reinterpret a kind, and nothing here is retried.

use serde::Serialize;
use std::io;
use thiserror::Error;

const NOT_FOUND_MESSAGE: &str = "Safari bookmarks not found. Is Safari installed?";
const PERMISSION_MESSAGE: &str =
    "Cannot access Safari data. Please grant Full Disk Access to Terminal.";
const PARSE_MESSAGE: &str = "Could not parse Safari bookmarks. File may be corrupted.";

/// Discriminant of an [`AccessError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessErrorKind {
    Permission,
    NotFound,
    ParseError,
}

impl AccessErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessErrorKind::Permission => "PERMISSION",
            AccessErrorKind::NotFound => "NOT_FOUND",
            AccessErrorKind::ParseError => "PARSE_ERROR",
        }
    }
}

/// Classified failure of a Safari reading-list read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AccessError {
    pub kind: AccessErrorKind,
    pub message: String,
}

impl AccessError {
    pub fn new(kind: AccessErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::new(AccessErrorKind::NotFound, NOT_FOUND_MESSAGE)
    }

    pub fn permission() -> Self {
        Self::new(AccessErrorKind::Permission, PERMISSION_MESSAGE)
    }

    pub fn parse_error() -> Self {
        Self::new(AccessErrorKind::ParseError, PARSE_MESSAGE)
    }
}

// errno values shared by macOS and Linux.
const EPERM: i32 = 1;
const EACCES: i32 = 13;

/// Whether an I/O failure means the OS access-control layer refused us.
///
/// Checks the structured error kind first, then the raw OS code. Matching
/// the error text is the last resort: it is not a stable contract, but the
/// sandbox layer does not always surface a structured code through wrappers.
pub fn is_permission_denied(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::PermissionDenied {
        return true;
    }
    if let Some(code) = err.raw_os_error() {
        return code == EPERM || code == EACCES;
    }
    let text = err.to_string();
    text.contains("Permission denied") || text.contains("Operation not permitted")
}

/// Map a failed snapshot copy to an access error.
pub fn classify_copy_error(err: &io::Error) -> AccessError {
    if is_permission_denied(err) {
        AccessError::permission()
    } else if err.kind() == io::ErrorKind::NotFound {
        AccessError::not_found()
    } else {
        AccessError::new(
            AccessErrorKind::NotFound,
            format!("Could not snapshot Safari bookmarks: {}", err),
        )
    }
}
