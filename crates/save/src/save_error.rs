// ---------------------------------------------------------------------------
// SaveError: typed errors for persistence and share codes
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that can occur while storing, loading or sharing a household.
#[derive(Debug)]
pub enum SaveError {
    /// I/O error (permission denied, disk full, etc.)
    Io(std::io::Error),
    /// Encoding a stored value failed.
    Encode(String),
    /// A stored payload could not be decoded or decompressed.
    Decode(String),
    /// A share code was not valid base64 / JSON, or held no persons.
    Share(String),
    /// Stored value was written by a newer header format.
    VersionMismatch { expected_max: u32, found: u32 },
    /// Header present but the value is truncated or fails its checksum.
    Corrupted(String),
    /// Nothing stored under the requested key.
    NoData,
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "I/O error: {e}"),
            SaveError::Encode(msg) => write!(f, "Encoding error: {msg}"),
            SaveError::Decode(msg) => write!(f, "Decoding error: {msg}"),
            SaveError::Share(msg) => write!(f, "Invalid share code: {msg}"),
            SaveError::VersionMismatch {
                expected_max,
                found,
            } => write!(
                f,
                "Version mismatch: value is v{found}, but this build only supports up to v{expected_max}"
            ),
            SaveError::Corrupted(msg) => write!(f, "Corrupted value: {msg}"),
            SaveError::NoData => write!(f, "No saved data available"),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<base64::DecodeError> for SaveError {
    fn from(e: base64::DecodeError) -> Self {
        SaveError::Share(e.to_string())
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        SaveError::Share(e.to_string())
    }
}
