// ---------------------------------------------------------------------------
// SaveError: failures reading or writing the high-score file
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that can occur while loading or persisting the high score.
#[derive(Debug)]
pub enum SaveError {
    /// I/O error (permission denied, disk full, etc.)
    Io(std::io::Error),
    /// Bitcode decoding failed.
    Decode(String),
    /// The file does not start with the expected magic bytes.
    BadMagic([u8; 4]),
    /// The payload does not match the checksum stored in the header.
    ChecksumMismatch { expected: u32, found: u32 },
    /// The header format version is newer than this build understands.
    UnsupportedVersion { supported: u32, found: u32 },
    /// Fewer bytes than the header promises.
    Truncated { expected: usize, found: usize },
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "I/O error: {e}"),
            SaveError::Decode(msg) => write!(f, "Decoding error: {msg}"),
            SaveError::BadMagic(found) => {
                write!(f, "Not a high-score file (magic bytes {found:02X?})")
            }
            SaveError::ChecksumMismatch { expected, found } => write!(
                f,
                "High-score file is corrupted: checksum mismatch \
                 (expected {expected:#010X}, got {found:#010X})"
            ),
            SaveError::UnsupportedVersion { supported, found } => write!(
                f,
                "High-score file is v{found}, but this build only supports up to v{supported}"
            ),
            SaveError::Truncated { expected, found } => write!(
                f,
                "High-score file is truncated ({found} bytes, need {expected})"
            ),
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

impl From<bitcode::Error> for SaveError {
    fn from(e: bitcode::Error) -> Self {
        SaveError::Decode(e.to_string())
    }
}
