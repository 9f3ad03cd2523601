// ---------------------------------------------------------------------------
// file_header: magic, version and checksum in front of the payload
// ---------------------------------------------------------------------------
//
// Header format (16 bytes, fixed-size, little-endian):
//   [0..4]   Magic bytes: "LHOP"
//   [4..8]   Format version (u32)
//   [8..12]  Payload length (u32)
//   [12..16] xxHash32 checksum of the payload

use xxhash_rust::xxh32::xxh32;

use crate::save_error::SaveError;

pub const MAGIC: [u8; 4] = *b"LHOP";

pub const HEADER_SIZE: usize = 16;

pub const HEADER_FORMAT_VERSION: u32 = 1;

const XXHASH_SEED: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    pub format_version: u32,
    pub payload_len: u32,
    pub checksum: u32,
}

impl FileHeader {
    pub fn new(payload: &[u8]) -> Self {
        Self {
            format_version: HEADER_FORMAT_VERSION,
            payload_len: payload.len() as u32,
            checksum: xxh32(payload, XXHASH_SEED),
        }
    }
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Returns `[header] ++ [payload]`.
pub fn wrap_with_header(payload: &[u8]) -> Vec<u8> {
    let header = FileHeader::new(payload);
    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&header.format_version.to_le_bytes());
    out.extend_from_slice(&header.payload_len.to_le_bytes());
    out.extend_from_slice(&header.checksum.to_le_bytes());
    out.extend_from_slice(payload);
    out
}

/// Validate the header and return it with the payload slice.
pub fn unwrap_header(bytes: &[u8]) -> Result<(FileHeader, &[u8]), SaveError> {
    if bytes.len() < HEADER_SIZE {
        return Err(SaveError::Truncated {
            expected: HEADER_SIZE,
            found: bytes.len(),
        });
    }

    let magic = [bytes[0], bytes[1], bytes[2], bytes[3]];
    if magic != MAGIC {
        return Err(SaveError::BadMagic(magic));
    }

    let header = FileHeader {
        format_version: read_u32(bytes, 4),
        payload_len: read_u32(bytes, 8),
        checksum: read_u32(bytes, 12),
    };
    if header.format_version > HEADER_FORMAT_VERSION {
        return Err(SaveError::UnsupportedVersion {
            supported: HEADER_FORMAT_VERSION,
            found: header.format_version,
        });
    }

    let expected_len = HEADER_SIZE + header.payload_len as usize;
    if bytes.len() < expected_len {
        return Err(SaveError::Truncated {
            expected: expected_len,
            found: bytes.len(),
        });
    }
    let payload = &bytes[HEADER_SIZE..expected_len];

    let computed = xxh32(payload, XXHASH_SEED);
    if computed != header.checksum {
        return Err(SaveError::ChecksumMismatch {
            expected: header.checksum,
            found: computed,
        });
    }

    Ok((header, payload))
}
