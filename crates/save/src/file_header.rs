// ---------------------------------------------------------------------------
// file_header – Stored value header with magic bytes, version, and checksum
// ---------------------------------------------------------------------------
//
// Header format (20 bytes, fixed-size, little-endian):
//   [0..4]   Magic bytes: "TIDE" (0x54494445)
//   [4..8]   Format version (u32)
//   [8..12]  Flags (u32: bit 0 = LZ4 compressed)
//   [12..16] Uncompressed payload size (u32)
//   [16..20] xxHash32 checksum of the stored payload (everything after the header)
//
// On save: encode value -> optionally compress -> prepend header
// On load: check magic -> validate checksum -> strip header -> decompress if flagged

use xxhash_rust::xxh32::xxh32;

use crate::save_error::SaveError;

/// Magic bytes identifying a stored value.
pub const MAGIC: [u8; 4] = [0x54, 0x49, 0x44, 0x45]; // "TIDE"

/// Size of the header in bytes.
pub const HEADER_SIZE: usize = 20;

/// Current header format version.
pub const HEADER_FORMAT_VERSION: u32 = 1;

/// Flag bit: payload is LZ4 compressed (size-prepended block).
pub const FLAG_COMPRESSED: u32 = 1;

/// Payloads at least this large are compressed by `encode_value`.
pub const COMPRESSION_THRESHOLD: usize = 256;

/// Seed for xxHash32 checksum.
const XXHASH_SEED: u32 = 0;

/// Parsed header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub format_version: u32,
    pub flags: u32,
    pub uncompressed_size: u32,
    pub checksum: u32,
}

impl FileHeader {
    pub fn is_compressed(&self) -> bool {
        self.flags & FLAG_COMPRESSED != 0
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&MAGIC);
        out.extend_from_slice(&self.format_version.to_le_bytes());
        out.extend_from_slice(&self.flags.to_le_bytes());
        out.extend_from_slice(&self.uncompressed_size.to_le_bytes());
        out.extend_from_slice(&self.checksum.to_le_bytes());
    }
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn wrap(payload: &[u8], flags: u32, uncompressed_size: usize) -> Vec<u8> {
    let header = FileHeader {
        format_version: HEADER_FORMAT_VERSION,
        flags,
        uncompressed_size: uncompressed_size as u32,
        checksum: xxh32(payload, XXHASH_SEED),
    };
    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    header.write_to(&mut out);
    out.extend_from_slice(payload);
    out
}

/// Wrap data with an uncompressed header.
pub fn wrap_with_header(data: &[u8]) -> Vec<u8> {
    wrap(data, 0, data.len())
}

/// LZ4-compress data and wrap it with a header carrying `FLAG_COMPRESSED`.
pub fn wrap_with_header_compressed(data: &[u8]) -> Vec<u8> {
    let compressed = lz4_flex::compress_prepend_size(data);
    wrap(&compressed, FLAG_COMPRESSED, data.len())
}

/// Parse and validate the header.
///
/// # Errors
///
/// - `Corrupted` if the magic is missing, the value is shorter than a header,
///   or the checksum does not match
/// - `VersionMismatch` if the header comes from a newer format version
pub fn unwrap_header(bytes: &[u8]) -> Result<(FileHeader, &[u8]), SaveError> {
    if bytes.len() < 4 || bytes[..4] != MAGIC {
        return Err(SaveError::Corrupted("missing TIDE magic bytes".to_string()));
    }
    if bytes.len() < HEADER_SIZE {
        return Err(SaveError::Corrupted(format!(
            "too short ({} bytes, need at least {} for header)",
            bytes.len(),
            HEADER_SIZE
        )));
    }

    let header = FileHeader {
        format_version: read_u32(bytes, 4),
        flags: read_u32(bytes, 8),
        uncompressed_size: read_u32(bytes, 12),
        checksum: read_u32(bytes, 16),
    };

    if header.format_version > HEADER_FORMAT_VERSION {
        return Err(SaveError::VersionMismatch {
            expected_max: HEADER_FORMAT_VERSION,
            found: header.format_version,
        });
    }

    let payload = &bytes[HEADER_SIZE..];
    let computed = xxh32(payload, XXHASH_SEED);
    if computed != header.checksum {
        return Err(SaveError::Corrupted(format!(
            "checksum mismatch (expected {:#010X}, got {:#010X})",
            header.checksum, computed,
        )));
    }

    Ok((header, payload))
}

/// Decompress an LZ4 size-prepended payload.
pub fn decompress_payload(payload: &[u8]) -> Result<Vec<u8>, SaveError> {
    lz4_flex::decompress_size_prepended(payload)
        .map_err(|e| SaveError::Decode(format!("LZ4 decompression failed: {e}")))
}

/// Wrap a value for storage, compressing it when it is large enough to matter.
pub fn encode_value(data: &[u8]) -> Vec<u8> {
    if data.len() >= COMPRESSION_THRESHOLD {
        wrap_with_header_compressed(data)
    } else {
        wrap_with_header(data)
    }
}

/// Validate, strip and (if flagged) decompress a stored value.
pub fn decode_value(bytes: &[u8]) -> Result<Vec<u8>, SaveError> {
    let (header, payload) = unwrap_header(bytes)?;
    let data = if header.is_compressed() {
        decompress_payload(payload)?
    } else {
        payload.to_vec()
    };
    if data.len() != header.uncompressed_size as usize {
        return Err(SaveError::Corrupted(format!(
            "size mismatch (header says {}, got {})",
            header.uncompressed_size,
            data.len()
        )));
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_and_unwrap_roundtrip() {
        let data = b"hello household data";
        let wrapped = wrap_with_header(data);

        assert_eq!(&wrapped[..4], &MAGIC);
        assert_eq!(wrapped.len(), HEADER_SIZE + data.len());

        let (header, payload) = unwrap_header(&wrapped).expect("unwrap should succeed");
        assert_eq!(header.format_version, HEADER_FORMAT_VERSION);
        assert!(!header.is_compressed());
        assert_eq!(header.uncompressed_size, data.len() as u32);
        assert_eq!(payload, data);
    }

    #[test]
    fn test_compressed_roundtrip() {
        let data: Vec<u8> = (0..4_000).map(|i| (i % 7) as u8).collect();
        let wrapped = wrap_with_header_compressed(&data);

        let (header, payload) = unwrap_header(&wrapped).expect("unwrap should succeed");
        assert!(header.is_compressed());
        assert_eq!(header.flags & FLAG_COMPRESSED, FLAG_COMPRESSED);
        assert_ne!(payload, data.as_slice());
        assert!(payload.len() < data.len());
        assert_eq!(decompress_payload(payload).unwrap(), data);
    }

    #[test]
    fn test_encode_value_compresses_only_large_values() {
        let small = vec![1u8; COMPRESSION_THRESHOLD - 1];
        let large = vec![1u8; COMPRESSION_THRESHOLD];
        assert!(!unwrap_header(&encode_value(&small)).unwrap().0.is_compressed());
        assert!(unwrap_header(&encode_value(&large)).unwrap().0.is_compressed());
        assert_eq!(decode_value(&encode_value(&small)).unwrap(), small);
        assert_eq!(decode_value(&encode_value(&large)).unwrap(), large);
    }

    #[test]
    fn test_missing_magic_rejected() {
        let err = unwrap_header(b"\x00\x01\x02\x03raw bytes").unwrap_err();
        assert!(matches!(err, SaveError::Corrupted(_)), "{err}");
        assert!(matches!(unwrap_header(b""), Err(SaveError::Corrupted(_))));
    }

    #[test]
    fn test_corrupted_checksum_detected() {
        let mut wrapped = wrap_with_header(b"test payload");
        let last = wrapped.len() - 1;
        wrapped[last] ^= 0xFF;

        let err = unwrap_header(&wrapped).unwrap_err();
        assert!(err.to_string().contains("checksum mismatch"), "{err}");
    }

    #[test]
    fn test_future_header_version_rejected() {
        let mut wrapped = wrap_with_header(b"test payload");
        wrapped[4..8].copy_from_slice(&999u32.to_le_bytes());

        match unwrap_header(&wrapped) {
            Err(SaveError::VersionMismatch {
                expected_max,
                found,
            }) => {
                assert_eq!(expected_max, HEADER_FORMAT_VERSION);
                assert_eq!(found, 999);
            }
            other => panic!("expected VersionMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_truncated_header_detected() {
        let err = unwrap_header(b"TIDE\x01\x00").unwrap_err();
        assert!(err.to_string().contains("too short"), "{err}");
    }

    #[test]
    fn test_size_mismatch_detected() {
        let mut wrapped = wrap_with_header(b"abc");
        wrapped[12..16].copy_from_slice(&10u32.to_le_bytes());
        let err = decode_value(&wrapped).unwrap_err();
        assert!(err.to_string().contains("size mismatch"), "{err}");
    }

    #[test]
    fn test_garbage_compressed_payload_is_decode_error() {
        let garbage = [100u8, 0, 0, 0, 0xFF, 0xFF, 0xFF];
        let wrapped = wrap(&garbage, FLAG_COMPRESSED, 10);
        assert!(matches!(decode_value(&wrapped), Err(SaveError::Decode(_))));
    }

    #[test]
    fn test_empty_payload_roundtrip() {
        let wrapped = wrap_with_header(b"");
        assert_eq!(wrapped.len(), HEADER_SIZE);
        assert!(decode_value(&wrapped).unwrap().is_empty());
    }
}
