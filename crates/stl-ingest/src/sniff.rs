//! Encoding detection.

use stl_types::StlEncoding;

use crate::binary::{HEADER_SIZE, PREAMBLE_SIZE, RECORD_SIZE};

/// Number of leading bytes the sniffer looks at.
pub const SNIFF_LEN: usize = 6;

/// Sniffer verdict plus a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sniff {
    pub encoding: StlEncoding,
    /// Classified textual, yet the buffer length is exactly what its
    /// binary header would declare. Diagnostic only.
    pub format_ambiguous: bool,
}

/// Classify a buffer as textual or binary STL.
///
/// The first six bytes are decoded, trimmed and compared case-insensitively
/// with `solid`. A binary file whose header happens to start with "solid"
/// is classified textual; that is a property of the format.
pub fn sniff(buffer: &[u8]) -> Sniff {
    let head = &buffer[..buffer.len().min(SNIFF_LEN)];
    let text = String::from_utf8_lossy(head);
    if text.trim().eq_ignore_ascii_case("solid") {
        Sniff {
            encoding: StlEncoding::Ascii,
            format_ambiguous: binary_size_consistent(buffer),
        }
    } else {
        Sniff {
            encoding: StlEncoding::Binary,
            format_ambiguous: false,
        }
    }
}

fn binary_size_consistent(buffer: &[u8]) -> bool {
    if buffer.len() < PREAMBLE_SIZE {
        return false;
    }
    let count = u32::from_le_bytes([
        buffer[HEADER_SIZE],
        buffer[HEADER_SIZE + 1],
        buffer[HEADER_SIZE + 2],
        buffer[HEADER_SIZE + 3],
    ]);
    PREAMBLE_SIZE as u64 + u64::from(count) * RECORD_SIZE as u64 == buffer.len() as u64
}
