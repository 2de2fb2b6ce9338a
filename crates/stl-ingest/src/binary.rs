//! Binary STL decoding.
//!
//! Layout:
//! - 80 bytes: header (content ignored)
//! - 4 bytes: u32 LE triangle count `N`
//! - Per triangle (50 bytes each), at offset `84 + i * 50`:
//!   - 12 bytes: normal vector (ignored)
//!   - 36 bytes: 3 vertices (3 × 3 × f32 LE)
//!   - 2 bytes: attribute byte count (ignored)

use stl_types::Vertex;
use tracing::debug;

use crate::errors::{IngestError, IngestResult};

/// Size of the free-form header.
pub const HEADER_SIZE: usize = 80;

/// Header plus the triangle count.
pub const PREAMBLE_SIZE: usize = HEADER_SIZE + 4;

/// Size of one triangle record.
pub const RECORD_SIZE: usize = 50;

const NORMAL_SIZE: usize = 12;
const VERTEX_SIZE: usize = 12;

/// Byte length a binary file declaring `facet_count` triangles must have.
pub fn expected_len(facet_count: u32) -> u64 {
    PREAMBLE_SIZE as u64 + u64::from(facet_count) * RECORD_SIZE as u64
}

/// Read the triangle count from the header without touching the records.
pub fn declared_facet_count(buffer: &[u8]) -> IngestResult<u32> {
    let count = buffer
        .get(HEADER_SIZE..PREAMBLE_SIZE)
        .ok_or(IngestError::TruncatedFile {
            expected: PREAMBLE_SIZE as u64,
            actual: buffer.len() as u64,
        })?;
    Ok(u32::from_le_bytes([count[0], count[1], count[2], count[3]]))
}

/// Check that every declared record lies inside the buffer.
///
/// Returns the declared count. Bytes past the last record are tolerated.
pub fn check_binary_length(buffer: &[u8]) -> IngestResult<u32> {
    let count = declared_facet_count(buffer)?;
    let expected = expected_len(count);
    let actual = buffer.len() as u64;
    if actual < expected {
        return Err(IngestError::TruncatedFile { expected, actual });
    }
    Ok(count)
}

/// Decode all vertices of a binary STL buffer, three per facet, in file order.
pub fn read_binary_vertices(buffer: &[u8]) -> IngestResult<Vec<Vertex>> {
    let count = check_binary_length(buffer)? as usize;
    debug!(facets = count, bytes = buffer.len(), "decoding binary STL");

    let mut vertices = Vec::with_capacity(count * 3);
    let records = &buffer[PREAMBLE_SIZE..PREAMBLE_SIZE + count * RECORD_SIZE];
    for record in records.chunks_exact(RECORD_SIZE) {
        for k in 0..3 {
            let start = NORMAL_SIZE + k * VERTEX_SIZE;
            vertices.push(read_vertex(&record[start..start + VERTEX_SIZE]));
        }
    }
    Ok(vertices)
}

/// Read a vertex from 12 bytes (3 f32s).
fn read_vertex(buf: &[u8]) -> Vertex {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Vertex::from([x, y, z])
}
