//! Binary and ASCII STL encoders for synthetic facets.

use stl_types::Facet;

use crate::helpers::HarnessError;

const HEADER_SIZE: usize = 80;

/// Encode facets as a binary STL file.
///
/// Binary STL format:
/// - 80-byte header (arbitrary text)
/// - u32 triangle count (little-endian)
/// - For each triangle: 3×f32 normal + 3×(3×f32 vertex) + u16 attribute = 50 bytes
///
/// Coordinates are narrowed to f32. The header holds `name`, zero-padded.
pub fn export_binary_stl(facets: &[Facet], name: &str) -> Result<Vec<u8>, HarnessError> {
    let header = format!("binary STL: {}", name);
    export_binary_stl_with_header(facets, header.as_bytes())
}

/// Encode facets as binary STL with caller-chosen header bytes.
///
/// Lets tests build binary files whose header starts with `solid`.
pub fn export_binary_stl_with_header(
    facets: &[Facet],
    header: &[u8],
) -> Result<Vec<u8>, HarnessError> {
    if header.len() > HEADER_SIZE {
        return Err(HarnessError::StlError {
            reason: format!("header is {} bytes, limit is {}", header.len(), HEADER_SIZE),
        });
    }
    let tri_count = u32::try_from(facets.len()).map_err(|_| HarnessError::StlError {
        reason: format!("{} facets do not fit a u32 count", facets.len()),
    })?;

    let mut buf = Vec::with_capacity(HEADER_SIZE + 4 + facets.len() * 50);
    buf.extend_from_slice(header);
    buf.resize(HEADER_SIZE, 0u8);
    buf.extend_from_slice(&tri_count.to_le_bytes());

    for facet in facets {
        let n = facet_normal(facet);
        for c in n {
            buf.extend_from_slice(&(c as f32).to_le_bytes());
        }
        for v in &facet.vertices {
            for c in v.to_array() {
                buf.extend_from_slice(&(c as f32).to_le_bytes());
            }
        }
        // Attribute byte count (unused)
        buf.extend_from_slice(&0u16.to_le_bytes());
    }

    Ok(buf)
}

/// Encode facets as an ASCII STL string.
pub fn export_ascii_stl(facets: &[Facet], name: &str) -> String {
    let mut out = String::with_capacity(facets.len() * 300 + 64);
    out.push_str(&format!("solid {}\n", name));

    for facet in facets {
        let [nx, ny, nz] = facet_normal(facet);
        out.push_str(&format!("  facet normal {} {} {}\n", nx, ny, nz));
        out.push_str("    outer loop\n");
        for v in &facet.vertices {
            out.push_str(&format!("      vertex {} {} {}\n", v.x, v.y, v.z));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }

    out.push_str(&format!("endsolid {}\n", name));
    out
}

/// Drop `bytes` from the end of an encoded file.
pub fn truncate_by(mut stl: Vec<u8>, bytes: usize) -> Vec<u8> {
    let keep = stl.len().saturating_sub(bytes);
    stl.truncate(keep);
    stl
}

/// Unit face normal, or +Z for a degenerate facet.
fn facet_normal(facet: &Facet) -> [f64; 3] {
    let [a, b, c] = facet.vertices;
    let (ax, ay, az) = (b.x - a.x, b.y - a.y, b.z - a.z);
    let (bx, by, bz) = (c.x - a.x, c.y - a.y, c.z - a.z);
    let nx = ay * bz - az * by;
    let ny = az * bx - ax * bz;
    let nz = ax * by - ay * bx;
    let len = (nx * nx + ny * ny + nz * nz).sqrt();
    if len > 1e-12 {
        [nx / len, ny / len, nz / len]
    } else {
        [0.0, 0.0, 1.0]
    }
}
