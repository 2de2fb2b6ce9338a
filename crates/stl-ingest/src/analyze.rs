use stl_types::{MeshInfo, StlEncoding, Vertex};
use tracing::{info, instrument, warn};

use crate::accumulate::accumulate;
use crate::ascii::read_ascii_vertices;
use crate::binary::read_binary_vertices;
use crate::config::AnalysisConfig;
use crate::errors::{IngestError, IngestResult};
use crate::gate::check_size;
use crate::sniff::sniff;

/// Analyze an STL buffer with the default configuration.
pub fn analyze(buffer: &[u8]) -> IngestResult<MeshInfo> {
    analyze_with(buffer, &AnalysisConfig::default())
}

/// Decode an STL buffer and reduce it to a `MeshInfo`.
///
/// All-or-nothing: any failure returns an error, never a partially filled
/// result.
#[instrument(skip(buffer, config), fields(bytes = buffer.len(), estimator = ?config.estimator))]
pub fn analyze_with(buffer: &[u8], config: &AnalysisConfig) -> IngestResult<MeshInfo> {
    check_size(buffer, &config.limits)?;
    if buffer.is_empty() {
        return Err(IngestError::format("file is empty"));
    }

    let sniff = sniff(buffer);
    let vertices = read_vertices(buffer, sniff.encoding, config)?;
    let non_finite = vertices.iter().filter(|v| !v.is_finite()).count();
    if non_finite > 0 {
        warn!(non_finite, "non-finite coordinates, bounds and metrics will carry NaN");
    }

    let face_count = u32::try_from(vertices.len() / 3)
        .map_err(|_| IngestError::format("facet count exceeds u32"))?;
    let vertex_count = face_count
        .checked_mul(3)
        .ok_or_else(|| IngestError::format("vertex count exceeds u32"))?;

    let geometry = accumulate(&vertices, config.estimator);

    info!(
        encoding = ?sniff.encoding,
        ambiguous = sniff.format_ambiguous,
        face_count,
        surface_area = geometry.surface_area,
        volume = geometry.volume,
        "mesh analyzed"
    );

    Ok(MeshInfo {
        vertex_count,
        face_count,
        bounding_box: geometry.bounding_box,
        surface_area: geometry.surface_area,
        volume: geometry.volume,
    })
}

/// Decode the vertex stream for an already-sniffed buffer.
pub fn read_vertices(
    buffer: &[u8],
    encoding: StlEncoding,
    config: &AnalysisConfig,
) -> IngestResult<Vec<Vertex>> {
    match encoding {
        StlEncoding::Ascii => read_ascii_vertices(buffer, config.numeric_policy),
        StlEncoding::Binary => read_binary_vertices(buffer),
    }
}
