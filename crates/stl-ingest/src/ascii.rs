//! Textual STL decoding.
//!
//! Only `vertex x y z` lines are read. `facet`, `outer loop`, `endloop`,
//! `endfacet` and `endsolid` are not checked; every three vertex lines in
//! file order make one facet.

use std::borrow::Cow;

use stl_types::Vertex;
use tracing::{debug, warn};

use crate::config::NumericPolicy;
use crate::errors::{IngestError, IngestResult};

const VERTEX_KEYWORD: &str = "vertex";
const SOLID_KEYWORD: &str = "solid";

fn decode(buffer: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(buffer)
}

fn is_vertex_line(trimmed: &str) -> bool {
    trimmed.starts_with(VERTEX_KEYWORD)
}

/// Decode the vertices of a textual STL buffer.
///
/// The result length is always a multiple of three; a trailing group of one
/// or two vertex lines is dropped.
pub fn read_ascii_vertices(buffer: &[u8], policy: NumericPolicy) -> IngestResult<Vec<Vertex>> {
    let text = decode(buffer);
    let mut vertices = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if !is_vertex_line(trimmed) {
            continue;
        }
        let mut tokens = trimmed.split_whitespace().skip(1);
        let mut coords = [0.0f64; 3];
        for c in &mut coords {
            *c = parse_coordinate(tokens.next(), idx + 1, policy)?;
        }
        vertices.push(Vertex::from(coords));
    }

    let dangling = vertices.len() % 3;
    if dangling != 0 {
        warn!(dangling, "dropping incomplete trailing facet");
        vertices.truncate(vertices.len() - dangling);
    }
    debug!(vertices = vertices.len(), "decoded ASCII STL");
    Ok(vertices)
}

fn parse_coordinate(token: Option<&str>, line: usize, policy: NumericPolicy) -> IngestResult<f64> {
    match (token.map(str::parse::<f64>), policy) {
        (Some(Ok(value)), _) => Ok(value),
        (_, NumericPolicy::FailSoft) => Ok(f64::NAN),
        (_, NumericPolicy::Strict) => Err(IngestError::MalformedNumeric {
            line,
            token: token.unwrap_or_default().to_string(),
        }),
    }
}

/// Count facets without parsing any coordinates: vertex lines divided by three.
pub fn count_ascii_facets(buffer: &[u8]) -> usize {
    let text = decode(buffer);
    text.lines().filter(|l| is_vertex_line(l.trim())).count() / 3
}

/// Check that the first non-blank line reads `solid [name]`.
///
/// Leading whitespace and blank lines are skipped, as in the sniffer. The
/// keyword is matched case-insensitively and must be followed by the end
/// of the line or whitespace; the name itself is optional.
pub fn check_ascii_header(buffer: &[u8]) -> IngestResult<()> {
    let text = decode(buffer);
    let first = text.trim_start().lines().next().unwrap_or_default().trim();
    let matches = match first.get(..SOLID_KEYWORD.len()) {
        Some(keyword) if keyword.eq_ignore_ascii_case(SOLID_KEYWORD) => {
            let rest = &first[SOLID_KEYWORD.len()..];
            rest.is_empty() || rest.starts_with(char::is_whitespace)
        }
        _ => false,
    };
    if matches {
        Ok(())
    } else {
        Err(IngestError::format(format!(
            "ASCII STL header must read 'solid <name>', found {:?}",
            first.chars().take(40).collect::<String>()
        )))
    }
}
