//! Helper functions: error type, fixture meshes, reference mesh math.

use stl_types::{BoundingBox, Facet, Vertex};

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("oracle failure ({oracle}): {detail}")]
    OracleFailure { oracle: String, detail: String },

    #[error("STL error: {reason}")]
    StlError { reason: String },
}

// ── Fixture Meshes ──────────────────────────────────────────────────────────

/// Two facets stacked one unit apart along Z:
/// (0,0,0),(1,0,0),(0,1,0) and (0,0,1),(1,0,1),(0,1,1).
pub fn two_facet_stack() -> Vec<Facet> {
    vec![
        Facet::from_coords([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        Facet::from_coords([0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]),
    ]
}

/// Axis-aligned box from `min` to `max`, 12 outward-facing triangles.
pub fn box_facets(min: [f64; 3], max: [f64; 3]) -> Vec<Facet> {
    let [x0, y0, z0] = min;
    let [x1, y1, z1] = max;
    let p = [
        [x0, y0, z0],
        [x1, y0, z0],
        [x1, y1, z0],
        [x0, y1, z0],
        [x0, y0, z1],
        [x1, y0, z1],
        [x1, y1, z1],
        [x0, y1, z1],
    ];
    let tris: [[usize; 3]; 12] = [
        [0, 2, 1],
        [0, 3, 2], // bottom
        [4, 5, 6],
        [4, 6, 7], // top
        [0, 1, 5],
        [0, 5, 4], // front
        [2, 3, 7],
        [2, 7, 6], // back
        [0, 4, 7],
        [0, 7, 3], // left
        [1, 2, 6],
        [1, 6, 5], // right
    ];
    tris.iter()
        .map(|t| Facet::from_coords(p[t[0]], p[t[1]], p[t[2]]))
        .collect()
}

/// Unit cube at the origin.
pub fn unit_cube() -> Vec<Facet> {
    box_facets([0.0; 3], [1.0; 3])
}

/// Fan of `n` triangles around the origin in the XY plane, radius `r`.
pub fn disc_fan(n: usize, r: f64) -> Vec<Facet> {
    (0..n)
        .map(|i| {
            let a0 = 2.0 * std::f64::consts::PI * (i as f64) / (n as f64);
            let a1 = 2.0 * std::f64::consts::PI * ((i + 1) as f64) / (n as f64);
            Facet::from_coords(
                [0.0, 0.0, 0.0],
                [r * a0.cos(), r * a0.sin(), 0.0],
                [r * a1.cos(), r * a1.sin(), 0.0],
            )
        })
        .collect()
}

/// Round every coordinate through f32, as a binary STL file stores it.
pub fn quantize_f32(facets: &[Facet]) -> Vec<Facet> {
    facets
        .iter()
        .map(|f| {
            let [a, b, c] = f.vertices.map(|v| {
                Vertex::new(
                    v.x as f32 as f64,
                    v.y as f32 as f64,
                    v.z as f32 as f64,
                )
            });
            Facet::new(a, b, c)
        })
        .collect()
}

// ── Reference Mesh Math ─────────────────────────────────────────────────────

/// Componentwise min/max of all facet corners; origin box when empty.
pub fn reference_bounding_box(facets: &[Facet]) -> BoundingBox {
    let mut corners = facets.iter().flat_map(|f| f.vertices.iter());
    let Some(first) = corners.next() else {
        return BoundingBox::default();
    };
    let mut min = first.to_array();
    let mut max = min;
    for v in corners {
        for (i, c) in v.to_array().into_iter().enumerate() {
            min[i] = min[i].min(c);
            max[i] = max[i].max(c);
        }
    }
    BoundingBox::new(min, max)
}

/// Compute the signed volume of a triangle mesh using the divergence theorem.
///
/// For a closed (watertight) mesh, this returns the enclosed volume.
/// For open meshes, the result may be meaningless.
pub fn reference_volume(facets: &[Facet]) -> f64 {
    let mut volume = 0.0f64;
    for f in facets {
        let [p0, p1, p2] = f.vertices;
        let (x0, y0, z0) = (p0.x, p0.y, p0.z);
        let (x1, y1, z1) = (p1.x, p1.y, p1.z);
        let (x2, y2, z2) = (p2.x, p2.y, p2.z);

        // Signed volume of tetrahedron formed by triangle and origin
        volume += x0 * (y1 * z2 - y2 * z1) + x1 * (y2 * z0 - y0 * z2) + x2 * (y0 * z1 - y1 * z0);
    }
    (volume / 6.0).abs()
}

/// Compute the total surface area of a triangle mesh.
pub fn reference_surface_area(facets: &[Facet]) -> f64 {
    let mut area = 0.0f64;
    for f in facets {
        let [p0, p1, p2] = f.vertices;
        let (ax, ay, az) = (p1.x - p0.x, p1.y - p0.y, p1.z - p0.z);
        let (bx, by, bz) = (p2.x - p0.x, p2.y - p0.y, p2.z - p0.z);

        // Cross product magnitude / 2
        let cx = ay * bz - az * by;
        let cy = az * bx - ax * bz;
        let cz = ax * by - ay * bx;
        area += (cx * cx + cy * cy + cz * cz).sqrt() / 2.0;
    }
    area
}
