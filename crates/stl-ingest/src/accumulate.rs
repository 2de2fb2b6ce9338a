//! Reduction of a vertex stream into bounding box, surface area and volume.

use stl_types::{BoundingBox, Vertex};

use crate::config::EstimatorMode;

/// Surface area credited per facet by the heuristic estimator.
pub const HEURISTIC_AREA_PER_FACET: f64 = 0.01;

/// Fraction of the bounding-box volume the heuristic estimator reports.
pub const HEURISTIC_SHAPE_FACTOR: f64 = 0.3;

/// Bounding box and metrics of one vertex stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub bounding_box: BoundingBox,
    pub surface_area: f64,
    pub volume: f64,
}

/// Area/volume strategy.
///
/// `vertices` is grouped in facets of three; its length is a multiple of three.
pub trait MeshEstimator: Send + Sync {
    fn surface_area(&self, vertices: &[Vertex]) -> f64;
    fn volume(&self, vertices: &[Vertex], bounding_box: &BoundingBox) -> f64;
}

/// `faces × 0.01` area and `bbox volume × 0.3` volume.
///
/// These constants are what previously persisted results were computed
/// with; they are not physical estimates.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicEstimator;

impl MeshEstimator for HeuristicEstimator {
    fn surface_area(&self, vertices: &[Vertex]) -> f64 {
        (vertices.len() / 3) as f64 * HEURISTIC_AREA_PER_FACET
    }

    fn volume(&self, _vertices: &[Vertex], bounding_box: &BoundingBox) -> f64 {
        bounding_box.volume() * HEURISTIC_SHAPE_FACTOR
    }
}

/// Triangle-area sum and signed-tetrahedron volume.
///
/// The volume is only meaningful for closed meshes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactEstimator;

impl MeshEstimator for ExactEstimator {
    fn surface_area(&self, vertices: &[Vertex]) -> f64 {
        vertices
            .chunks_exact(3)
            .map(|f| {
                let a = sub(f[1], f[0]);
                let b = sub(f[2], f[0]);
                norm(cross(a, b)) / 2.0
            })
            .sum()
    }

    fn volume(&self, vertices: &[Vertex], _bounding_box: &BoundingBox) -> f64 {
        let signed: f64 = vertices
            .chunks_exact(3)
            .map(|f| dot(f[0].to_array(), cross(f[1].to_array(), f[2].to_array())))
            .sum();
        (signed / 6.0).abs()
    }
}

impl EstimatorMode {
    pub fn estimator(self) -> &'static dyn MeshEstimator {
        match self {
            EstimatorMode::Heuristic => &HeuristicEstimator,
            EstimatorMode::Exact => &ExactEstimator,
        }
    }
}

/// Componentwise min/max over all vertices in one pass.
///
/// NaN coordinates propagate into the bound of their axis. An empty stream
/// yields the origin box.
pub fn bounding_box(vertices: &[Vertex]) -> BoundingBox {
    let Some(first) = vertices.first() else {
        return BoundingBox::default();
    };
    let mut min = first.to_array();
    let mut max = min;
    for v in &vertices[1..] {
        let c = v.to_array();
        for i in 0..3 {
            min[i] = nan_min(min[i], c[i]);
            max[i] = nan_max(max[i], c[i]);
        }
    }
    BoundingBox::new(min, max)
}

/// Run the bounding-box pass and the selected estimator.
pub fn accumulate(vertices: &[Vertex], mode: EstimatorMode) -> Geometry {
    let bounding_box = bounding_box(vertices);
    let estimator = mode.estimator();
    Geometry {
        bounding_box,
        surface_area: estimator.surface_area(vertices),
        volume: estimator.volume(vertices, &bounding_box),
    }
}

// f64::min/max drop NaN; the bounding box must keep it.
fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

fn sub(a: Vertex, b: Vertex) -> [f64; 3] {
    [a.x - b.x, a.y - b.y, a.z - b.z]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}
