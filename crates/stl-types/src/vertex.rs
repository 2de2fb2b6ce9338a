use serde::{Deserialize, Serialize};

/// A mesh vertex in model space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vertex {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// True when no coordinate is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 3]> for Vertex {
    fn from(c: [f64; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl From<[f32; 3]> for Vertex {
    fn from(c: [f32; 3]) -> Self {
        Self::new(f64::from(c[0]), f64::from(c[1]), f64::from(c[2]))
    }
}

/// One triangular surface element.
///
/// STL never shares vertices between facets, so each facet owns its own
/// three copies.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Facet {
    pub vertices: [Vertex; 3],
}

impl Facet {
    pub const fn new(a: Vertex, b: Vertex, c: Vertex) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Build a facet from three coordinate triples.
    pub fn from_coords(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> Self {
        Self::new(a.into(), b.into(), c.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_from_f32_widens_exactly() {
        let v = Vertex::from([0.5f32, -1.25, 3.0]);
        assert_eq!(v, Vertex::new(0.5, -1.25, 3.0));
    }

    #[test]
    fn nan_vertex_is_not_finite() {
        assert!(!Vertex::new(f64::NAN, 0.0, 0.0).is_finite());
        assert!(Vertex::new(1.0, 2.0, 3.0).is_finite());
    }
}
