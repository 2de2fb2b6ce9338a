use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box, as componentwise min and max corners.
///
/// The default box sits at the origin, which is what an empty mesh reports.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(with = "crate::float::triple")]
    pub min: [f64; 3],
    #[serde(with = "crate::float::triple")]
    pub max: [f64; 3],
}

impl BoundingBox {
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    /// Width, height and depth of the box.
    pub fn extents(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn volume(&self) -> f64 {
        let [w, h, d] = self.extents();
        w * h * d
    }

    /// True when `min <= max` on every axis. NaN bounds are never ordered.
    pub fn is_ordered(&self) -> bool {
        (0..3).all(|i| self.min[i] <= self.max[i])
    }
}

/// Structured description of one STL buffer.
///
/// `vertex_count` is always `3 * face_count`: the format stores every
/// facet's corners independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshInfo {
    pub vertex_count: u32,
    pub face_count: u32,
    pub bounding_box: BoundingBox,
    /// Non-finite values serialize as strings; see [`crate::float`].
    #[serde(with = "crate::float::scalar")]
    pub surface_area: f64,
    #[serde(with = "crate::float::scalar")]
    pub volume: f64,
}

impl MeshInfo {
    /// A mesh with no facets: zero counts, origin box, zero metrics.
    pub fn empty() -> Self {
        Self {
            vertex_count: 0,
            face_count: 0,
            bounding_box: BoundingBox::default(),
            surface_area: 0.0,
            volume: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_box_is_origin() {
        let bb = BoundingBox::default();
        assert_eq!(bb.min, [0.0; 3]);
        assert_eq!(bb.max, [0.0; 3]);
        assert_eq!(bb.volume(), 0.0);
        assert!(bb.is_ordered());
    }

    #[test]
    fn extents_and_volume() {
        let bb = BoundingBox::new([-1.0, 0.0, 2.0], [1.0, 3.0, 6.0]);
        assert_eq!(bb.extents(), [2.0, 3.0, 4.0]);
        assert_eq!(bb.volume(), 24.0);
    }

    #[test]
    fn nan_bound_is_not_ordered() {
        let bb = BoundingBox::new([f64::NAN, 0.0, 0.0], [1.0, 1.0, 1.0]);
        assert!(!bb.is_ordered());
    }

    #[test]
    fn mesh_info_serializes_camel_case() {
        let info = MeshInfo {
            vertex_count: 6,
            face_count: 2,
            bounding_box: BoundingBox::new([0.0; 3], [1.0; 3]),
            surface_area: 0.02,
            volume: 0.3,
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["vertexCount"], 6);
        assert_eq!(json["faceCount"], 2);
        assert_eq!(json["boundingBox"]["max"][2], 1.0);
        assert!(json.get("surfaceArea").is_some());
        let back: MeshInfo = serde_json::from_value(json).unwrap();
        assert_eq!(back, info);
    }

    #[test]
    fn non_finite_metrics_survive_json() {
        let info = MeshInfo {
            vertex_count: 3,
            face_count: 1,
            bounding_box: BoundingBox::new([f64::NAN, 0.0, 0.0], [f64::NAN, 1.0, 1.0]),
            surface_area: 0.01,
            volume: f64::NAN,
        };
        let json = serde_json::to_string(&info).unwrap();
        assert!(!json.contains("null"), "{}", json);

        let back: MeshInfo = serde_json::from_str(&json).unwrap();
        assert!(back.bounding_box.min[0].is_nan());
        assert!(back.bounding_box.max[0].is_nan());
        assert_eq!(back.bounding_box.max[1], 1.0);
        assert!(back.volume.is_nan());
        assert_eq!(back.surface_area, 0.01);
    }
}
