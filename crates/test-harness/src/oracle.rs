//! Verification oracles: pure functions returning pass/fail verdicts.
//!
//! Each oracle returns an `OracleVerdict` with diagnostic detail, not panics.
//! This lets a test collect all failures in one pass.

use stl_types::{BoundingBox, MeshInfo, ValidationResult};

/// The result of a single oracle check.
#[derive(Debug, Clone)]
pub struct OracleVerdict {
    pub oracle_name: String,
    pub passed: bool,
    pub detail: String,
    pub value: Option<f64>,
}

impl OracleVerdict {
    fn pass(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: None,
        }
    }

    fn pass_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: Some(value),
        }
    }

    fn fail(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: None,
        }
    }

    fn fail_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: Some(value),
        }
    }
}

// ── MeshInfo Oracles ────────────────────────────────────────────────────────

/// Check `vertex_count == 3 * face_count`.
pub fn check_vertex_face_ratio(info: &MeshInfo) -> OracleVerdict {
    let expected = u64::from(info.face_count) * 3;
    if u64::from(info.vertex_count) == expected {
        OracleVerdict::pass(
            "vertex_face_ratio",
            format!("V({}) = 3 × F({})", info.vertex_count, info.face_count),
        )
    } else {
        OracleVerdict::fail(
            "vertex_face_ratio",
            format!(
                "V({}) != 3 × F({}) = {}",
                info.vertex_count, info.face_count, expected
            ),
        )
    }
}

/// Check that min <= max on every axis.
pub fn check_bounding_box_ordered(info: &MeshInfo) -> OracleVerdict {
    let bb = &info.bounding_box;
    if bb.is_ordered() {
        OracleVerdict::pass(
            "bounding_box_ordered",
            format!("min {:?} <= max {:?}", bb.min, bb.max),
        )
    } else {
        OracleVerdict::fail(
            "bounding_box_ordered",
            format!("min {:?} not <= max {:?}", bb.min, bb.max),
        )
    }
}

/// Check that a mesh with no facets reports the origin box.
pub fn check_empty_mesh_at_origin(info: &MeshInfo) -> OracleVerdict {
    if info.face_count != 0 {
        return OracleVerdict::pass(
            "empty_mesh_at_origin",
            format!("not empty ({} faces)", info.face_count),
        );
    }
    if info.bounding_box == BoundingBox::default() {
        OracleVerdict::pass("empty_mesh_at_origin", "empty mesh at origin".to_string())
    } else {
        OracleVerdict::fail(
            "empty_mesh_at_origin",
            format!("empty mesh has box {:?}", info.bounding_box),
        )
    }
}

/// Check the bounding box against expected corners within `tol`.
pub fn check_bounding_box(
    info: &MeshInfo,
    expected_min: [f64; 3],
    expected_max: [f64; 3],
    tol: f64,
) -> OracleVerdict {
    let bb = &info.bounding_box;
    // f64::max drops NaN; a NaN corner must fail the check.
    let max_dev = (0..3)
        .flat_map(|i| {
            [
                (bb.min[i] - expected_min[i]).abs(),
                (bb.max[i] - expected_max[i]).abs(),
            ]
        })
        .fold(0.0f64, |acc, d| {
            if acc.is_nan() || d.is_nan() {
                f64::NAN
            } else {
                acc.max(d)
            }
        });

    if max_dev <= tol {
        OracleVerdict::pass_val(
            "bounding_box",
            format!("box within {} of expected (max deviation {:.3e})", tol, max_dev),
            max_dev,
        )
    } else {
        OracleVerdict::fail_val(
            "bounding_box",
            format!(
                "box {:?}..{:?} deviates from {:?}..{:?} by {:.3e} (tol {})",
                bb.min, bb.max, expected_min, expected_max, max_dev, tol
            ),
            max_dev,
        )
    }
}

/// Check a scalar metric (area or volume) within a relative tolerance.
pub fn check_metric(name: &str, actual: f64, expected: f64, rel_tol: f64) -> OracleVerdict {
    let scale = expected.abs().max(1.0);
    let rel = (actual - expected).abs() / scale;
    if rel <= rel_tol {
        OracleVerdict::pass_val(
            name,
            format!("{} ≈ {} (rel err {:.3e})", actual, expected, rel),
            actual,
        )
    } else {
        OracleVerdict::fail_val(
            name,
            format!("{} != {} (rel err {:.3e} > {})", actual, expected, rel, rel_tol),
            actual,
        )
    }
}

// ── Gate Oracles ────────────────────────────────────────────────────────────

/// Check that two gate results reached the same accept/reject decision
/// with the same counts.
pub fn check_gate_agreement(a: &ValidationResult, b: &ValidationResult) -> OracleVerdict {
    if a == b {
        OracleVerdict::pass(
            "gate_agreement",
            format!("both {}", if a.is_valid { "accepted" } else { "rejected" }),
        )
    } else {
        OracleVerdict::fail("gate_agreement", format!("{:?} vs {:?}", a, b))
    }
}

/// Check that the gate's fast counts match a full analysis.
pub fn check_gate_matches_analysis(gate: &ValidationResult, info: &MeshInfo) -> OracleVerdict {
    if !gate.is_valid {
        return OracleVerdict::fail(
            "gate_matches_analysis",
            format!("gate rejected: {:?}", gate.error_message),
        );
    }
    if gate.face_count == info.face_count && gate.vertex_count == info.vertex_count {
        OracleVerdict::pass(
            "gate_matches_analysis",
            format!("F={} V={}", info.face_count, info.vertex_count),
        )
    } else {
        OracleVerdict::fail(
            "gate_matches_analysis",
            format!(
                "gate F={} V={}, analysis F={} V={}",
                gate.face_count, gate.vertex_count, info.face_count, info.vertex_count
            ),
        )
    }
}

/// Run the structural MeshInfo oracles.
pub fn run_all_mesh_checks(info: &MeshInfo) -> Vec<OracleVerdict> {
    vec![
        check_vertex_face_ratio(info),
        check_bounding_box_ordered(info),
        check_empty_mesh_at_origin(info),
    ]
}
