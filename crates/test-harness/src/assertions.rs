//! Assertion helpers with diagnostic output.
//!
//! Every failure names the context string and shows expected vs actual.

use stl_types::{MeshInfo, ValidationResult};

use crate::helpers::HarnessError;
use crate::oracle::OracleVerdict;

/// Assert exact face and vertex counts.
pub fn assert_counts(info: &MeshInfo, expected_faces: u32, ctx: &str) -> Result<(), HarnessError> {
    let expected_vertices = expected_faces * 3;
    if info.face_count == expected_faces && info.vertex_count == expected_vertices {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected F={} V={}, got F={} V={}",
                ctx, expected_faces, expected_vertices, info.face_count, info.vertex_count,
            ),
        })
    }
}

/// Assert the bounding box matches expected values within tolerance.
pub fn assert_bounding_box(
    info: &MeshInfo,
    expected_min: [f64; 3],
    expected_max: [f64; 3],
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let bb = &info.bounding_box;
    for i in 0..3 {
        if !((bb.min[i] - expected_min[i]).abs() <= tol) {
            return Err(HarnessError::AssertionFailed {
                detail: format!(
                    "[{}] bounding box min[{}]: expected {:.6}, got {:.6} (tol={})",
                    ctx, i, expected_min[i], bb.min[i], tol,
                ),
            });
        }
        if !((bb.max[i] - expected_max[i]).abs() <= tol) {
            return Err(HarnessError::AssertionFailed {
                detail: format!(
                    "[{}] bounding box max[{}]: expected {:.6}, got {:.6} (tol={})",
                    ctx, i, expected_max[i], bb.max[i], tol,
                ),
            });
        }
    }
    Ok(())
}

/// Assert the gate rejected the input with a message containing `needle`.
pub fn assert_rejected_with(
    result: &ValidationResult,
    needle: &str,
    ctx: &str,
) -> Result<(), HarnessError> {
    match (result.is_valid, &result.error_message) {
        (false, Some(msg)) if msg.contains(needle) => Ok(()),
        _ => Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected rejection mentioning {:?}, got {:?}",
                ctx, needle, result
            ),
        }),
    }
}

/// Turn the first failing verdict into an error.
pub fn assert_all_pass(verdicts: &[OracleVerdict]) -> Result<(), HarnessError> {
    match verdicts.iter().find(|v| !v.passed) {
        None => Ok(()),
        Some(v) => Err(HarnessError::OracleFailure {
            oracle: v.oracle_name.clone(),
            detail: v.detail.clone(),
        }),
    }
}
