//! Plain-text reports of one STL analysis.
//!
//! Reports are structured text so a failing test prints something a person
//! can read without decoding JSON.

use std::fmt;

use serde::Serialize;
use stl_types::{MeshInfo, ValidationResult};

use crate::oracle::{run_all_mesh_checks, OracleVerdict};

/// Gate verdict, optional analysis, and oracle results for one file.
#[derive(Debug, Clone, Serialize)]
pub struct MeshReport {
    pub file_name: String,
    pub validation: ValidationResult,
    pub analysis: Option<MeshInfo>,
    #[serde(skip)]
    pub oracle_results: Vec<OracleVerdict>,
}

impl MeshReport {
    /// Build a report, running the mesh oracles when an analysis exists.
    pub fn new(
        file_name: impl Into<String>,
        validation: ValidationResult,
        analysis: Option<MeshInfo>,
    ) -> Self {
        let oracle_results = analysis.as_ref().map(run_all_mesh_checks).unwrap_or_default();
        Self {
            file_name: file_name.into(),
            validation,
            analysis,
            oracle_results,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.validation.is_valid && self.oracle_results.iter().all(|v| v.passed)
    }

    /// Format the report as text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== STL Report: {} ===\n\n", self.file_name));

        let v = &self.validation;
        let encoding = v
            .encoding
            .map(|e| format!("{:?}", e))
            .unwrap_or_else(|| "unknown".to_string());
        if v.is_valid {
            out.push_str(&format!(
                "Gate: ACCEPTED ({}) F={} V={}\n",
                encoding, v.face_count, v.vertex_count
            ));
        } else {
            out.push_str(&format!(
                "Gate: REJECTED ({}): {}\n",
                encoding,
                v.error_message.as_deref().unwrap_or("no reason given")
            ));
        }
        if v.format_ambiguous {
            out.push_str("  WARN: textual header on a size-consistent binary file\n");
        }

        if let Some(info) = &self.analysis {
            let bb = &info.bounding_box;
            out.push_str(&format!(
                "\nMesh: F={} V={}\n  Bounding box: [{:.4}, {:.4}, {:.4}] .. [{:.4}, {:.4}, {:.4}]\n",
                info.face_count,
                info.vertex_count,
                bb.min[0],
                bb.min[1],
                bb.min[2],
                bb.max[0],
                bb.max[1],
                bb.max[2],
            ));
            out.push_str(&format!(
                "  Surface area: {:.6}\n  Volume: {:.6}\n",
                info.surface_area, info.volume
            ));
        }

        if !self.oracle_results.is_empty() {
            out.push_str("\nOracles:\n");
            for verdict in &self.oracle_results {
                let status = if verdict.passed { "PASS" } else { "FAIL" };
                out.push_str(&format!(
                    "  [{}] {}: {}\n",
                    status, verdict.oracle_name, verdict.detail
                ));
            }
        }

        out
    }

    /// JSON form, as a persistence collaborator would see it.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for MeshReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
