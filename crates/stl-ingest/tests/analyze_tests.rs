//! End-to-end tests for `analyze` over synthetic STL files.

use approx::assert_relative_eq;
use stl_ingest::{
    analyze, analyze_with, validate, AnalysisConfig, IngestError, MeshInfo, NumericPolicy,
    SizeLimits,
};
use test_harness::assertions::{assert_all_pass, assert_bounding_box, assert_counts};
use test_harness::helpers::{
    box_facets, disc_fan, reference_bounding_box, reference_surface_area, reference_volume,
    two_facet_stack, unit_cube,
};
use test_harness::oracle::{check_metric, run_all_mesh_checks};
use test_harness::MeshReport;
use test_harness::stl::{export_ascii_stl, export_binary_stl, export_binary_stl_with_header, truncate_by};

// ── Reference Scenario ──────────────────────────────────────────────────────

#[test]
fn two_facet_binary_scenario() {
    let stl = export_binary_stl(&two_facet_stack(), "stack").unwrap();
    let info = analyze(&stl).unwrap();

    assert_eq!(info.face_count, 2);
    assert_eq!(info.vertex_count, 6);
    assert_eq!(info.bounding_box.min, [0.0, 0.0, 0.0]);
    assert_eq!(info.bounding_box.max, [1.0, 1.0, 1.0]);
    assert_relative_eq!(info.surface_area, 0.02, epsilon = 1e-12);
    assert_relative_eq!(info.volume, 0.3, epsilon = 1e-12);
}

#[test]
fn two_facet_ascii_scenario_matches_binary() {
    let facets = two_facet_stack();
    let from_ascii = analyze(export_ascii_stl(&facets, "stack").as_bytes()).unwrap();
    let from_binary = analyze(&export_binary_stl(&facets, "stack").unwrap()).unwrap();
    assert_eq!(from_ascii, from_binary);
}

// ── Binary Decoding ─────────────────────────────────────────────────────────

#[test]
fn zero_facet_binary_is_empty_mesh() {
    let stl = export_binary_stl(&[], "empty").unwrap();
    let info = analyze(&stl).unwrap();
    assert_eq!(info, MeshInfo::empty());
    assert_all_pass(&run_all_mesh_checks(&info)).unwrap();
}

#[test]
fn truncated_binary_is_rejected_not_partially_read() {
    let stl = export_binary_stl(&unit_cube(), "cube").unwrap();
    let full_len = stl.len() as u64;
    let err = analyze(&truncate_by(stl, 1)).unwrap_err();
    assert_eq!(
        err,
        IngestError::TruncatedFile {
            expected: full_len,
            actual: full_len - 1,
        }
    );
}

#[test]
fn binary_with_solid_header_is_read_as_text() {
    // Header says "solid" but the body is binary: the sniffer trusts the
    // header, the text reader finds no vertex lines.
    let stl = export_binary_stl_with_header(&unit_cube(), b"solid exported-by-cad").unwrap();
    let info = analyze(&stl).unwrap();
    assert_eq!(info.face_count, 0);
}

#[test]
fn negative_and_offset_box() {
    let facets = box_facets([-10.0, -2.5, 3.0], [4.0, 7.5, 9.0]);
    let info = analyze(&export_binary_stl(&facets, "b").unwrap()).unwrap();
    assert_counts(&info, 12, "offset box").unwrap();
    assert_bounding_box(&info, [-10.0, -2.5, 3.0], [4.0, 7.5, 9.0], 0.0, "offset box").unwrap();
    assert_relative_eq!(info.volume, 14.0 * 10.0 * 6.0 * 0.3, max_relative = 1e-12);
}

// ── Estimator Modes ─────────────────────────────────────────────────────────

#[test]
fn exact_mode_integrates_closed_box() {
    let facets = box_facets([0.0, 0.0, 0.0], [2.0, 3.0, 4.0]);
    let stl = export_binary_stl(&facets, "box").unwrap();
    let info = analyze_with(&stl, &AnalysisConfig::exact()).unwrap();

    let area = check_metric("surface_area", info.surface_area, reference_surface_area(&facets), 1e-9);
    let volume = check_metric("volume", info.volume, reference_volume(&facets), 1e-9);
    assert!(area.passed, "{}", area.detail);
    assert!(volume.passed, "{}", volume.detail);
    assert_relative_eq!(info.volume, 24.0, max_relative = 1e-9);
}

#[test]
fn exact_mode_area_of_open_fan() {
    let facets = disc_fan(64, 2.0);
    let info = analyze_with(export_ascii_stl(&facets, "fan").as_bytes(), &AnalysisConfig::exact())
        .unwrap();
    assert_relative_eq!(info.surface_area, reference_surface_area(&facets), max_relative = 1e-9);
}

#[test]
fn heuristic_is_the_default() {
    let stl = export_binary_stl(&unit_cube(), "cube").unwrap();
    assert_eq!(analyze(&stl).unwrap(), analyze_with(&stl, &AnalysisConfig::heuristic()).unwrap());
    assert_relative_eq!(analyze(&stl).unwrap().surface_area, 0.12, epsilon = 1e-12);
}

// ── ASCII Decoding ──────────────────────────────────────────────────────────

#[test]
fn ascii_bounding_box_matches_reference() {
    let facets = box_facets([-0.125, 1.5, -3.0], [0.5, 2.75, 8.0]);
    let info = analyze(export_ascii_stl(&facets, "box").as_bytes()).unwrap();
    let bb = reference_bounding_box(&facets);
    assert_eq!(info.bounding_box, bb);
}

#[test]
fn ascii_garbage_fails_soft_by_default() {
    let text = "solid s\nvertex 0 0 0\nvertex one 1 1\nvertex 2 2 2\nendsolid s\n";
    let info = analyze(text.as_bytes()).unwrap();
    assert_eq!(info.face_count, 1);
    assert!(info.bounding_box.min[0].is_nan());
    assert!(info.bounding_box.max[0].is_nan());
    assert_eq!(info.bounding_box.max[1], 2.0);
}

#[test]
fn ascii_garbage_fails_hard_when_strict() {
    let text = "solid s\nvertex 0 0 0\nvertex one 1 1\nvertex 2 2 2\nendsolid s\n";
    let err = analyze_with(text.as_bytes(), &AnalysisConfig::strict()).unwrap_err();
    assert_eq!(
        err,
        IngestError::MalformedNumeric {
            line: 3,
            token: "one".to_string()
        }
    );
}

#[test]
fn strict_policy_accepts_clean_files() {
    let cfg = AnalysisConfig {
        numeric_policy: NumericPolicy::Strict,
        ..AnalysisConfig::exact()
    };
    let info = analyze_with(export_ascii_stl(&unit_cube(), "c").as_bytes(), &cfg).unwrap();
    assert_relative_eq!(info.volume, 1.0, max_relative = 1e-12);
}

#[test]
fn size_limit_from_config() {
    let stl = export_binary_stl(&unit_cube(), "cube").unwrap();
    let cfg = AnalysisConfig::default().with_limits(SizeLimits { max_bytes: 100 });
    assert!(matches!(
        analyze_with(&stl, &cfg),
        Err(IngestError::SizeLimitExceeded { limit: 100, .. })
    ));
}

// ── Fixture Sweep ───────────────────────────────────────────────────────────

#[test]
fn fixture_sweep_passes_gate_and_oracles() {
    let fixtures = [
        ("stack", two_facet_stack()),
        ("cube", unit_cube()),
        ("slab", box_facets([-3.0, -3.0, 0.0], [3.0, 3.0, 0.5])),
        ("fan", disc_fan(24, 1.5)),
        ("empty", Vec::new()),
    ];
    for (name, facets) in fixtures {
        for (suffix, bytes) in [
            ("bin", export_binary_stl(&facets, name).unwrap()),
            ("txt", export_ascii_stl(&facets, name).into_bytes()),
        ] {
            let file_name = format!("{name}-{suffix}.stl");
            let gate = validate(&file_name, &bytes, &SizeLimits::default());
            let info = analyze(&bytes).unwrap();
            let report = MeshReport::new(file_name, gate, Some(info));
            assert!(report.all_passed(), "{}", report);
        }
    }
}

#[test]
fn fail_soft_mesh_report_flags_nan_box() {
    let text = "solid s\nvertex nan? 0 0\nvertex 1 1 1\nvertex 2 0 0\nendsolid s\n";
    let gate = validate("soft.stl", text.as_bytes(), &SizeLimits::default());
    let info = analyze(text.as_bytes()).unwrap();
    let report = MeshReport::new("soft.stl", gate, Some(info));
    assert!(!report.all_passed());
    assert!(report.to_text().contains("[FAIL] bounding_box_ordered"), "{}", report);
}
