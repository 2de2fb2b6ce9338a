//! Tests for the validation gate.

use stl_ingest::{
    analyze, sniff, validate, validate_with_rejection, IngestError, SizeLimits, StlEncoding,
    DEFAULT_MAX_BYTES,
};
use test_harness::assertions::assert_rejected_with;
use test_harness::helpers::{two_facet_stack, unit_cube};
use test_harness::oracle::{check_gate_agreement, check_gate_matches_analysis};
use test_harness::stl::{
    export_ascii_stl, export_binary_stl, export_binary_stl_with_header, truncate_by,
};

#[test]
fn oversized_buffer_rejected_regardless_of_content() {
    let mut stl = export_binary_stl(&two_facet_stack(), "big").unwrap();
    stl.resize(DEFAULT_MAX_BYTES as usize + 1, 0);
    let (result, err) = validate_with_rejection("big.stl", &stl, &SizeLimits::default());
    assert!(!result.is_valid);
    assert!(matches!(
        err,
        Some(IngestError::SizeLimitExceeded {
            size: 104_857_601,
            limit: 104_857_600
        })
    ));
}

#[test]
fn buffer_at_exact_limit_is_accepted() {
    let limits = SizeLimits { max_bytes: 184 };
    let stl = export_binary_stl(&two_facet_stack(), "edge").unwrap();
    assert_eq!(stl.len(), 184);
    assert!(validate("edge.stl", &stl, &limits).is_valid);
}

#[test]
fn wrong_extension_rejected_before_size() {
    let stl = vec![0u8; 10];
    let (r, err) = validate_with_rejection("model.STLX", &stl, &SizeLimits { max_bytes: 1 });
    assert!(!r.is_valid);
    assert!(matches!(err, Some(IngestError::ExtensionMismatch { .. })));
}

#[test]
fn uppercase_extension_is_accepted() {
    let stl = export_binary_stl(&unit_cube(), "cube").unwrap();
    let r = validate("CUBE.STL", &stl, &SizeLimits::default());
    assert!(r.is_valid);
    assert_eq!(r.face_count, 12);
}

#[test]
fn truncated_binary_is_corrupted_or_incomplete() {
    let stl = truncate_by(export_binary_stl(&unit_cube(), "cube").unwrap(), 50);
    let r = validate("cube.stl", &stl, &SizeLimits::default());
    assert_rejected_with(&r, "corrupted or incomplete", "truncated cube").unwrap();
}

#[test]
fn gate_and_analysis_agree_on_counts() {
    for stl in [
        export_binary_stl(&unit_cube(), "cube").unwrap(),
        export_ascii_stl(&unit_cube(), "cube").into_bytes(),
        export_ascii_stl(&two_facet_stack(), "stack").into_bytes(),
    ] {
        let gate = validate("m.stl", &stl, &SizeLimits::default());
        let info = analyze(&stl).unwrap();
        let v = check_gate_matches_analysis(&gate, &info);
        assert!(v.passed, "{}", v.detail);
    }
}

#[test]
fn gate_and_analysis_agree_on_truncation() {
    let stl = truncate_by(export_binary_stl(&unit_cube(), "cube").unwrap(), 7);
    assert!(!validate("cube.stl", &stl, &SizeLimits::default()).is_valid);
    assert!(analyze(&stl).is_err());
}

#[test]
fn repeated_validation_is_identical() {
    let stl = export_ascii_stl(&two_facet_stack(), "stack").into_bytes();
    let before = validate("s.stl", &stl, &SizeLimits::default());
    let after = validate("s.stl", &stl.clone(), &SizeLimits::default());
    let v = check_gate_agreement(&before, &after);
    assert!(v.passed, "{}", v.detail);
}

#[test]
fn solid_header_binary_is_textual_and_flagged() {
    let stl = export_binary_stl_with_header(&unit_cube(), b"solid cube").unwrap();
    assert_eq!(sniff(&stl).encoding, StlEncoding::Ascii);

    let r = validate("cube.stl", &stl, &SizeLimits::default());
    assert!(r.is_valid);
    assert_eq!(r.encoding, Some(StlEncoding::Ascii));
    assert!(r.format_ambiguous);
    assert_eq!(r.face_count, 0);
}

#[test]
fn ascii_with_bad_header_line_is_rejected() {
    let text = export_ascii_stl(&unit_cube(), "cube").replacen("solid cube", " solidcube", 1);
    let r = validate("cube.stl", text.as_bytes(), &SizeLimits::default());
    assert!(!r.is_valid);
    assert!(r.error_message.unwrap().contains("solid <name>"));
}

#[test]
fn ascii_anonymous_solid_is_accepted() {
    let text = export_ascii_stl(&two_facet_stack(), "").replacen("solid \n", "solid\n", 1);
    let r = validate("anon.stl", text.as_bytes(), &SizeLimits::default());
    assert!(r.is_valid, "{:?}", r);
    assert_eq!(r.face_count, 2);
}

#[test]
fn leading_blank_lines_agree_with_sniffer_and_analysis() {
    // The sniffer reads six bytes, so one leading byte still leaves "solid" in view.
    let body = export_ascii_stl(&two_facet_stack(), "stack");
    let crlf = body.replace('\n', "\r\n");
    for text in [
        format!("\n{body}"),
        format!(" {body}"),
        format!("\t{body}"),
        format!("\n{crlf}"),
    ] {
        assert_eq!(sniff(text.as_bytes()).encoding, StlEncoding::Ascii);

        let gate = validate("stack.stl", text.as_bytes(), &SizeLimits::default());
        let info = analyze(text.as_bytes()).unwrap();
        let v = check_gate_matches_analysis(&gate, &info);
        assert!(v.passed, "{:?}: {}", &text[..8], v.detail);
        assert_eq!(gate.face_count, 2);
    }
}
