//! The validation gate.
//!
//! One pure function serves both the pre-transfer check and the
//! authoritative check after upload, so the two cannot disagree.

use stl_types::{StlEncoding, ValidationResult};
use tracing::{debug, instrument};

use crate::ascii::{check_ascii_header, count_ascii_facets};
use crate::binary::check_binary_length;
use crate::config::SizeLimits;
use crate::errors::{IngestError, IngestResult};
use crate::sniff::{sniff, Sniff};

/// Required filename suffix, compared case-insensitively.
pub const STL_EXTENSION: &str = ".stl";

/// Where an input is in the gate. `Accepted` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStage {
    Received,
    Sniffed(StlEncoding),
    Parsed,
    Validated,
    Accepted,
    Rejected,
}

/// Successful pass through the gate.
#[derive(Debug, Clone, Copy)]
struct GateOutcome {
    sniff: Sniff,
    face_count: u32,
}

/// Validate `buffer` as the contents of `filename`.
///
/// Never fails: a rejection is reported through `is_valid` and
/// `error_message`.
pub fn validate(filename: &str, buffer: &[u8], limits: &SizeLimits) -> ValidationResult {
    validate_with_rejection(filename, buffer, limits).0
}

/// Like [`validate`], also returning the typed reason for a rejection.
#[instrument(skip(buffer, limits), fields(bytes = buffer.len()))]
pub fn validate_with_rejection(
    filename: &str,
    buffer: &[u8],
    limits: &SizeLimits,
) -> (ValidationResult, Option<IngestError>) {
    match run_gate(filename, buffer, limits) {
        Ok(outcome) => {
            debug!(stage = ?GateStage::Accepted, faces = outcome.face_count, "gate passed");
            (
                ValidationResult::accepted(
                    outcome.face_count,
                    outcome.sniff.encoding,
                    outcome.sniff.format_ambiguous,
                ),
                None,
            )
        }
        Err((err, encoding)) => {
            debug!(stage = ?GateStage::Rejected, reason = err.kind(), "gate rejected input");
            (ValidationResult::rejected(err.to_string(), encoding), Some(err))
        }
    }
}

type GateError = (IngestError, Option<StlEncoding>);

fn run_gate(filename: &str, buffer: &[u8], limits: &SizeLimits) -> Result<GateOutcome, GateError> {
    debug!(stage = ?GateStage::Received, "gate received input");
    check_extension(filename).map_err(|e| (e, None))?;
    check_size(buffer, limits).map_err(|e| (e, None))?;
    if buffer.is_empty() {
        return Err((IngestError::format("file is empty"), None));
    }

    let sniff = sniff(buffer);
    debug!(stage = ?GateStage::Sniffed(sniff.encoding), ambiguous = sniff.format_ambiguous);
    let tag = |e: IngestError| -> GateError { (e, Some(sniff.encoding)) };

    let faces = match sniff.encoding {
        StlEncoding::Binary => check_binary_length(buffer).map_err(tag)? as usize,
        StlEncoding::Ascii => {
            check_ascii_header(buffer).map_err(tag)?;
            count_ascii_facets(buffer)
        }
    };
    debug!(stage = ?GateStage::Parsed, faces);

    let face_count = u32::try_from(faces)
        .ok()
        .filter(|f| f.checked_mul(3).is_some())
        .ok_or_else(|| tag(IngestError::format(format!("facet count {faces} out of range"))))?;
    debug!(stage = ?GateStage::Validated);

    Ok(GateOutcome { sniff, face_count })
}

/// Filename must end in `.stl`, any case.
pub fn check_extension(filename: &str) -> IngestResult<()> {
    let ok = filename
        .len()
        .checked_sub(STL_EXTENSION.len())
        .and_then(|start| filename.get(start..))
        .is_some_and(|ext| ext.eq_ignore_ascii_case(STL_EXTENSION));
    if ok {
        Ok(())
    } else {
        Err(IngestError::ExtensionMismatch {
            filename: filename.to_string(),
        })
    }
}

/// Buffer must not exceed the configured ceiling.
pub fn check_size(buffer: &[u8], limits: &SizeLimits) -> IngestResult<()> {
    let size = buffer.len() as u64;
    if size > limits.max_bytes {
        return Err(IngestError::SizeLimitExceeded {
            size,
            limit: limits.max_bytes,
        });
    }
    Ok(())
}
