/// Result alias for the ingestion engine.
pub type IngestResult<T> = Result<T, IngestError>;

/// Why an STL buffer was refused.
///
/// `analyze` returns one of these instead of a partial `MeshInfo`; the
/// validation gate turns them into a `ValidationResult` message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IngestError {
    /// Header unrecognized, buffer empty, or counts out of range.
    #[error("invalid STL format: {reason}")]
    FormatError { reason: String },

    /// The binary header declares more records than the buffer holds.
    #[error("STL file is corrupted or incomplete: expected at least {expected} bytes, got {actual}")]
    TruncatedFile { expected: u64, actual: u64 },

    /// Non-numeric coordinate token. Only raised under `NumericPolicy::Strict`;
    /// the default policy turns the token into NaN instead.
    #[error("malformed numeric token {token:?} on line {line}")]
    MalformedNumeric { line: usize, token: String },

    #[error("file size {size} bytes exceeds the limit of {limit} bytes")]
    SizeLimitExceeded { size: u64, limit: u64 },

    #[error("file {filename:?} does not have an .stl extension")]
    ExtensionMismatch { filename: String },
}

impl IngestError {
    pub fn format(reason: impl Into<String>) -> Self {
        Self::FormatError {
            reason: reason.into(),
        }
    }

    /// Short machine-readable name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FormatError { .. } => "format_error",
            Self::TruncatedFile { .. } => "truncated_file",
            Self::MalformedNumeric { .. } => "malformed_numeric",
            Self::SizeLimitExceeded { .. } => "size_limit_exceeded",
            Self::ExtensionMismatch { .. } => "extension_mismatch",
        }
    }
}
