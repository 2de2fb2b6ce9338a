use serde::{Deserialize, Serialize};

/// The two STL encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StlEncoding {
    /// Line-oriented text starting with `solid`.
    Ascii,
    /// 80-byte header, u32 count, 50-byte records.
    Binary,
}

/// Outcome of the validation gate.
///
/// Rejections are data, not errors: `error_message` carries the
/// user-facing reason and the counts are zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub face_count: u32,
    pub vertex_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Encoding picked by the sniffer, if the gate got that far.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<StlEncoding>,
    /// Classified textual, yet the bytes also form a size-consistent
    /// binary file.
    #[serde(default)]
    pub format_ambiguous: bool,
}

impl ValidationResult {
    pub fn accepted(face_count: u32, encoding: StlEncoding, format_ambiguous: bool) -> Self {
        Self {
            is_valid: true,
            face_count,
            vertex_count: face_count.saturating_mul(3),
            error_message: None,
            encoding: Some(encoding),
            format_ambiguous,
        }
    }

    pub fn rejected(message: impl Into<String>, encoding: Option<StlEncoding>) -> Self {
        Self {
            is_valid: false,
            face_count: 0,
            vertex_count: 0,
            error_message: Some(message.into()),
            encoding,
            format_ambiguous: false,
        }
    }
}
