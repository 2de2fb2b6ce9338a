use serde::{Deserialize, Serialize};
use stl_types::{MeshInfo, ValidationResult};

use crate::record::{ModelRecord, SimulationSizing};

/// Messages from a client (uploader UI or upload handler) to the bridge.
/// Serialized as JSON; file bytes travel base64-encoded in `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientToIngest {
    /// Fast gate check before the file is transferred.
    Precheck { file_name: String, data: String },
    /// Authoritative gate, full analysis and storage of the record.
    Ingest { file_name: String, data: String },
    /// Full analysis without storing anything.
    Analyze { data: String },
}

/// Messages from the bridge back to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum IngestToClient {
    /// Gate verdict. Rejections arrive here too, with `is_valid = false`.
    Validated { result: ValidationResult },

    /// The upload was accepted and stored.
    Stored {
        record: ModelRecord,
        sizing: SimulationSizing,
    },

    /// Analysis result for an `Analyze` request.
    Analyzed { mesh: MeshInfo },

    /// The request failed.
    Error { message: String, kind: String },
}
