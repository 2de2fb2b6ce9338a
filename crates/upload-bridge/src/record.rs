use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stl_types::MeshInfo;
use uuid::Uuid;

/// One accepted upload, as handed to the persistence collaborator.
///
/// The `MeshInfo` fields are flattened so they are stored verbatim next to
/// the file path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelRecord {
    pub id: Uuid,
    pub file_name: String,
    pub storage_path: String,
    #[serde(flatten)]
    pub mesh: MeshInfo,
    pub created: DateTime<Utc>,
}

impl ModelRecord {
    /// Create a record with a fresh id and the current timestamp.
    pub fn new(file_name: &str, storage_prefix: &str, mesh: MeshInfo) -> Self {
        let id = Uuid::new_v4();
        let base = base_name(file_name);
        let prefix = storage_prefix.trim_end_matches('/');
        Self {
            id,
            file_name: base.to_string(),
            storage_path: format!("{}/{}/{}", prefix, id, base),
            mesh,
            created: Utc::now(),
        }
    }

    pub fn sizing(&self) -> SimulationSizing {
        SimulationSizing::from(&self.mesh)
    }
}

/// Last path component of a client-supplied filename.
fn base_name(file_name: &str) -> &str {
    file_name.rsplit(['/', '\\']).next().unwrap_or(file_name)
}

/// Sizing inputs for the simulation collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSizing {
    pub vertex_count: u32,
    pub face_count: u32,
}

impl From<&MeshInfo> for SimulationSizing {
    fn from(mesh: &MeshInfo) -> Self {
        Self {
            vertex_count: mesh.vertex_count,
            face_count: mesh.face_count,
        }
    }
}

/// Errors from a record sink.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SinkError {
    #[error("record {id} already stored")]
    Duplicate { id: Uuid },

    #[error("sink unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Where accepted records go. Implemented by the host's persistence layer.
pub trait RecordSink {
    fn store(&mut self, record: ModelRecord) -> Result<(), SinkError>;
}

/// Sink that keeps records in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<ModelRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordSink for MemorySink {
    fn store(&mut self, record: ModelRecord) -> Result<(), SinkError> {
        if self.records.iter().any(|r| r.id == record.id) {
            return Err(SinkError::Duplicate { id: record.id });
        }
        self.records.push(record);
        Ok(())
    }
}
