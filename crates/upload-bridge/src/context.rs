use serde::{Deserialize, Serialize};
use stl_ingest::{analyze_with, validate, validate_with_rejection, AnalysisConfig, IngestError};
use stl_types::ValidationResult;
use tracing::{info, instrument, warn};

use crate::record::{MemorySink, ModelRecord, RecordSink, SinkError};

/// Host configuration for both call sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BridgeConfig {
    /// Limits, estimator mode and numeric policy passed to the engine.
    pub analysis: AnalysisConfig,
    /// Prefix of every storage path handed to the persistence collaborator.
    pub storage_prefix: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig::default(),
            storage_prefix: "uploads".to_string(),
        }
    }
}

impl BridgeConfig {
    /// Parse configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, BridgeError> {
        serde_json::from_str(json).map_err(|e| BridgeError::Config {
            reason: e.to_string(),
        })
    }
}

/// State owned by the host process for one bridge.
///
/// Holds configuration and the record sink. Record ids are generated per
/// record; there is no process-wide counter.
pub struct IngestContext<S: RecordSink = MemorySink> {
    pub config: BridgeConfig,
    pub sink: S,
}

impl<S: RecordSink> IngestContext<S> {
    pub fn new(config: BridgeConfig, sink: S) -> Self {
        Self { config, sink }
    }
}

impl IngestContext<MemorySink> {
    /// Context with default configuration and an in-memory sink.
    pub fn in_memory() -> Self {
        Self::new(BridgeConfig::default(), MemorySink::new())
    }
}

/// Errors raised on the authoritative side.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("{0}")]
    Ingest(#[from] IngestError),

    #[error("invalid payload encoding: {0}")]
    Payload(#[from] base64::DecodeError),

    #[error("record sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("invalid configuration: {reason}")]
    Config { reason: String },

    #[error("invalid message: {reason}")]
    Message { reason: String },
}

impl BridgeError {
    /// Short machine-readable kind, forwarded to clients.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Ingest(e) => e.kind(),
            Self::Payload(_) => "payload",
            Self::Sink(_) => "sink",
            Self::Config { .. } => "config",
            Self::Message { .. } => "message",
        }
    }
}

/// Producer-side check before transfer: the gate alone, no geometry pass.
///
/// Agrees with [`ingest`] on every gate rejection. Under
/// `NumericPolicy::Strict` the analysis in `ingest` can still refuse a file
/// this accepted, with `MalformedNumeric`, since coordinates are only
/// parsed there.
pub fn precheck<S: RecordSink>(
    ctx: &IngestContext<S>,
    file_name: &str,
    bytes: &[u8],
) -> ValidationResult {
    validate(file_name, bytes, &ctx.config.analysis.limits)
}

/// Authoritative ingest after transfer.
///
/// Runs the same gate as [`precheck`], then the full analysis, then hands a
/// new record to the sink.
#[instrument(skip(ctx, bytes), fields(bytes = bytes.len()))]
pub fn ingest<S: RecordSink>(
    ctx: &mut IngestContext<S>,
    file_name: &str,
    bytes: &[u8],
) -> Result<ModelRecord, BridgeError> {
    let (verdict, rejection) =
        validate_with_rejection(file_name, bytes, &ctx.config.analysis.limits);
    if let Some(err) = rejection {
        warn!(reason = err.kind(), "upload rejected by gate");
        return Err(err.into());
    }

    let mesh = analyze_with(bytes, &ctx.config.analysis)?;
    if verdict.format_ambiguous {
        warn!("textual header on a size-consistent binary file");
    }

    let record = ModelRecord::new(file_name, &ctx.config.storage_prefix, mesh);
    ctx.sink.store(record.clone())?;
    info!(
        id = %record.id,
        path = %record.storage_path,
        faces = record.mesh.face_count,
        "upload stored"
    );
    Ok(record)
}
