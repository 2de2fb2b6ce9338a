//! STL geometry ingestion.
//!
//! Turns a raw STL buffer (textual or binary) into a [`MeshInfo`]: counts,
//! bounding box, approximate surface area and volume. The same crate holds
//! the validation gate used before and after a file is transferred.
//!
//! # Pipeline
//!
//! ```text
//! buffer → sniff → {ascii | binary} reader → vertices → accumulate → MeshInfo
//! ```
//!
//! Everything is synchronous and pure: the caller supplies the bytes, the
//! engine performs no I/O and keeps no state between calls.

pub mod accumulate;
pub mod analyze;
pub mod ascii;
pub mod binary;
pub mod config;
pub mod errors;
pub mod gate;
pub mod sniff;

pub use accumulate::{
    Geometry, MeshEstimator, HEURISTIC_AREA_PER_FACET, HEURISTIC_SHAPE_FACTOR,
};
pub use analyze::{analyze, analyze_with};
pub use config::{AnalysisConfig, EstimatorMode, NumericPolicy, SizeLimits, DEFAULT_MAX_BYTES};
pub use errors::{IngestError, IngestResult};
pub use gate::{validate, validate_with_rejection, GateStage};
pub use sniff::{sniff, Sniff};
pub use stl_types::{BoundingBox, Facet, MeshInfo, StlEncoding, ValidationResult, Vertex};
