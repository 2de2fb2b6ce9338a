//! Test harness for the STL ingestion engine.
//!
//! Provides synthetic STL encoders, fixture meshes, reference geometry and
//! verification oracles so tests can build inputs byte-for-byte and check
//! the engine's output against an independent computation.
//!
//! # Key Components
//!
//! - [`stl`]: Binary and ASCII STL encoders for synthetic facets
//! - [`helpers`]: Error type, fixture meshes, reference mesh math
//! - [`oracle`]: Verification functions returning pass/fail verdicts
//! - [`assertions`]: Assertion helpers with diagnostics
//! - [`report`]: Plain-text summaries of an analysis

pub mod assertions;
pub mod helpers;
pub mod oracle;
pub mod report;
pub mod stl;

pub use helpers::HarnessError;
pub use oracle::OracleVerdict;
pub use report::MeshReport;
