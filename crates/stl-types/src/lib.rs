//! Plain data model shared by the STL ingestion engine and its callers.
//!
//! Every value here is built fresh for one input buffer and handed out by
//! value; nothing is mutated after construction.

pub mod float;
pub mod mesh;
pub mod validation;
pub mod vertex;

pub use mesh::*;
pub use validation::*;
pub use vertex::*;
