//! Call sites of the STL validation gate.
//!
//! The producer side runs [`precheck`] before transferring a file; the
//! authoritative side runs [`ingest`] once the bytes have arrived. Both go
//! through the same `stl_ingest::validate`, so they accept and reject the
//! same inputs. Hosts talk to either side through the JSON messages in
//! [`messages`].

pub mod context;
pub mod dispatch;
pub mod messages;
pub mod record;

pub use context::{ingest, precheck, BridgeConfig, BridgeError, IngestContext};
pub use dispatch::{dispatch, process_message};
pub use messages::{ClientToIngest, IngestToClient};
pub use record::{MemorySink, ModelRecord, RecordSink, SimulationSizing, SinkError};
