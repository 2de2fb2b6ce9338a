use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use stl_ingest::analyze_with;

use crate::context::{ingest, precheck, BridgeError, IngestContext};
use crate::messages::{ClientToIngest, IngestToClient};
use crate::record::RecordSink;

/// Dispatch a client message and return a response.
///
/// Never fails: errors become an `IngestToClient::Error`.
pub fn dispatch<S: RecordSink>(ctx: &mut IngestContext<S>, msg: ClientToIngest) -> IngestToClient {
    match handle_message(ctx, msg) {
        Ok(response) => response,
        Err(e) => IngestToClient::Error {
            message: e.to_string(),
            kind: e.kind().to_string(),
        },
    }
}

fn handle_message<S: RecordSink>(
    ctx: &mut IngestContext<S>,
    msg: ClientToIngest,
) -> Result<IngestToClient, BridgeError> {
    match msg {
        ClientToIngest::Precheck { file_name, data } => {
            let bytes = decode_payload(&data)?;
            Ok(IngestToClient::Validated {
                result: precheck(ctx, &file_name, &bytes),
            })
        }

        ClientToIngest::Ingest { file_name, data } => {
            let bytes = decode_payload(&data)?;
            let record = ingest(ctx, &file_name, &bytes)?;
            let sizing = record.sizing();
            Ok(IngestToClient::Stored { record, sizing })
        }

        ClientToIngest::Analyze { data } => {
            let bytes = decode_payload(&data)?;
            let mesh = analyze_with(&bytes, &ctx.config.analysis)?;
            Ok(IngestToClient::Analyzed { mesh })
        }
    }
}

fn decode_payload(data: &str) -> Result<Vec<u8>, BridgeError> {
    Ok(STANDARD.decode(data.trim())?)
}

/// Process a JSON message and return a JSON response.
///
/// The input should be a JSON-serialized `ClientToIngest` message.
/// Returns a JSON-serialized `IngestToClient` response.
pub fn process_message<S: RecordSink>(ctx: &mut IngestContext<S>, json_input: &str) -> String {
    let response = match serde_json::from_str::<ClientToIngest>(json_input) {
        Ok(msg) => dispatch(ctx, msg),
        Err(e) => {
            let err = BridgeError::Message {
                reason: e.to_string(),
            };
            IngestToClient::Error {
                message: err.to_string(),
                kind: err.kind().to_string(),
            }
        }
    };

    serde_json::to_string(&response).unwrap_or_else(|e| {
        format!(
            r#"{{"type":"Error","message":"Serialization failed: {}","kind":"message"}}"#,
            e
        )
    })
}
