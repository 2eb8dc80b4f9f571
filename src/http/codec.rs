//! JSON encoding of request snapshots.

use serde::Serialize;

use crate::http::snapshot::RequestSnapshot;

/// A snapshot could not be rendered as JSON.
#[derive(Debug, thiserror::Error)]
#[error("failed to encode request metadata: {0}")]
pub struct EncodingError(#[from] serde_json::Error);

/// Encode a snapshot as compact JSON, fields in declaration order.
pub fn encode<T: Serialize + ?Sized>(snapshot: &T) -> Result<String, EncodingError> {
    Ok(serde_json::to_string(snapshot)?)
}

#[derive(Serialize)]
struct Delayed<'a> {
    #[serde(flatten)]
    snapshot: &'a RequestSnapshot,
    delay: u64,
}

/// Encode a snapshot with a trailing `delay` field, in seconds.
pub fn encode_with_delay(
    snapshot: &RequestSnapshot,
    delay_secs: u64,
) -> Result<String, EncodingError> {
    encode(&Delayed {
        snapshot,
        delay: delay_secs,
    })
}
