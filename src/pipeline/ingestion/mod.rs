use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{info, instrument, warn};

use crate::app::ports::HttpClientPort;
use crate::error::{EtlError, Result};
use crate::observability::metrics;

/// Fetch the raw drinks payload, accepting only a `200 OK` response.
///
/// There is no retry; any other status is surfaced as `UnexpectedStatus`.
#[instrument(skip(http))]
pub async fn fetch_payload(http: &dyn HttpClientPort, url: &str) -> Result<Vec<u8>> {
    let resp = http.get(url).await?;
    if resp.status != 200 {
        warn!(status = resp.status, "Failed to fetch data");
        metrics::ingest::unexpected_status(resp.status);
        return Err(EtlError::UnexpectedStatus {
            url: url.to_string(),
            status: resp.status,
        });
    }

    info!(
        bytes = resp.bytes.len(),
        content_type = %resp.content_type,
        content_length = resp.content_length,
        "fetched drinks payload"
    );
    metrics::ingest::payload_fetched(resp.bytes.len());
    Ok(resp.bytes)
}

/// Hex-encoded SHA-256 of a payload, used to identify snapshots in logs
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Serialize a document with 4-space indentation
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut ser)?;
    out.push(b'\n');
    Ok(out)
}
