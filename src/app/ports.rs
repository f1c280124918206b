use async_trait::async_trait;
use std::path::Path;

use crate::error::Result;

// Ingest-side ports
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpGetResult>;
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub status: u16,
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub content_length: u64,
}

/// Reads raw payloads and writes the JSON artifacts of a run
#[async_trait]
pub trait DocumentStorePort: Send + Sync {
    async fn read(&self, path: &Path) -> Result<Vec<u8>>;
    async fn write(&self, path: &Path, bytes: &[u8]) -> Result<()>;
}
