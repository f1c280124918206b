use crate::app::ports::DocumentStorePort;
use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

/// Filesystem implementation of DocumentStorePort
pub struct FsDocumentStore;

#[async_trait]
impl DocumentStorePort for FsDocumentStore {
    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let bytes = tokio::fs::read(path).await?;
        debug!("read {} bytes from {}", bytes.len(), path.display());
        Ok(bytes)
    }

    async fn write(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }
        tokio::fs::write(path, bytes).await?;
        debug!("wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}
