use crate::{errors::StoreError, model::BlobItem};
use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};

pub type BlobReader = Box<dyn AsyncRead + Send + Unpin>;

/// Content is committed when the writer is shut down.
pub type BlobWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Container/blob operations of one storage account.
///
/// Callers validate names before calling in; backends only guard against
/// paths that would escape their root.
#[async_trait]
pub trait BlobProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn container_exists(&self, container: &str) -> Result<bool, StoreError>;

    async fn blob_exists(&self, container: &str, path: &str) -> Result<bool, StoreError>;

    async fn open_read(&self, container: &str, path: &str) -> Result<BlobReader, StoreError>;

    /// Creates or overwrites the blob.
    async fn open_write(&self, container: &str, path: &str) -> Result<BlobWriter, StoreError>;

    /// Every blob in the container, sorted by name.
    async fn list_blobs(&self, container: &str) -> Result<Vec<BlobItem>, StoreError>;
}
