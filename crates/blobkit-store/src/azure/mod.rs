use crate::{
    conn::ConnectionString,
    errors::StoreError,
    model::BlobItem,
    r#trait::{BlobProvider, BlobReader, BlobWriter},
};
use async_trait::async_trait;
use futures::TryStreamExt;
use object_store::azure::{AzureConfigKey, MicrosoftAzureBuilder};
use object_store::buffered::BufWriter;
use object_store::path::Path;
use object_store::ObjectStore;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::io::StreamReader;
use tracing::debug;

/// Azure Blob Storage through `object_store`, one client per container.
pub struct AzureBlobProvider {
    builder: MicrosoftAzureBuilder,
    stores: Mutex<HashMap<String, Arc<dyn ObjectStore>>>,
}

impl AzureBlobProvider {
    pub fn new(conn: &ConnectionString) -> Result<Self, StoreError> {
        let mut builder = MicrosoftAzureBuilder::new();
        if conn.use_development_storage {
            builder = builder.with_use_emulator(true);
        }
        if let Some(account) = &conn.account_name {
            builder = builder.with_account(account);
        }
        if let Some(key) = &conn.account_key {
            builder = builder.with_access_key(key);
        }
        if let Some(sas) = &conn.shared_access_signature {
            builder = builder.with_config(AzureConfigKey::SasKey, sas);
        }
        if let Some(endpoint) = conn.endpoint() {
            builder = builder.with_endpoint(endpoint);
        }
        if conn.allows_http() {
            builder = builder.with_allow_http(true);
        }
        Ok(Self {
            builder,
            stores: Mutex::new(HashMap::new()),
        })
    }

    fn store(&self, container: &str) -> Result<Arc<dyn ObjectStore>, StoreError> {
        let mut stores = self.stores.lock();
        if let Some(store) = stores.get(container) {
            return Ok(store.clone());
        }
        let store = self
            .builder
            .clone()
            .with_container_name(container)
            .build()
            .map_err(|err| StoreError::provider("configure Azure client", &err))?;
        let store: Arc<dyn ObjectStore> = Arc::new(store);
        stores.insert(container.to_string(), store.clone());
        Ok(store)
    }
}

/// Maps a validated blob path onto an `object_store` location, refusing any path
/// that would address a different blob (empty segments, leading or trailing `/`).
fn blob_location(path: &str) -> Result<Path, StoreError> {
    let location = Path::parse(path).map_err(|err| {
        StoreError::invalid_path(&format!("'{path}' cannot be addressed: {err}"))
    })?;
    if location.to_string() != path {
        return Err(StoreError::invalid_path(&format!(
            "'{path}' would be stored as '{location}'"
        )));
    }
    Ok(location)
}

fn is_missing_container(err: &object_store::Error) -> bool {
    matches!(err, object_store::Error::NotFound { .. })
        || err.to_string().contains("ContainerNotFound")
}

#[async_trait]
impl BlobProvider for AzureBlobProvider {
    fn name(&self) -> &'static str {
        "azure"
    }

    async fn container_exists(&self, container: &str) -> Result<bool, StoreError> {
        let store = self.store(container)?;
        debug!(container, "probing container");
        match store.list_with_delimiter(None).await {
            Ok(_) => Ok(true),
            Err(err) if is_missing_container(&err) => Ok(false),
            Err(err) => Err(StoreError::provider("list container", &err)),
        }
    }

    async fn blob_exists(&self, container: &str, path: &str) -> Result<bool, StoreError> {
        let store = self.store(container)?;
        match store.head(&blob_location(path)?).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(err) => Err(StoreError::provider("head blob", &err)),
        }
    }

    async fn open_read(&self, container: &str, path: &str) -> Result<BlobReader, StoreError> {
        let store = self.store(container)?;
        let result = match store.get(&blob_location(path)?).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => {
                return Err(StoreError::not_found(&format!("{container}/{path}")))
            }
            Err(err) => return Err(StoreError::provider("download blob", &err)),
        };
        let stream = result.into_stream().map_err(std::io::Error::other);
        Ok(Box::new(StreamReader::new(stream)))
    }

    async fn open_write(&self, container: &str, path: &str) -> Result<BlobWriter, StoreError> {
        let store = self.store(container)?;
        let location = blob_location(path)?;
        Ok(Box::new(BufWriter::new(store, location)))
    }

    async fn list_blobs(&self, container: &str) -> Result<Vec<BlobItem>, StoreError> {
        let store = self.store(container)?;
        let metas: Vec<_> = match store.list(None).try_collect().await {
            Ok(metas) => metas,
            Err(err) if is_missing_container(&err) => {
                return Err(StoreError::not_found(&format!("container {container}")))
            }
            Err(err) => return Err(StoreError::provider("list blobs", &err)),
        };
        let mut items: Vec<BlobItem> = metas
            .into_iter()
            .map(|meta| BlobItem {
                name: meta.location.to_string(),
                size: meta.size as u64,
                last_modified_ms: Some(meta.last_modified.timestamp_millis()),
            })
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }
}
