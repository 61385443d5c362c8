use crate::{
    errors::StoreError,
    model::BlobItem,
    r#trait::{BlobProvider, BlobReader, BlobWriter},
};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use tokio::fs;

/// Containers are subdirectories of `root`; blobs are files beneath them.
#[derive(Clone, Debug)]
pub struct FsBlobProvider {
    pub root: PathBuf,
}

impl FsBlobProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn container_path(&self, container: &str) -> Result<PathBuf, StoreError> {
        ensure_segment(container)?;
        Ok(self.root.join(container))
    }

    fn object_path(&self, container: &str, path: &str) -> Result<PathBuf, StoreError> {
        let mut object = self.container_path(container)?;
        for segment in path.split('/') {
            ensure_segment(segment)?;
            object.push(segment);
        }
        Ok(object)
    }
}

fn ensure_segment(segment: &str) -> Result<(), StoreError> {
    if segment.is_empty() || segment == "." || segment == ".." || segment.contains('\\') {
        return Err(StoreError::invalid_path(&format!(
            "segment '{segment}' cannot be mapped below the storage root"
        )));
    }
    Ok(())
}

async fn is_kind(path: &Path, want_dir: bool) -> Result<bool, StoreError> {
    match fs::metadata(path).await {
        Ok(meta) => Ok(if want_dir { meta.is_dir() } else { meta.is_file() }),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
        Err(err) => Err(StoreError::io(&format!("stat {}", path.display()), &err)),
    }
}

#[async_trait]
impl BlobProvider for FsBlobProvider {
    fn name(&self) -> &'static str {
        "fs"
    }

    async fn container_exists(&self, container: &str) -> Result<bool, StoreError> {
        is_kind(&self.container_path(container)?, true).await
    }

    async fn blob_exists(&self, container: &str, path: &str) -> Result<bool, StoreError> {
        is_kind(&self.object_path(container, path)?, false).await
    }

    async fn open_read(&self, container: &str, path: &str) -> Result<BlobReader, StoreError> {
        let object = self.object_path(container, path)?;
        match fs::File::open(&object).await {
            Ok(file) => Ok(Box::new(file)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(StoreError::not_found(&format!("{container}/{path}")))
            }
            Err(err) => Err(StoreError::io("open", &err)),
        }
    }

    async fn open_write(&self, container: &str, path: &str) -> Result<BlobWriter, StoreError> {
        let object = self.object_path(container, path)?;
        if let Some(parent) = object.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|err| StoreError::io("mkdirs", &err))?;
        }
        let file = fs::File::create(&object)
            .await
            .map_err(|err| StoreError::io("create", &err))?;
        Ok(Box::new(file))
    }

    async fn list_blobs(&self, container: &str) -> Result<Vec<BlobItem>, StoreError> {
        let base = self.container_path(container)?;
        let mut items = Vec::new();
        let mut pending = vec![base.clone()];
        while let Some(dir) = pending.pop() {
            let mut entries = match fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(err) if err.kind() == ErrorKind::NotFound && dir == base => {
                    return Err(StoreError::not_found(&format!("container {container}")));
                }
                Err(err) => return Err(StoreError::io("read_dir", &err)),
            };
            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|err| StoreError::io("read_dir", &err))?
            {
                let meta = entry
                    .metadata()
                    .await
                    .map_err(|err| StoreError::io("metadata", &err))?;
                let path = entry.path();
                if meta.is_dir() {
                    pending.push(path);
                    continue;
                }
                let Ok(relative) = path.strip_prefix(&base) else {
                    continue;
                };
                let name = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                let last_modified_ms = meta
                    .modified()
                    .ok()
                    .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                    .map(|d| d.as_millis() as i64);
                items.push(BlobItem {
                    name,
                    size: meta.len(),
                    last_modified_ms,
                });
            }
        }
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_segments_escaping_the_root() {
        let provider = FsBlobProvider::new("/srv/blobs");
        assert!(provider.object_path("docs", "../etc/passwd").is_err());
        assert!(provider.object_path("..", "file.txt").is_err());
        assert!(provider.object_path("docs", "a//b.txt").is_err());
        let ok = provider.object_path("docs", "a/b.txt").unwrap();
        assert_eq!(ok, PathBuf::from("/srv/blobs/docs/a/b.txt"));
    }
}
