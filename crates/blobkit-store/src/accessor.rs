//! Maps `container/path` strings onto provider calls and reports every
//! expected failure as an [`Outcome`] error line.

use crate::{
    conn::{connect, ConnectionString},
    errors::StoreError,
    metrics::AccessStats,
    model::BlobItem,
    outcome::Outcome,
    path::{parse_blob_path, validate_container_name, PathParts, NO_FILE_PATH},
    r#trait::{BlobProvider, BlobReader, BlobWriter},
    text::non_blank,
};
use blobkit_errors::prelude::labels;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::{debug, warn};

pub const NO_CONNECTION_STRING: &str = "No storage account connection string specified.";
pub const NO_CONTAINER_NAME: &str = "No container name specified.";

#[derive(Clone, Copy)]
enum Access {
    Read,
    Write,
}

impl Access {
    fn header(self) -> &'static str {
        match self {
            Access::Read => "Unable to read file.",
            Access::Write => "Unable to write to file.",
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Access::Read => "Unable to read file",
            Access::Write => "Unable to write to file",
        }
    }
}

#[derive(Clone)]
pub struct FileAccessor {
    connection: Option<String>,
    provider: OnceCell<Arc<dyn BlobProvider>>,
    stats: AccessStats,
}

impl FileAccessor {
    /// The provider is resolved from the connection string on first use.
    pub fn new(connection_string: Option<String>) -> Self {
        Self {
            connection: connection_string,
            provider: OnceCell::new(),
            stats: AccessStats::default(),
        }
    }

    pub fn with_provider(provider: Arc<dyn BlobProvider>) -> Self {
        Self {
            connection: None,
            provider: OnceCell::with_value(provider),
            stats: AccessStats::default(),
        }
    }

    pub fn stats(&self) -> &AccessStats {
        &self.stats
    }

    pub async fn open_read(&self, path: Option<&str>) -> Outcome<BlobReader> {
        let outcome = self.read(path).await;
        self.stats.record_read(outcome.is_success());
        log_failure("read", path, &outcome);
        outcome
    }

    pub async fn open_write(&self, path: Option<&str>) -> Outcome<BlobWriter> {
        let outcome = self.write(path).await;
        self.stats.record_write(outcome.is_success());
        log_failure("write", path, &outcome);
        outcome
    }

    pub async fn list_files(&self, container: Option<&str>) -> Outcome<Vec<BlobItem>> {
        let outcome = self.list(container).await;
        self.stats.record_list(outcome.is_success());
        log_failure("list", container, &outcome);
        outcome
    }

    async fn read(&self, path: Option<&str>) -> Outcome<BlobReader> {
        let (provider, parts) = match self.prepare(path, Access::Read) {
            Ok(ready) => ready,
            Err(errors) => return Outcome::failures(errors),
        };
        let (container, blob) = (parts.container(), parts.blob_path());

        let checked = async {
            if !provider.container_exists(container).await? {
                return Ok(Some(missing_container(Access::Read, container)));
            }
            if !provider.blob_exists(container, blob).await? {
                return Ok(Some(format!(
                    "Unable to read file: File '{blob}' not found in container '{container}' for the specified storage account."
                )));
            }
            Ok::<_, StoreError>(None)
        };
        match checked.await {
            Ok(Some(missing)) => return Outcome::failure(missing),
            Ok(None) => {}
            Err(err) => return Outcome::failure(read_error(container, blob, &err)),
        }

        debug!(provider = provider.name(), container, blob, "opening blob for read");
        match provider.open_read(container, blob).await {
            Ok(reader) => Outcome::success(reader),
            Err(err) => Outcome::failure(read_error(container, blob, &err)),
        }
    }

    async fn write(&self, path: Option<&str>) -> Outcome<BlobWriter> {
        let (provider, parts) = match self.prepare(path, Access::Write) {
            Ok(ready) => ready,
            Err(errors) => return Outcome::failures(errors),
        };
        let (container, blob) = (parts.container(), parts.blob_path());

        match provider.container_exists(container).await {
            Ok(true) => {}
            Ok(false) => return Outcome::failure(missing_container(Access::Write, container)),
            Err(err) => return Outcome::failure(write_error(container, blob, &err)),
        }

        debug!(provider = provider.name(), container, blob, "opening blob for write");
        match provider.open_write(container, blob).await {
            Ok(writer) => Outcome::success(writer),
            Err(err) => Outcome::failure(write_error(container, blob, &err)),
        }
    }

    async fn list(&self, container: Option<&str>) -> Outcome<Vec<BlobItem>> {
        if let Err(missing) = self.ensure_connection() {
            return Outcome::failure(missing);
        }
        let Some(container) = non_blank(container) else {
            return Outcome::failure(NO_CONTAINER_NAME);
        };
        if let Err(invalid) = validate_container_name(container) {
            return Outcome::failures(invalid.messages()).with_header("Unable to list files.");
        }
        let provider = match self.provider() {
            Ok(provider) => provider,
            Err(err) => return Outcome::failure(err),
        };

        match provider.container_exists(container).await {
            Ok(true) => {}
            Ok(false) => {
                return Outcome::failure(format!(
                    "Unable to list files: Container '{container}' not found for the specified storage account."
                ))
            }
            Err(err) => return Outcome::failure(list_error(container, &err)),
        }

        debug!(provider = provider.name(), container, "listing blobs");
        match provider.list_blobs(container).await {
            Ok(items) => Outcome::success(items),
            Err(err) => Outcome::failure(list_error(container, &err)),
        }
    }

    fn prepare(
        &self,
        path: Option<&str>,
        access: Access,
    ) -> Result<(Arc<dyn BlobProvider>, PathParts), Vec<String>> {
        self.ensure_connection().map_err(|e| vec![e])?;
        let path = non_blank(path).ok_or_else(|| vec![NO_FILE_PATH.to_string()])?;
        let parts = parse_blob_path(path).map_err(|invalid| {
            let mut errors = vec![access.header().to_string()];
            errors.extend(invalid.messages());
            errors
        })?;
        let provider = self.provider().map_err(|e| vec![e])?;
        Ok((provider, parts))
    }

    fn ensure_connection(&self) -> Result<(), String> {
        if self.provider.get().is_some() || non_blank(self.connection.as_deref()).is_some() {
            Ok(())
        } else {
            Err(NO_CONNECTION_STRING.to_string())
        }
    }

    fn provider(&self) -> Result<Arc<dyn BlobProvider>, String> {
        self.provider
            .get_or_try_init(|| {
                let text = self.connection.as_deref().unwrap_or_default();
                connect(&ConnectionString::parse(text)?)
            })
            .cloned()
            .map_err(|err| {
                format!(
                    "Unable to connect to the storage account: {}",
                    err.details()
                )
            })
    }
}

impl std::fmt::Debug for FileAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileAccessor")
            .field("configured", &self.ensure_connection().is_ok())
            .field("provider", &self.provider.get().map(|p| p.name()))
            .field("stats", &self.stats)
            .finish()
    }
}

fn missing_container(access: Access, container: &str) -> String {
    format!(
        "{}: Container '{container}' not found for the specified storage account.",
        access.prefix()
    )
}

fn read_error(container: &str, blob: &str, err: &StoreError) -> String {
    log_store_error(container, err);
    format!(
        "Error reading blob file '{blob}' in container '{container}': {}",
        err.details()
    )
}

fn write_error(container: &str, blob: &str, err: &StoreError) -> String {
    log_store_error(container, err);
    format!(
        "Error writing to blob file '{blob}' in container '{container}': {}",
        err.details()
    )
}

fn list_error(container: &str, err: &StoreError) -> String {
    log_store_error(container, err);
    format!(
        "Error listing blob files in container '{container}': {}",
        err.details()
    )
}

fn log_store_error(container: &str, err: &StoreError) {
    debug!(
        container,
        labels = ?labels(&err.0),
        audit = ?err.0.to_audit(),
        "provider call failed"
    );
}

fn log_failure<T>(op: &'static str, target: Option<&str>, outcome: &Outcome<T>) {
    if outcome.has_errors() {
        warn!(
            op,
            target = target.unwrap_or_default(),
            errors = outcome.errors().len(),
            first = outcome.error().unwrap_or_default(),
            "storage operation failed"
        );
    }
}
