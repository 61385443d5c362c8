//! Reads the first line of the input blob and stamps the output blob.

use crate::settings::StorageSettings;
use blobkit_errors::prelude::describe;
use blobkit_store::prelude::*;
use chrono::Local;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

/// `This was written at <local time>`.
pub fn timestamp_line() -> String {
    format!("This was written at {}", Local::now().format("%Y-%m-%d %H:%M:%S"))
}

pub struct Worker {
    settings: StorageSettings,
    accessor: FileAccessor,
}

impl Worker {
    pub fn new(settings: StorageSettings, accessor: FileAccessor) -> Self {
        Self { settings, accessor }
    }

    /// Accessor built from the settings' own connection string.
    pub fn from_settings(settings: StorageSettings) -> Self {
        let accessor = FileAccessor::new(settings.connection_string.clone());
        Self::new(settings, accessor)
    }

    pub fn settings(&self) -> &StorageSettings {
        &self.settings
    }

    pub fn accessor(&self) -> &FileAccessor {
        &self.accessor
    }

    pub async fn read_first_line(&self) -> Outcome<String> {
        let path = self.settings.input_blob_path.as_deref();
        self.first_line_of(path).await
    }

    pub async fn first_line_of(&self, path: Option<&str>) -> Outcome<String> {
        let header = format!("Unable to read from file '{}'.", user_friendly(path));
        let reader = match self.accessor.open_read(path).await.into_result() {
            Ok(reader) => reader,
            Err(errors) => return Outcome::failures(errors).with_header(header),
        };

        let mut line = String::new();
        let read = BufReader::new(reader).read_line(&mut line).await;
        match read {
            Ok(0) => Outcome::failure(format!("File '{}' is empty.", user_friendly(path))),
            Ok(_) => {
                let trimmed = line
                    .strip_prefix('\u{feff}')
                    .unwrap_or(&line)
                    .trim_end_matches(['\r', '\n'])
                    .to_string();
                debug!(path = debug_display(path), "read first line");
                Outcome::success(trimmed)
            }
            Err(err) => Outcome::failure(format!(
                "Error reading from file '{}': {}",
                user_friendly(path),
                describe(&err)
            ))
            .with_header(header),
        }
    }

    pub async fn write_timestamp(&self) -> Outcome<bool> {
        let path = self.settings.output_blob_path.as_deref();
        self.write_text(path, &timestamp_line()).await
    }

    pub async fn write_text(&self, path: Option<&str>, text: &str) -> Outcome<bool> {
        let header = format!("Unable to write to file '{}'.", user_friendly(path));
        let mut writer = match self.accessor.open_write(path).await.into_result() {
            Ok(writer) => writer,
            Err(errors) => return Outcome::failures(errors).with_header(header),
        };

        let written = async {
            writer.write_all(text.as_bytes()).await?;
            writer.shutdown().await
        };
        match written.await {
            Ok(()) => {
                info!(path = debug_display(path), bytes = text.len(), "blob written");
                Outcome::success(true)
            }
            Err(err) => Outcome::failure(format!(
                "Error writing to file '{}': {}",
                user_friendly(path),
                describe(&err)
            )),
        }
    }

    pub async fn list_container(&self) -> Outcome<Vec<BlobItem>> {
        self.accessor
            .list_files(self.settings.input_container())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn worker_at(root: &std::path::Path, input: &str, output: &str) -> Worker {
        Worker::from_settings(StorageSettings {
            connection_string: Some(format!("LocalRoot={}", root.display())),
            input_blob_path: Some(input.into()),
            output_blob_path: Some(output.into()),
        })
    }

    #[tokio::test]
    async fn reads_only_the_first_line() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("docs/in.txt"), "line one\r\nline two\n").unwrap();
        let worker = worker_at(dir.path(), "docs/in.txt", "docs/out.txt");

        let outcome = worker.read_first_line().await;
        assert_eq!(outcome.value().map(String::as_str), Some("line one"));
    }

    #[tokio::test]
    async fn byte_order_mark_is_not_part_of_the_line() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("docs/in.txt"), "\u{feff}hello\nworld\n").unwrap();
        let worker = worker_at(dir.path(), "docs/in.txt", "docs/out.txt");

        let outcome = worker.read_first_line().await;
        assert_eq!(outcome.value().map(String::as_str), Some("hello"));
    }

    #[tokio::test]
    async fn empty_file_is_a_failure() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("docs/in.txt"), "").unwrap();
        let worker = worker_at(dir.path(), "docs/in.txt", "docs/out.txt");

        let outcome = worker.read_first_line().await;
        assert_eq!(outcome.errors(), ["File 'docs/in.txt' is empty."]);
    }

    #[tokio::test]
    async fn read_failures_get_a_header() {
        let dir = tempdir().unwrap();
        let worker = worker_at(dir.path(), "docs/in.txt", "docs/out.txt");

        let outcome = worker.read_first_line().await;
        assert_eq!(
            outcome.errors(),
            [
                "Unable to read from file 'docs/in.txt'.",
                "Unable to read file: Container 'docs' not found for the specified storage account.",
            ]
        );
    }

    #[tokio::test]
    async fn missing_path_uses_placeholder() {
        let worker = Worker::from_settings(StorageSettings {
            connection_string: Some("LocalRoot=/tmp".into()),
            ..StorageSettings::default()
        });

        let outcome = worker.write_timestamp().await;
        assert_eq!(
            outcome.errors(),
            ["Unable to write to file '[VALUE NOT PROVIDED]'.", "No file path specified."]
        );
    }

    #[tokio::test]
    async fn timestamp_round_trips_through_storage() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("docs")).unwrap();
        let worker = worker_at(dir.path(), "docs/out.txt", "docs/out.txt");

        let written = worker.write_timestamp().await;
        assert_eq!(written.value(), Some(&true));

        let read = worker.read_first_line().await;
        let line = read.into_value().unwrap();
        assert!(line.starts_with("This was written at "));
    }
}
