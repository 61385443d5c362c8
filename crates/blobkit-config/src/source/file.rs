use super::*;
use crate::model::{KeyPath, Layer, ProvenanceEntry};
use crate::{
    access,
    errors::{io_provider_unavailable, schema_invalid},
};
use chrono::Utc;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reads json, yaml or toml files, picked by extension, and deep-merges them in order.
pub struct FileSource {
    pub paths: Vec<PathBuf>,
    /// When false, missing files are skipped instead of failing the load.
    pub required: bool,
}

impl FileSource {
    pub fn required(paths: Vec<PathBuf>) -> Self {
        Self {
            paths,
            required: true,
        }
    }

    pub fn optional(paths: Vec<PathBuf>) -> Self {
        Self {
            paths,
            required: false,
        }
    }
}

#[async_trait::async_trait]
impl Source for FileSource {
    fn id(&self) -> &'static str {
        "file"
    }

    async fn load(&self) -> Result<SourceSnapshot, ConfigError> {
        let mut merged = ConfigMap::new();
        let mut provenance = Vec::new();

        for path in &self.paths {
            if !self.required && !path.exists() {
                debug!(path = %path.display(), "optional configuration file not present");
                continue;
            }
            let content = std::fs::read_to_string(path).map_err(|e| {
                io_provider_unavailable("read file", &format!("{}: {e}", path.display()))
            })?;

            match parse(path, &content)? {
                Value::Object(obj) => {
                    let ts_ms = Utc::now().timestamp_millis();
                    provenance.extend(access::leaf_paths(&obj).into_iter().map(|key| {
                        ProvenanceEntry {
                            key: KeyPath(key),
                            source_id: format!("file:{}", path.display()),
                            layer: Layer::File,
                            ts_ms,
                        }
                    }));
                    access::merge_object(&mut merged, obj);
                }
                Value::Null => {}
                _ => {
                    warn!(path = %path.display(), "configuration file is not a table; ignored");
                }
            }
        }

        Ok(SourceSnapshot {
            map: merged,
            provenance,
        })
    }
}

fn parse(path: &Path, content: &str) -> Result<Value, ConfigError> {
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
    let value = match ext {
        "json" => serde_json::from_str::<Value>(content)
            .map_err(|e| schema_invalid("json parse", &e.to_string()))?,
        "yml" | "yaml" => {
            #[cfg(feature = "yaml")]
            {
                serde_yaml::from_str::<Value>(content)
                    .map_err(|e| schema_invalid("yaml parse", &e.to_string()))?
            }
            #[cfg(not(feature = "yaml"))]
            {
                return Err(schema_invalid("yaml parse", "yaml support not compiled in"));
            }
        }
        "toml" => {
            #[cfg(feature = "toml")]
            {
                let parsed: toml::Value = toml::from_str(content)
                    .map_err(|e| schema_invalid("toml parse", &e.to_string()))?;
                serde_json::to_value(parsed)
                    .map_err(|e| schema_invalid("toml convert", &e.to_string()))?
            }
            #[cfg(not(feature = "toml"))]
            {
                return Err(schema_invalid("toml parse", "toml support not compiled in"));
            }
        }
        other => {
            return Err(schema_invalid(
                "file format",
                &format!("unsupported extension '{other}' for {}", path.display()),
            ))
        }
    };
    Ok(value)
}
