use super::*;
use crate::{
    access,
    errors::schema_invalid,
    model::{KeyPath, Layer, ProvenanceEntry},
};
use chrono::Utc;

/// `key=value` (or `--key=value`) override pairs, typically from repeated `--set` flags.
pub struct CliArgsSource {
    pub args: Vec<String>,
}

#[async_trait::async_trait]
impl Source for CliArgsSource {
    fn id(&self) -> &'static str {
        "cli"
    }

    async fn load(&self) -> Result<SourceSnapshot, ConfigError> {
        let mut map = ConfigMap::new();
        let mut provenance = Vec::new();

        for arg in &self.args {
            let pair = arg.strip_prefix("--").unwrap_or(arg);
            let Some((key, value)) = pair.split_once('=') else {
                return Err(schema_invalid(
                    "override",
                    &format!("expected key=value, got '{arg}'"),
                ));
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(schema_invalid("override", &format!("empty key in '{arg}'")));
            }
            access::set_path(&mut map, key, serde_json::Value::String(value.to_string()));
            provenance.push(ProvenanceEntry {
                key: KeyPath(key.into()),
                source_id: self.id().to_string(),
                layer: Layer::Cli,
                ts_ms: Utc::now().timestamp_millis(),
            });
        }

        Ok(SourceSnapshot { map, provenance })
    }
}
