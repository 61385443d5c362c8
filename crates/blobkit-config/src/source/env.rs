use super::*;
use crate::access;
use crate::model::{KeyPath, Layer, ProvenanceEntry};
use chrono::Utc;

/// Maps `PREFIX<sep>SECTION<sep>KEY=value` variables to `section.key`.
pub struct EnvSource {
    pub prefix: String,
    pub separator: String,
    /// Exact variable names mapped to dotted keys; they only fill keys no prefixed variable set.
    pub aliases: Vec<(String, String)>,
}

impl EnvSource {
    pub fn new(prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            separator: separator.into(),
            aliases: Vec::new(),
        }
    }

    pub fn alias(mut self, var: impl Into<String>, key: impl Into<String>) -> Self {
        self.aliases.push((var.into(), key.into()));
        self
    }

    fn normalize(&self, var: &str) -> Option<String> {
        let trimmed = var.strip_prefix(&self.prefix)?;
        let trimmed = trimmed.trim_start_matches(&self.separator);
        if trimmed.is_empty() {
            return None;
        }
        let normalized = trimmed
            .split(&self.separator)
            .filter(|seg| !seg.is_empty())
            .map(|seg| seg.to_ascii_lowercase())
            .collect::<Vec<_>>()
            .join(".");
        Some(normalized)
    }
}

#[async_trait::async_trait]
impl Source for EnvSource {
    fn id(&self) -> &'static str {
        "env"
    }

    async fn load(&self) -> Result<SourceSnapshot, ConfigError> {
        let mut map = ConfigMap::new();
        let mut provenance = Vec::new();
        let mut record = |map: &mut ConfigMap, key: String, value: String| {
            access::set_path(map, &key, serde_json::Value::String(value));
            provenance.push(ProvenanceEntry {
                key: KeyPath(key),
                source_id: self.id().to_string(),
                layer: Layer::Env,
                ts_ms: Utc::now().timestamp_millis(),
            });
        };

        let mut vars: Vec<(String, String)> = std::env::vars().collect();
        vars.sort();
        let mut seen = std::collections::HashSet::new();
        for (var, value) in vars {
            if let Some(key) = self.normalize(&var) {
                seen.insert(key.clone());
                record(&mut map, key, value);
            }
        }

        for (var, key) in &self.aliases {
            if seen.contains(key) {
                continue;
            }
            if let Ok(value) = std::env::var(var) {
                if !value.trim().is_empty() {
                    record(&mut map, key.clone(), value);
                }
            }
        }

        Ok(SourceSnapshot { map, provenance })
    }
}
