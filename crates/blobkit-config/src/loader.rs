use crate::{
    access,
    errors::ConfigError,
    model::{ConfigMap, KeyPath, Layer, ProvenanceEntry},
    snapshot::ConfigSnapshot,
    source::Source,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

pub struct Loader {
    pub defaults: ConfigMap,
    pub sources: Vec<Arc<dyn Source>>,
}

impl Loader {
    pub fn new(sources: Vec<Arc<dyn Source>>) -> Self {
        Self {
            defaults: ConfigMap::new(),
            sources,
        }
    }

    pub fn with_default(mut self, dotted: &str, value: serde_json::Value) -> Self {
        access::set_path(&mut self.defaults, dotted, value);
        self
    }

    pub async fn load_once(&self) -> Result<ConfigSnapshot, ConfigError> {
        let mut map = self.defaults.clone();
        let mut provenance = collect_default_provenance(&self.defaults);

        for source in &self.sources {
            let snapshot = source.load().await?;
            debug!(
                source = source.id(),
                keys = snapshot.provenance.len(),
                "merged configuration source"
            );
            access::merge_object(&mut map, snapshot.map);
            provenance.extend(snapshot.provenance);
        }

        Ok(ConfigSnapshot::from_tree(
            serde_json::Value::Object(map),
            provenance,
        ))
    }
}

fn collect_default_provenance(map: &ConfigMap) -> Vec<ProvenanceEntry> {
    access::leaf_paths(map)
        .into_iter()
        .map(|path| ProvenanceEntry {
            key: KeyPath(path),
            source_id: "defaults".into(),
            layer: Layer::Defaults,
            ts_ms: Utc::now().timestamp_millis(),
        })
        .collect()
}
