use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyPath(pub String);

impl KeyPath {
    pub fn new(path: impl Into<String>) -> Self {
        KeyPath(path.into())
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }
}

pub type ConfigValue = serde_json::Value;
pub type ConfigMap = serde_json::Map<String, serde_json::Value>;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProvenanceEntry {
    pub key: KeyPath,
    pub source_id: String,
    pub layer: Layer,
    pub ts_ms: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Layer {
    Defaults,
    File,
    Env,
    Cli,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checksum(pub String);
