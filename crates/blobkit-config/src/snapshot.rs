use crate::model::{Checksum, KeyPath, Layer, ProvenanceEntry};
use crate::access;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    checksum: Checksum,
    issued_at_ms: i64,
    tree: serde_json::Value,
    provenance: Vec<ProvenanceEntry>,
}

impl ConfigSnapshot {
    pub fn from_tree(tree: serde_json::Value, provenance: Vec<ProvenanceEntry>) -> Self {
        let bytes = serde_json::to_vec(&tree).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let checksum = STANDARD_NO_PAD.encode(hasher.finalize());

        Self {
            checksum: Checksum(checksum),
            issued_at_ms: Utc::now().timestamp_millis(),
            tree,
            provenance,
        }
    }

    pub fn checksum(&self) -> &Checksum {
        &self.checksum
    }
    pub fn issued_at_ms(&self) -> i64 {
        self.issued_at_ms
    }
    pub fn tree(&self) -> &serde_json::Value {
        &self.tree
    }
    pub fn provenance(&self) -> &[ProvenanceEntry] {
        &self.provenance
    }

    pub fn get_raw(&self, path: &KeyPath) -> Option<&serde_json::Value> {
        access::get_path(&self.tree, &path.0)
    }

    /// Scalar at `path` rendered as text; `None` when absent, null or a table.
    pub fn get_string(&self, path: &KeyPath) -> Option<String> {
        match self.get_raw(path)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Highest layer that supplied `path`, if any source recorded it.
    pub fn origin_of(&self, path: &KeyPath) -> Option<Layer> {
        self.provenance
            .iter()
            .filter(|entry| entry.key == *path)
            .map(|entry| entry.layer)
            .max()
    }
}
