use crate::{
    code::{spec_of, ErrorCode},
    kind::ErrorKind,
    retry::RetryClass,
    severity::Severity,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CauseEntry {
    pub code: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
}

impl CauseEntry {
    pub fn new(code: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            summary: summary.into(),
            meta: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorObj {
    pub code: ErrorCode,
    pub kind: ErrorKind,
    pub message_user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_dev: Option<String>,
    pub retryable: RetryClass,
    pub severity: Severity,
    #[serde(default)]
    pub meta: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause_chain: Option<Vec<CauseEntry>>,
}

impl ErrorObj {
    /// User message followed by the developer detail and every cause summary.
    pub fn detailed(&self) -> String {
        let mut text = self.message_user.clone();
        if let Some(dev) = &self.message_dev {
            text.push_str(": ");
            text.push_str(dev);
        }
        for cause in self.cause_chain.iter().flatten() {
            text.push_str("  [caused by: ");
            text.push_str(&cause.summary);
            text.push(']');
        }
        text
    }
}

impl fmt::Display for ErrorObj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message_user, self.code)
    }
}

pub struct ErrorBuilder {
    code: ErrorCode,
    message_user: Option<String>,
    message_dev: Option<String>,
    meta: Map<String, Value>,
    cause_chain: Vec<CauseEntry>,
}

impl ErrorBuilder {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message_user: None,
            message_dev: None,
            meta: Map::new(),
            cause_chain: Vec::new(),
        }
    }

    pub fn user_msg(mut self, message: impl Into<String>) -> Self {
        self.message_user = Some(message.into());
        self
    }

    pub fn dev_msg(mut self, message: impl Into<String>) -> Self {
        self.message_dev = Some(message.into());
        self
    }

    pub fn meta_kv(mut self, key: impl Into<String>, value: Value) -> Self {
        self.meta.insert(key.into(), value);
        self
    }

    pub fn cause(mut self, cause: CauseEntry) -> Self {
        self.cause_chain.push(cause);
        self
    }

    pub fn causes(mut self, causes: impl IntoIterator<Item = CauseEntry>) -> Self {
        self.cause_chain.extend(causes);
        self
    }

    pub fn build(self) -> ErrorObj {
        let spec = spec_of(self.code);
        ErrorObj {
            code: self.code,
            kind: spec.kind,
            message_user: self
                .message_user
                .unwrap_or_else(|| spec.default_user_msg.to_string()),
            message_dev: self.message_dev,
            retryable: spec.retryable,
            severity: spec.severity,
            meta: self.meta,
            cause_chain: if self.cause_chain.is_empty() {
                None
            } else {
                Some(self.cause_chain)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::codes;

    #[test]
    fn builder_falls_back_to_registered_message() {
        let err = ErrorBuilder::new(codes::STORAGE_NOT_FOUND).build();
        assert_eq!(err.message_user, "Resource not found.");
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(err.cause_chain.is_none());
    }

    #[test]
    fn detailed_includes_dev_message_and_causes() {
        let err = ErrorBuilder::new(codes::PROVIDER_UNAVAILABLE)
            .user_msg("Upload failed.")
            .dev_msg("put_object")
            .cause(CauseEntry::new("io", "connection reset"))
            .build();
        assert_eq!(
            err.detailed(),
            "Upload failed.: put_object  [caused by: connection reset]"
        );
        assert_eq!(err.to_string(), "Upload failed. (PROVIDER.UNAVAILABLE)");
    }
}
