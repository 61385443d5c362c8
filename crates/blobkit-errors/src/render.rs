use crate::{
    kind::ErrorKind,
    model::{CauseEntry, ErrorObj},
    retry::RetryClass,
    severity::Severity,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Serialize, Deserialize)]
pub struct PublicErrorView {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuditErrorView {
    pub code: String,
    pub kind: String,
    pub retryable: String,
    pub severity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_dev: Option<String>,
    pub meta: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause_chain: Option<Vec<CauseEntry>>,
}

impl ErrorObj {
    pub fn to_public(&self) -> PublicErrorView {
        PublicErrorView {
            code: self.code.0.to_string(),
            message: self.message_user.clone(),
        }
    }

    pub fn to_audit(&self) -> AuditErrorView {
        AuditErrorView {
            code: self.code.0.to_string(),
            kind: ErrorKind::as_str(self.kind).to_string(),
            retryable: RetryClass::as_str(self.retryable).to_string(),
            severity: Severity::as_str(self.severity).to_string(),
            message_dev: self.message_dev.clone(),
            meta: self.meta.clone(),
            cause_chain: self.cause_chain.clone(),
        }
    }
}
