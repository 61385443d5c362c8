//! Storage account connection strings (`Key=Value;Key=Value`).

use crate::{errors::StoreError, r#trait::BlobProvider};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConnectionString {
    pub protocol: Option<String>,
    pub account_name: Option<String>,
    pub account_key: Option<String>,
    pub endpoint_suffix: Option<String>,
    pub blob_endpoint: Option<String>,
    pub shared_access_signature: Option<String>,
    pub use_development_storage: bool,
    /// Selects the local-directory backend rooted at this path.
    pub local_root: Option<PathBuf>,
}

impl ConnectionString {
    pub fn parse(text: &str) -> Result<Self, StoreError> {
        text.parse()
    }

    pub fn local(root: impl Into<PathBuf>) -> Self {
        Self {
            local_root: Some(root.into()),
            ..Self::default()
        }
    }

    pub fn is_local(&self) -> bool {
        self.local_root.is_some()
    }

    /// `http` only when the protocol or endpoint asks for it.
    pub fn allows_http(&self) -> bool {
        let http_protocol = self
            .protocol
            .as_deref()
            .is_some_and(|p| p.eq_ignore_ascii_case("http"));
        let http_endpoint = self
            .blob_endpoint
            .as_deref()
            .is_some_and(|e| e.starts_with("http://"));
        self.use_development_storage || http_protocol || http_endpoint
    }

    /// Explicit blob endpoint, or one derived from a non-default endpoint suffix.
    pub fn endpoint(&self) -> Option<String> {
        if let Some(endpoint) = &self.blob_endpoint {
            return Some(endpoint.trim_end_matches('/').to_string());
        }
        let suffix = self.endpoint_suffix.as_deref()?;
        if suffix == "core.windows.net" {
            return None;
        }
        let account = self.account_name.as_deref()?;
        let protocol = self.protocol.as_deref().unwrap_or("https");
        Some(format!("{protocol}://{account}.blob.{suffix}"))
    }

    fn check(self) -> Result<Self, StoreError> {
        if self.local_root.is_some() || self.use_development_storage {
            return Ok(self);
        }
        if self.account_name.is_none() && self.blob_endpoint.is_none() {
            return Err(StoreError::invalid_connection(
                "connection string names neither an account nor a blob endpoint",
            ));
        }
        if self.account_key.is_none() && self.shared_access_signature.is_none() {
            return Err(StoreError::invalid_connection(
                "connection string carries neither AccountKey nor SharedAccessSignature",
            ));
        }
        Ok(self)
    }
}

impl FromStr for ConnectionString {
    type Err = StoreError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut parsed = ConnectionString::default();
        for pair in text.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            // Account keys are base64 and may themselves contain '='.
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                StoreError::invalid_connection(&format!("segment without '=': {pair}"))
            })?;
            let value = value.trim().to_string();
            match key.trim().to_ascii_lowercase().as_str() {
                "defaultendpointsprotocol" => parsed.protocol = Some(value),
                "accountname" => parsed.account_name = Some(value),
                "accountkey" => parsed.account_key = Some(value),
                "endpointsuffix" => parsed.endpoint_suffix = Some(value),
                "blobendpoint" => parsed.blob_endpoint = Some(value),
                "sharedaccesssignature" => {
                    parsed.shared_access_signature =
                        Some(value.trim_start_matches('?').to_string())
                }
                "usedevelopmentstorage" => {
                    parsed.use_development_storage = value.eq_ignore_ascii_case("true")
                }
                "localroot" => parsed.local_root = Some(PathBuf::from(value)),
                other => tracing::debug!(key = other, "ignoring connection string key"),
            }
        }
        parsed.check()
    }
}

impl fmt::Debug for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |v: &Option<String>| v.as_ref().map(|_| "***");
        f.debug_struct("ConnectionString")
            .field("protocol", &self.protocol)
            .field("account_name", &self.account_name)
            .field("account_key", &mask(&self.account_key))
            .field("endpoint_suffix", &self.endpoint_suffix)
            .field("blob_endpoint", &self.blob_endpoint)
            .field("shared_access_signature", &mask(&self.shared_access_signature))
            .field("use_development_storage", &self.use_development_storage)
            .field("local_root", &self.local_root)
            .finish()
    }
}

/// Builds the backend a connection string points at.
pub fn connect(conn: &ConnectionString) -> Result<Arc<dyn BlobProvider>, StoreError> {
    if let Some(root) = &conn.local_root {
        return connect_local(root);
    }
    connect_azure(conn)
}

#[cfg(feature = "backend-fs")]
fn connect_local(root: &std::path::Path) -> Result<Arc<dyn BlobProvider>, StoreError> {
    Ok(Arc::new(crate::fs::FsBlobProvider::new(root)))
}

#[cfg(not(feature = "backend-fs"))]
fn connect_local(_root: &std::path::Path) -> Result<Arc<dyn BlobProvider>, StoreError> {
    Err(StoreError::provider_unavailable(
        "local directory backend not compiled in (enable feature `backend-fs`)",
    ))
}

#[cfg(feature = "backend-azure")]
fn connect_azure(conn: &ConnectionString) -> Result<Arc<dyn BlobProvider>, StoreError> {
    Ok(Arc::new(crate::azure::AzureBlobProvider::new(conn)?))
}

#[cfg(not(feature = "backend-azure"))]
fn connect_azure(_conn: &ConnectionString) -> Result<Arc<dyn BlobProvider>, StoreError> {
    Err(StoreError::provider_unavailable(
        "Azure backend not compiled in (enable feature `backend-azure`)",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNT: &str = "DefaultEndpointsProtocol=https;AccountName=demo;\
        AccountKey=a2V5a2V5a2V5==;EndpointSuffix=core.windows.net";

    #[test]
    fn parses_account_key_strings() {
        let conn = ConnectionString::parse(ACCOUNT).unwrap();
        assert_eq!(conn.account_name.as_deref(), Some("demo"));
        assert_eq!(conn.account_key.as_deref(), Some("a2V5a2V5a2V5=="));
        assert_eq!(conn.endpoint(), None);
        assert!(!conn.allows_http());
        assert!(!conn.is_local());
    }

    #[test]
    fn keys_are_case_insensitive() {
        let conn = ConnectionString::parse("accountname=demo;sharedaccesssignature=?sv=1&sig=x")
            .unwrap();
        assert_eq!(conn.account_name.as_deref(), Some("demo"));
        assert_eq!(conn.shared_access_signature.as_deref(), Some("sv=1&sig=x"));
    }

    #[test]
    fn custom_suffix_derives_endpoint() {
        let conn = ConnectionString::parse(
            "DefaultEndpointsProtocol=http;AccountName=demo;AccountKey=k;EndpointSuffix=example.net",
        )
        .unwrap();
        assert_eq!(conn.endpoint().as_deref(), Some("http://demo.blob.example.net"));
        assert!(conn.allows_http());
    }

    #[test]
    fn development_storage_needs_no_credentials() {
        let conn = ConnectionString::parse("UseDevelopmentStorage=true").unwrap();
        assert!(conn.use_development_storage);
        assert!(conn.allows_http());
    }

    #[test]
    fn local_root_selects_directory_backend() {
        let conn = ConnectionString::parse("LocalRoot=/tmp/blobs").unwrap();
        assert_eq!(conn.local_root, Some(PathBuf::from("/tmp/blobs")));
    }

    #[test]
    fn rejects_incomplete_strings() {
        assert!(ConnectionString::parse("AccountName=demo").is_err());
        assert!(ConnectionString::parse("AccountKey=abc").is_err());
        assert!(ConnectionString::parse("garbage").is_err());
    }

    #[test]
    fn debug_output_masks_secrets() {
        let conn = ConnectionString::parse(ACCOUNT).unwrap();
        let text = format!("{conn:?}");
        assert!(!text.contains("a2V5"));
        assert!(text.contains("***"));
    }
}
