use crate::{kind::ErrorKind, retry::RetryClass, severity::Severity};
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ErrorCode(pub &'static str);

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        match REGISTRY.get_key_value(s.as_str()) {
            Some((key, _)) => Ok(ErrorCode(key)),
            None => Err(serde::de::Error::custom(format!("unknown error code: {s}"))),
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Clone, Debug)]
pub struct CodeSpec {
    pub code: ErrorCode,
    pub kind: ErrorKind,
    pub retryable: RetryClass,
    pub severity: Severity,
    pub default_user_msg: &'static str,
}

pub mod codes {
    use super::ErrorCode;

    pub const INPUT_MISSING: ErrorCode = ErrorCode("INPUT.MISSING");
    pub const PATH_MISSING_CONTAINER: ErrorCode = ErrorCode("PATH.MISSING_CONTAINER");
    pub const PATH_INVALID_CONTAINER: ErrorCode = ErrorCode("PATH.INVALID_CONTAINER");
    pub const PATH_INVALID_BLOB: ErrorCode = ErrorCode("PATH.INVALID_BLOB");
    pub const STORAGE_NOT_FOUND: ErrorCode = ErrorCode("STORAGE.NOT_FOUND");
    pub const STORAGE_IO: ErrorCode = ErrorCode("STORAGE.IO");
    pub const PROVIDER_UNAVAILABLE: ErrorCode = ErrorCode("PROVIDER.UNAVAILABLE");
    pub const CONFIG_INVALID: ErrorCode = ErrorCode("CONFIG.INVALID");
    pub const CONFIG_UNAVAILABLE: ErrorCode = ErrorCode("CONFIG.UNAVAILABLE");
    pub const UNKNOWN_INTERNAL: ErrorCode = ErrorCode("UNKNOWN.INTERNAL");
}

pub static REGISTRY: Lazy<HashMap<&'static str, CodeSpec>> = Lazy::new(|| {
    use codes::*;

    let mut map = HashMap::new();
    let mut add = |spec: CodeSpec| {
        let key = spec.code.0;
        if map.insert(key, spec).is_some() {
            panic!("duplicate error code: {}", key);
        }
    };

    add(CodeSpec {
        code: INPUT_MISSING,
        kind: ErrorKind::Input,
        retryable: RetryClass::Permanent,
        severity: Severity::Warn,
        default_user_msg: "A required value was not provided.",
    });

    add(CodeSpec {
        code: PATH_MISSING_CONTAINER,
        kind: ErrorKind::Validation,
        retryable: RetryClass::Permanent,
        severity: Severity::Warn,
        default_user_msg: "The path does not name a container.",
    });

    add(CodeSpec {
        code: PATH_INVALID_CONTAINER,
        kind: ErrorKind::Validation,
        retryable: RetryClass::Permanent,
        severity: Severity::Warn,
        default_user_msg: "The container name is invalid.",
    });

    add(CodeSpec {
        code: PATH_INVALID_BLOB,
        kind: ErrorKind::Validation,
        retryable: RetryClass::Permanent,
        severity: Severity::Warn,
        default_user_msg: "The blob path is invalid.",
    });

    add(CodeSpec {
        code: STORAGE_NOT_FOUND,
        kind: ErrorKind::NotFound,
        retryable: RetryClass::Permanent,
        severity: Severity::Info,
        default_user_msg: "Resource not found.",
    });

    add(CodeSpec {
        code: STORAGE_IO,
        kind: ErrorKind::Io,
        retryable: RetryClass::Transient,
        severity: Severity::Error,
        default_user_msg: "Reading or writing blob content failed.",
    });

    add(CodeSpec {
        code: PROVIDER_UNAVAILABLE,
        kind: ErrorKind::Provider,
        retryable: RetryClass::Transient,
        severity: Severity::Error,
        default_user_msg: "Storage provider is unavailable. Please retry later.",
    });

    add(CodeSpec {
        code: CONFIG_INVALID,
        kind: ErrorKind::Config,
        retryable: RetryClass::Permanent,
        severity: Severity::Error,
        default_user_msg: "Configuration is invalid.",
    });

    add(CodeSpec {
        code: CONFIG_UNAVAILABLE,
        kind: ErrorKind::Config,
        retryable: RetryClass::Transient,
        severity: Severity::Error,
        default_user_msg: "Configuration source is unavailable.",
    });

    add(CodeSpec {
        code: UNKNOWN_INTERNAL,
        kind: ErrorKind::Unknown,
        retryable: RetryClass::None,
        severity: Severity::Critical,
        default_user_msg: "Internal error.",
    });

    map
});

pub fn spec_of(code: ErrorCode) -> &'static CodeSpec {
    REGISTRY.get(code.0).expect("unregistered ErrorCode")
}
