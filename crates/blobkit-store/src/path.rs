//! Splits `container/blob/path` strings and checks them against the storage
//! naming rules. Every failed rule is reported, not only the first one.

use blobkit_errors::prelude::{codes, ErrorCode};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

pub const CONTAINER_MIN_LEN: usize = 3;
pub const CONTAINER_MAX_LEN: usize = 63;
/// The emulator limit, which is stricter than the cloud service's.
pub const BLOB_PATH_MAX_LEN: usize = 256;
pub const BLOB_PATH_MAX_SEGMENTS: usize = 254;

pub const NO_FILE_PATH: &str = "No file path specified.";

static CONTAINER_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^[a-z0-9]([a-z0-9-]*[a-z0-9])?$").expect("container name pattern compiles")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum ViolationKind {
    MissingInput,
    MissingContainer,
    InvalidContainerName,
    InvalidBlobPath,
}

impl ViolationKind {
    pub fn code(self) -> ErrorCode {
        match self {
            ViolationKind::MissingInput => codes::INPUT_MISSING,
            ViolationKind::MissingContainer => codes::PATH_MISSING_CONTAINER,
            ViolationKind::InvalidContainerName => codes::PATH_INVALID_CONTAINER,
            ViolationKind::InvalidBlobPath => codes::PATH_INVALID_BLOB,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Non-empty, ordered list of violations: container rules first, then blob-path rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    fn from_violations(violations: Vec<Violation>) -> Result<(), Self> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Self { violations })
        }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.message.clone()).collect()
    }

    pub fn has_kind(&self, kind: ViolationKind) -> bool {
        self.violations.iter().any(|v| v.kind == kind)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for violation in &self.violations {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(&violation.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PathParts {
    container: String,
    blob_path: String,
}

impl PathParts {
    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn blob_path(&self) -> &str {
        &self.blob_path
    }

    pub fn into_pair(self) -> (String, String) {
        (self.container, self.blob_path)
    }
}

impl fmt::Display for PathParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.container, self.blob_path)
    }
}

/// Splits on the first `/` and validates both halves.
pub fn parse_blob_path(path: &str) -> Result<PathParts, ValidationError> {
    if path.trim().is_empty() {
        return Err(ValidationError {
            violations: vec![Violation::new(ViolationKind::MissingInput, NO_FILE_PATH)],
        });
    }

    let Some((container, blob_path)) = path.split_once('/') else {
        return Err(ValidationError {
            violations: vec![Violation::new(
                ViolationKind::MissingContainer,
                format!(
                    "File path '{path}' is invalid: Does not include both a container and a file name."
                ),
            )],
        });
    };

    let mut violations = container_violations(container);
    violations.extend(blob_path_violations(blob_path));
    ValidationError::from_violations(violations)?;

    Ok(PathParts {
        container: container.to_string(),
        blob_path: blob_path.to_string(),
    })
}

pub fn validate_container_name(name: &str) -> Result<(), ValidationError> {
    ValidationError::from_violations(container_violations(name))
}

pub fn validate_blob_path(path: &str) -> Result<(), ValidationError> {
    ValidationError::from_violations(blob_path_violations(path))
}

fn container_violations(name: &str) -> Vec<Violation> {
    use ViolationKind::InvalidContainerName as Kind;

    if name.trim().is_empty() {
        return vec![Violation::new(
            Kind,
            "Invalid container name: Container name cannot be empty or blank.",
        )];
    }

    let mut violations = Vec::new();
    let len = name.chars().count();
    if !(CONTAINER_MIN_LEN..=CONTAINER_MAX_LEN).contains(&len) {
        violations.push(Violation::new(
            Kind,
            format!(
                "Container name '{name}' is invalid: Container name must be between {CONTAINER_MIN_LEN} and {CONTAINER_MAX_LEN} characters long."
            ),
        ));
    }
    if !CONTAINER_NAME.is_match(name) {
        violations.push(Violation::new(
            Kind,
            format!(
                "Container name '{name}' is invalid: Container name may only contain lowercase letters, numbers and the dash character ('-'), and may not start or end with a dash."
            ),
        ));
    }
    if name.contains("--") {
        violations.push(Violation::new(
            Kind,
            format!(
                "Container name '{name}' is invalid: Container name may not contain consecutive dash ('-') characters."
            ),
        ));
    }
    violations
}

fn blob_path_violations(path: &str) -> Vec<Violation> {
    use ViolationKind::InvalidBlobPath as Kind;

    if path.trim().is_empty() {
        return vec![Violation::new(
            Kind,
            "Invalid blob file path: File path cannot be empty or blank.",
        )];
    }

    let mut violations = Vec::new();
    if path.chars().count() > BLOB_PATH_MAX_LEN {
        violations.push(Violation::new(
            Kind,
            format!(
                "Blob file path '{path}' is invalid: File path must be no more than {BLOB_PATH_MAX_LEN} characters long."
            ),
        ));
    }

    let trailing = path.ends_with('.') || path.ends_with('/');
    if trailing {
        violations.push(Violation::new(
            Kind,
            format!(
                "Blob file path '{path}' is invalid: File path may not end with a period ('.') or a forward slash ('/')."
            ),
        ));
    }

    let segments: Vec<&str> = path.split('/').collect();
    if segments.len() > BLOB_PATH_MAX_SEGMENTS {
        violations.push(Violation::new(
            Kind,
            format!(
                "Blob file path '{path}' is invalid: File path may contain no more than {BLOB_PATH_MAX_SEGMENTS} path segments."
            ),
        ));
    }

    // The final segment's trailing period is already reported above.
    let checked = if path.ends_with('.') {
        &segments[..segments.len() - 1]
    } else {
        &segments[..]
    };
    if checked.iter().any(|segment| segment.ends_with('.')) {
        violations.push(Violation::new(
            Kind,
            format!(
                "Blob file path '{path}' is invalid: No path segment may end with a period ('.')."
            ),
        ));
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(err: &ValidationError) -> Vec<ViolationKind> {
        err.violations().iter().map(|v| v.kind).collect()
    }

    #[test]
    fn violation_kinds_map_to_error_codes() {
        let err = parse_blob_path("nocontainer").unwrap_err();
        assert_eq!(err.violations()[0].kind.code(), codes::PATH_MISSING_CONTAINER);
        assert_eq!(ViolationKind::InvalidBlobPath.code().0, "PATH.INVALID_BLOB");
    }

    #[test]
    fn splits_on_first_separator_only() {
        let parts = parse_blob_path("docs/reports/2024/q1.txt").expect("valid");
        assert_eq!(parts.container(), "docs");
        assert_eq!(parts.blob_path(), "reports/2024/q1.txt");
        assert_eq!(parts.to_string(), "docs/reports/2024/q1.txt");
    }

    #[test]
    fn blank_path_is_missing_input() {
        for input in ["", "   ", "\t"] {
            let err = parse_blob_path(input).expect_err("blank");
            assert_eq!(kinds(&err), [ViolationKind::MissingInput]);
            assert_eq!(err.messages(), [NO_FILE_PATH]);
        }
    }

    #[test]
    fn path_without_separator_is_missing_container() {
        for input in ["file.txt", "docs", "a\\b.txt"] {
            let err = parse_blob_path(input).expect_err("no separator");
            assert_eq!(kinds(&err), [ViolationKind::MissingContainer]);
            assert!(err.messages()[0].contains("Does not include both a container and a file name"));
        }
    }

    #[test]
    fn container_length_bounds() {
        assert!(validate_container_name("ab").is_err());
        assert!(validate_container_name("abc").is_ok());
        assert!(validate_container_name(&"a".repeat(63)).is_ok());
        assert!(validate_container_name(&"a".repeat(64)).is_err());
    }

    #[test]
    fn double_dash_is_rejected() {
        let err = validate_container_name("ab--cd").expect_err("double dash");
        assert_eq!(err.violations().len(), 1);
        assert!(err.messages()[0].contains("consecutive dash"));
        assert!(validate_container_name("ab-cd").is_ok());
    }

    #[test]
    fn container_pattern_rules() {
        for bad in ["-abc", "abc-", "ABC", "ab_c", "ab.c", "ab c"] {
            assert!(validate_container_name(bad).is_err(), "{bad}");
        }
        for good in ["abc", "a1b2", "0-9", "logs-2024"] {
            assert!(validate_container_name(good).is_ok(), "{good}");
        }
    }

    #[test]
    fn container_reports_every_broken_rule() {
        // Too short and starting with a dash.
        let err = validate_container_name("-a").expect_err("invalid");
        assert_eq!(err.violations().len(), 2);

        // Too long, uppercase and double dash.
        let name = format!("A--{}", "b".repeat(70));
        let err = validate_container_name(&name).expect_err("invalid");
        assert_eq!(err.violations().len(), 3);
    }

    #[test]
    fn blank_container_reports_single_violation() {
        let err = parse_blob_path("/file.txt").expect_err("blank container");
        assert_eq!(err.violations().len(), 1);
        assert!(err.messages()[0].contains("cannot be empty or blank"));
    }

    #[test]
    fn trailing_punctuation_is_rejected() {
        for bad in ["notes.", "dir/", "dir/file."] {
            let err = validate_blob_path(bad).expect_err(bad);
            assert_eq!(err.violations().len(), 1, "{bad}");
            assert!(err.messages()[0].contains("may not end with a period"));
        }
        for good in ["notes", "dir", "dir/file"] {
            assert!(validate_blob_path(good).is_ok(), "{good}");
        }
    }

    #[test]
    fn inner_segment_ending_with_period() {
        let err = validate_blob_path("a./b.txt").expect_err("segment");
        assert!(err.messages()[0].contains("No path segment may end with a period"));

        let err = validate_blob_path("a./b.").expect_err("both");
        assert_eq!(err.violations().len(), 2);

        let err = validate_blob_path("../secret").expect_err("traversal");
        assert!(err.messages()[0].contains("No path segment"));
    }

    #[test]
    fn blob_length_and_segment_limits() {
        assert!(validate_blob_path(&"x".repeat(256)).is_ok());
        assert!(validate_blob_path(&"x".repeat(257)).is_err());

        let many = vec!["a"; 255].join("/");
        let err = validate_blob_path(&many).expect_err("segments");
        assert!(err
            .messages()
            .iter()
            .any(|m| m.contains("no more than 254 path segments")));
        // 255 one-char segments plus separators is also over the length limit.
        assert_eq!(err.violations().len(), 2);

        let ok = vec!["a"; 128].join("/");
        assert!(validate_blob_path(&ok).is_ok());
    }

    #[test]
    fn container_and_blob_violations_are_concatenated() {
        let err = parse_blob_path("ab--/file.").expect_err("invalid");
        assert_eq!(
            kinds(&err),
            [
                ViolationKind::InvalidContainerName,
                ViolationKind::InvalidContainerName,
                ViolationKind::InvalidBlobPath
            ]
        );
        assert!(err.has_kind(ViolationKind::InvalidBlobPath));
        assert!(err.to_string().contains("Container name 'ab--' is invalid"));
    }

    #[test]
    fn length_is_counted_in_characters() {
        // 63 two-byte characters: the pattern fails, the length rule does not.
        let name = "é".repeat(63);
        let err = validate_container_name(&name).expect_err("pattern");
        assert_eq!(err.violations().len(), 1);
    }
}
