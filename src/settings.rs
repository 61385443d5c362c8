//! Storage settings populated from the configuration snapshot.

use blobkit_config::prelude::*;

pub const KEY_CONNECTION_STRING: &str = "connection_strings.azure_storage_connection_string";
pub const KEY_CONTAINER_NAME: &str = "settings.container_name";
pub const KEY_INPUT_FILE_NAME: &str = "settings.input_file_name";
pub const KEY_OUTPUT_FILE_NAME: &str = "settings.output_file_name";
pub const KEY_ENVIRONMENT: &str = "environment";

/// `appsettings.json` spellings accepted when the snake_case key is absent.
const PASCAL_CASE_KEYS: [(&str, &str); 4] = [
    (
        KEY_CONNECTION_STRING,
        "ConnectionStrings.AZURE_STORAGE_CONNECTION_STRING",
    ),
    (KEY_CONTAINER_NAME, "Settings.ContainerName"),
    (KEY_INPUT_FILE_NAME, "Settings.InputFileName"),
    (KEY_OUTPUT_FILE_NAME, "Settings.OutputFileName"),
];

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct StorageSettings {
    #[serde(skip_serializing)]
    pub connection_string: Option<String>,
    pub input_blob_path: Option<String>,
    pub output_blob_path: Option<String>,
}

impl StorageSettings {
    pub fn from_snapshot(snapshot: &ConfigSnapshot) -> Self {
        let get = |key: &str| lookup(snapshot, key);
        let container = get(KEY_CONTAINER_NAME);
        Self {
            connection_string: get(KEY_CONNECTION_STRING),
            input_blob_path: combine_blob_path(
                container.as_deref(),
                get(KEY_INPUT_FILE_NAME).as_deref(),
            ),
            output_blob_path: combine_blob_path(
                container.as_deref(),
                get(KEY_OUTPUT_FILE_NAME).as_deref(),
            ),
        }
    }

    /// Container half of the input path, used when listing.
    pub fn input_container(&self) -> Option<&str> {
        let path = self.input_blob_path.as_deref()?;
        Some(path.split_once('/').map_or(path, |(container, _)| container))
    }
}

fn lookup(snapshot: &ConfigSnapshot, key: &str) -> Option<String> {
    snapshot.get_string(&KeyPath::new(key)).or_else(|| {
        let (_, pascal) = PASCAL_CASE_KEYS.iter().find(|(snake, _)| *snake == key)?;
        snapshot.get_string(&KeyPath::new(*pascal))
    })
}

/// Joins `container` and `file` with `/`, turning any `\` into `/`.
///
/// A missing half leaves the other one as is; validation reports what is wrong with it.
pub fn combine_blob_path(container: Option<&str>, file: Option<&str>) -> Option<String> {
    let container = container.filter(|c| !c.is_empty());
    let file = file.filter(|f| !f.is_empty());
    let joined = match (container, file) {
        (None, None) => return None,
        (Some(c), None) => c.to_string(),
        (None, Some(f)) => f.to_string(),
        (Some(c), Some(f)) => {
            let c = c.trim_end_matches(['/', '\\']);
            format!("{c}/{f}")
        }
    };
    Some(joined.replace('\\', "/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn combines_container_and_file() {
        assert_eq!(
            combine_blob_path(Some("docs"), Some("in\\today.txt")).as_deref(),
            Some("docs/in/today.txt")
        );
        assert_eq!(
            combine_blob_path(Some("docs/"), Some("a.txt")).as_deref(),
            Some("docs/a.txt")
        );
        assert_eq!(combine_blob_path(None, Some("a.txt")).as_deref(), Some("a.txt"));
        assert_eq!(combine_blob_path(Some(""), None), None);
    }

    #[test]
    fn settings_read_from_snapshot() {
        let snapshot = ConfigSnapshot::from_tree(
            json!({
                "connection_strings": {"azure_storage_connection_string": "LocalRoot=/tmp"},
                "settings": {
                    "container_name": "docs",
                    "input_file_name": "in.txt",
                    "output_file_name": "out.txt"
                }
            }),
            Vec::new(),
        );
        let settings = StorageSettings::from_snapshot(&snapshot);
        assert_eq!(settings.connection_string.as_deref(), Some("LocalRoot=/tmp"));
        assert_eq!(settings.input_blob_path.as_deref(), Some("docs/in.txt"));
        assert_eq!(settings.output_blob_path.as_deref(), Some("docs/out.txt"));
        assert_eq!(settings.input_container(), Some("docs"));
    }

    #[test]
    fn pascal_case_appsettings_keys_are_read() {
        let snapshot = ConfigSnapshot::from_tree(
            json!({
                "ConnectionStrings": {"AZURE_STORAGE_CONNECTION_STRING": "LocalRoot=/srv"},
                "Settings": {
                    "ContainerName": "docs",
                    "InputFileName": "in.txt",
                    "OutputFileName": "out.txt"
                },
                "settings": {"output_file_name": "override.txt"}
            }),
            Vec::new(),
        );
        let settings = StorageSettings::from_snapshot(&snapshot);
        assert_eq!(settings.connection_string.as_deref(), Some("LocalRoot=/srv"));
        assert_eq!(settings.input_blob_path.as_deref(), Some("docs/in.txt"));
        assert_eq!(settings.output_blob_path.as_deref(), Some("docs/override.txt"));
    }
}
