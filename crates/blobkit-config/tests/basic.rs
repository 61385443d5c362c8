use blobkit_config::prelude::*;
use serial_test::serial;
use std::sync::Arc;
use tempfile::tempdir;

fn key(path: &str) -> KeyPath {
    KeyPath::new(path)
}

#[tokio::test]
#[serial]
async fn layers_apply_in_order() {
    let dir = tempdir().expect("tempdir");
    let file = dir.path().join("appsettings.json");
    std::fs::write(
        &file,
        r#"{"settings": {"container_name": "from-file", "input_file_name": "in.txt"}}"#,
    )
    .expect("write config");

    std::env::set_var("BLOBKIT_TEST__SETTINGS__CONTAINER_NAME", "from-env");
    let loader = Loader::new(vec![
        Arc::new(FileSource::required(vec![file])) as Arc<dyn Source>,
        Arc::new(EnvSource::new("BLOBKIT_TEST", "__")) as Arc<dyn Source>,
        Arc::new(CliArgsSource {
            args: vec!["settings.output_file_name=out.txt".into()],
        }) as Arc<dyn Source>,
    ])
    .with_default("environment", serde_json::json!("Production"));

    let snapshot = loader.load_once().await.expect("snapshot");
    std::env::remove_var("BLOBKIT_TEST__SETTINGS__CONTAINER_NAME");

    assert_eq!(
        snapshot.get_string(&key("settings.container_name")).as_deref(),
        Some("from-env")
    );
    assert_eq!(
        snapshot.get_string(&key("settings.input_file_name")).as_deref(),
        Some("in.txt")
    );
    assert_eq!(
        snapshot.get_string(&key("settings.output_file_name")).as_deref(),
        Some("out.txt")
    );
    assert_eq!(
        snapshot.get_string(&key("environment")).as_deref(),
        Some("Production")
    );
    assert_eq!(
        snapshot.origin_of(&key("settings.container_name")),
        Some(Layer::Env)
    );
    assert_eq!(
        snapshot.origin_of(&key("settings.input_file_name")),
        Some(Layer::File)
    );
    assert!(!snapshot.checksum().0.is_empty());
}

#[tokio::test]
#[serial]
async fn env_alias_maps_bare_variable() {
    std::env::set_var("BLOBKIT_ALIAS_TEST_CONN", "UseDevelopmentStorage=true");
    let loader = Loader::new(vec![Arc::new(
        EnvSource::new("BLOBKIT_ALIAS_UNUSED", "__").alias(
            "BLOBKIT_ALIAS_TEST_CONN",
            "connection_strings.azure_storage_connection_string",
        ),
    ) as Arc<dyn Source>]);

    let snapshot = loader.load_once().await.expect("snapshot");
    std::env::remove_var("BLOBKIT_ALIAS_TEST_CONN");

    assert_eq!(
        snapshot
            .get_string(&key("connection_strings.azure_storage_connection_string"))
            .as_deref(),
        Some("UseDevelopmentStorage=true")
    );
}

#[tokio::test]
#[serial]
async fn prefixed_variable_wins_over_alias() {
    std::env::set_var("BLOBKIT_PREC__CONNECTION_STRINGS__AZURE_STORAGE_CONNECTION_STRING", "LocalRoot=/a");
    std::env::set_var("BLOBKIT_PREC_BARE_CONN", "LocalRoot=/b");
    let loader = Loader::new(vec![Arc::new(
        EnvSource::new("BLOBKIT_PREC__", "__").alias(
            "BLOBKIT_PREC_BARE_CONN",
            "connection_strings.azure_storage_connection_string",
        ),
    ) as Arc<dyn Source>]);

    let snapshot = loader.load_once().await.expect("snapshot");
    std::env::remove_var("BLOBKIT_PREC__CONNECTION_STRINGS__AZURE_STORAGE_CONNECTION_STRING");
    std::env::remove_var("BLOBKIT_PREC_BARE_CONN");

    assert_eq!(
        snapshot
            .get_string(&key("connection_strings.azure_storage_connection_string"))
            .as_deref(),
        Some("LocalRoot=/a")
    );
}

#[tokio::test]
async fn optional_missing_file_is_skipped() {
    let dir = tempdir().expect("tempdir");
    let loader = Loader::new(vec![Arc::new(FileSource::optional(vec![dir
        .path()
        .join("appsettings.Development.json")]))
        as Arc<dyn Source>]);

    let snapshot = loader.load_once().await.expect("snapshot");
    assert_eq!(snapshot.tree(), &serde_json::json!({}));
}

#[tokio::test]
async fn required_missing_file_fails() {
    let dir = tempdir().expect("tempdir");
    let loader = Loader::new(vec![Arc::new(FileSource::required(vec![dir
        .path()
        .join("absent.json")]))
        as Arc<dyn Source>]);

    let err = loader.load_once().await.expect_err("missing file");
    assert_eq!(err.code().0, "CONFIG.UNAVAILABLE");
}

#[tokio::test]
async fn yaml_and_toml_files_merge() {
    let dir = tempdir().expect("tempdir");
    let yaml = dir.path().join("base.yaml");
    let toml = dir.path().join("local.toml");
    std::fs::write(&yaml, "settings:\n  container_name: docs\n  input_file_name: a.txt\n")
        .expect("write yaml");
    std::fs::write(&toml, "[settings]\ninput_file_name = \"b.txt\"\n").expect("write toml");

    let loader = Loader::new(vec![
        Arc::new(FileSource::required(vec![yaml, toml])) as Arc<dyn Source>
    ]);
    let snapshot = loader.load_once().await.expect("snapshot");

    assert_eq!(
        snapshot.get_string(&key("settings.container_name")).as_deref(),
        Some("docs")
    );
    assert_eq!(
        snapshot.get_string(&key("settings.input_file_name")).as_deref(),
        Some("b.txt")
    );
}

#[tokio::test]
async fn malformed_override_is_rejected() {
    let loader = Loader::new(vec![Arc::new(CliArgsSource {
        args: vec!["settings.container_name".into()],
    }) as Arc<dyn Source>]);

    let err = loader.load_once().await.expect_err("bad override");
    assert_eq!(err.code().0, "CONFIG.INVALID");
}
