use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use blobkit_config::prelude::*;
use serde_json::json;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::settings::{KEY_CONNECTION_STRING, KEY_ENVIRONMENT};

pub const DEFAULT_ENVIRONMENT: &str = "Production";
pub const ENV_PREFIX: &str = "BLOBKIT__";
pub const ENV_SEPARATOR: &str = "__";
pub const CONNECTION_STRING_VAR: &str = "AZURE_STORAGE_CONNECTION_STRING";
const SETTINGS_STEM: &str = "appsettings";
const SETTINGS_EXTENSIONS: [&str; 4] = ["json", "yaml", "yml", "toml"];

/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_logging(level: &str, debug: bool) -> Result<()> {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        level.parse().context("Invalid log level")?
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("Failed to install the tracing subscriber")?;

    Ok(())
}

pub struct LoadedConfig {
    pub snapshot: ConfigSnapshot,
    pub environment: String,
    pub files: Vec<PathBuf>,
}

/// Environment name used to pick `appsettings.<environment>.*` files.
///
/// Overrides win over `BLOBKIT__ENVIRONMENT`, which wins over the default.
pub fn resolve_environment(overrides: &[String]) -> String {
    let from_overrides = overrides.iter().rev().find_map(|arg| {
        let (key, value) = arg.trim_start_matches("--").split_once('=')?;
        (key.trim() == KEY_ENVIRONMENT).then(|| value.trim().to_string())
    });
    from_overrides
        .or_else(|| std::env::var(format!("{ENV_PREFIX}ENVIRONMENT")).ok())
        .filter(|env| !env.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
}

/// `appsettings.*` then `appsettings.<environment>.*` below `dir`.
pub fn settings_files(dir: &Path, environment: &str) -> Vec<PathBuf> {
    [SETTINGS_STEM.to_string(), format!("{SETTINGS_STEM}.{environment}")]
        .iter()
        .flat_map(|stem| {
            SETTINGS_EXTENSIONS
                .iter()
                .map(move |ext| dir.join(format!("{stem}.{ext}")))
        })
        .collect()
}

pub fn build_loader(file_source: FileSource, overrides: &[String], environment: &str) -> Loader {
    let env_source = EnvSource::new(ENV_PREFIX, ENV_SEPARATOR)
        .alias(CONNECTION_STRING_VAR, KEY_CONNECTION_STRING);
    Loader::new(vec![
        Arc::new(file_source) as Arc<dyn Source>,
        Arc::new(env_source) as Arc<dyn Source>,
        Arc::new(CliArgsSource {
            args: overrides.to_vec(),
        }) as Arc<dyn Source>,
    ])
    .with_default(KEY_ENVIRONMENT, json!(environment))
}

pub async fn load_config(config_path: Option<&PathBuf>, overrides: &[String]) -> Result<LoadedConfig> {
    let environment = resolve_environment(overrides);
    let (file_source, files) = match config_path {
        Some(path) => (FileSource::required(vec![path.clone()]), vec![path.clone()]),
        None => {
            let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
            let present: Vec<PathBuf> = settings_files(&cwd, &environment)
                .into_iter()
                .filter(|p| p.exists())
                .collect();
            if present.is_empty() {
                warn!(dir = %cwd.display(), "No appsettings files found, using environment and overrides only");
            }
            (FileSource::optional(present.clone()), present)
        }
    };

    let snapshot = build_loader(file_source, overrides, &environment)
        .load_once()
        .await
        .context("Failed to load configuration")?;

    info!(
        environment = %environment,
        files = files.len(),
        checksum = %snapshot.checksum().0,
        "Configuration loaded"
    );
    debug!(
        origin = ?snapshot.origin_of(&KeyPath::new(KEY_CONNECTION_STRING)),
        "connection string source"
    );
    Ok(LoadedConfig {
        snapshot,
        environment,
        files,
    })
}
