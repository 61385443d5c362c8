use super::output::OutputFormat;
use super::runtime::LoadedConfig;
use crate::settings::StorageSettings;
use crate::worker::Worker;

pub struct CliContext {
    environment: String,
    settings: StorageSettings,
    output: OutputFormat,
}

impl CliContext {
    pub fn new(loaded: LoadedConfig, output: OutputFormat) -> Self {
        let settings = StorageSettings::from_snapshot(&loaded.snapshot);
        Self {
            environment: loaded.environment,
            settings,
            output,
        }
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn settings(&self) -> &StorageSettings {
        &self.settings
    }

    pub fn output(&self) -> &OutputFormat {
        &self.output
    }

    pub fn worker(&self) -> Worker {
        Worker::from_settings(self.settings.clone())
    }
}
