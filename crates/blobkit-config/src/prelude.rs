pub use crate::{
    errors::ConfigError,
    loader::Loader,
    model::{Checksum, ConfigMap, ConfigValue, KeyPath, Layer, ProvenanceEntry},
    snapshot::ConfigSnapshot,
    source::{cli::CliArgsSource, env::EnvSource, file::FileSource, Source, SourceSnapshot},
};
