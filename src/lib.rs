//! blobkit command-line client
//!
//! Exposes modules for integration testing

pub mod cli;
pub mod console;
pub mod errors;
pub mod settings;
pub mod worker;

pub use console::{ConsoleWriter, Palette};
pub use settings::StorageSettings;
pub use worker::Worker;
