pub mod app;
pub mod commands;
pub mod context;
pub mod dispatch;
pub mod env;
pub mod list;
pub mod output;
pub mod read;
pub mod run;
pub mod runtime;
pub mod validate;
pub mod write;

pub use app::run;
pub use context::CliContext;
pub use output::OutputFormat;
