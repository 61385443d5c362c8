use anyhow::Result;
use clap::Args;

use super::context::CliContext;
use super::output::{emit_report, report_failure, OperationReport};
use crate::console::ConsoleWriter;

#[derive(Args, Clone, Debug)]
pub struct ReadArgs {
    /// Blob to read (defaults to the configured input file)
    #[arg(long, value_name = "CONTAINER/PATH")]
    pub path: Option<String>,
}

pub async fn cmd_read(args: ReadArgs, ctx: &CliContext) -> Result<()> {
    let worker = ctx.worker();
    let path = args.path.or_else(|| ctx.settings().input_blob_path.clone());
    let outcome = worker.first_line_of(path.as_deref()).await;

    if !ctx.output().is_human() {
        let report = OperationReport::from_outcome("read", path.as_deref(), outcome);
        return emit_report(&report, ctx.output());
    }

    let mut console = ConsoleWriter::stdout();
    console.emphasis_line("Attempting to read from file in blob storage...")?;
    match outcome.into_result() {
        Ok(line) => {
            console.line(&format!("First line read from file: '{line}'"))?;
            Ok(())
        }
        Err(errors) => Err(report_failure(
            &mut console,
            "read",
            "Failed to read from file.",
            &errors,
        )?),
    }
}
