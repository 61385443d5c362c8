use anyhow::Result;
use clap::Args;

use super::context::CliContext;
use super::output::{emit_report, report_failure, OperationReport};
use crate::console::ConsoleWriter;
use crate::worker::timestamp_line;

#[derive(Args, Clone, Debug)]
pub struct WriteArgs {
    /// Blob to write (defaults to the configured output file)
    #[arg(long, value_name = "CONTAINER/PATH")]
    pub path: Option<String>,

    /// Text to write instead of the timestamp line
    #[arg(long)]
    pub text: Option<String>,
}

pub async fn cmd_write(args: WriteArgs, ctx: &CliContext) -> Result<()> {
    let worker = ctx.worker();
    let path = args.path.or_else(|| ctx.settings().output_blob_path.clone());
    let text = args.text.unwrap_or_else(timestamp_line);
    let outcome = worker.write_text(path.as_deref(), &text).await;

    if !ctx.output().is_human() {
        let report = OperationReport::from_outcome("write", path.as_deref(), outcome);
        return emit_report(&report, ctx.output());
    }

    let mut console = ConsoleWriter::stdout();
    console.emphasis_line("Attempting to write to file in blob storage...")?;
    match outcome.into_result() {
        Ok(_) => {
            console.success_line("File written successfully.  Check contents of file.")?;
            Ok(())
        }
        Err(errors) => Err(report_failure(
            &mut console,
            "write",
            "Failed to write to file.",
            &errors,
        )?),
    }
}
