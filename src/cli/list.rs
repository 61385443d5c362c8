use anyhow::Result;
use clap::Args;

use super::context::CliContext;
use super::output::{emit_report, report_failure, OperationReport};
use crate::console::ConsoleWriter;

#[derive(Args, Clone, Debug)]
pub struct ListArgs {
    /// Container to list (defaults to the input file's container)
    #[arg(long, value_name = "NAME")]
    pub container: Option<String>,
}

pub async fn cmd_list(args: ListArgs, ctx: &CliContext) -> Result<()> {
    let worker = ctx.worker();
    let container = args
        .container
        .as_deref()
        .or_else(|| ctx.settings().input_container())
        .map(str::to_string);
    let outcome = worker
        .accessor()
        .list_files(container.as_deref())
        .await;

    if !ctx.output().is_human() {
        let report = OperationReport::from_outcome("list", container.as_deref(), outcome);
        return emit_report(&report, ctx.output());
    }

    let mut console = ConsoleWriter::stdout();
    let target = container.as_deref().unwrap_or_default();
    match outcome.into_result() {
        Ok(items) => {
            console.emphasis_line(&format!("Files in container '{target}':"))?;
            if items.is_empty() {
                console.line("  (none)")?;
            }
            for item in &items {
                console.line(&format!("  {} ({} bytes)", item.name, item.size))?;
            }
            Ok(())
        }
        Err(errors) => Err(report_failure(
            &mut console,
            "list",
            "Failed to list files.",
            &errors,
        )?),
    }
}
