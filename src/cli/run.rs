use anyhow::Result;
use blobkit_store::prelude::*;
use clap::Args;
use serde::Serialize;

use super::context::CliContext;
use super::output::{emit_structured, OperationReport};
use crate::console::ConsoleWriter;
use crate::errors::OperationFailed;

#[derive(Args, Clone, Debug)]
pub struct RunArgs {
    /// Skip listing the input container
    #[arg(long)]
    pub no_list: bool,
}

#[derive(Debug, Serialize)]
struct RunReport {
    environment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    list: Option<OperationReport<Vec<BlobItem>>>,
    read: OperationReport<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    write: Option<OperationReport<bool>>,
}

pub async fn cmd_run(args: RunArgs, ctx: &CliContext) -> Result<()> {
    if ctx.output().is_human() {
        run_human(args, ctx).await
    } else {
        run_structured(args, ctx).await
    }
}

async fn run_human(args: RunArgs, ctx: &CliContext) -> Result<()> {
    let worker = ctx.worker();
    let settings = ctx.settings();
    let mut console = ConsoleWriter::stdout();
    console.line(&format!("Environment name: {}", ctx.environment()))?;
    console.blank()?;

    if !args.no_list {
        let container = settings.input_container();
        console.emphasis_line(&format!(
            "Listing files in container '{}'...",
            user_friendly(container)
        ))?;
        match worker.list_container().await.into_result() {
            Ok(items) => {
                for item in &items {
                    console.line(&format!("  {}", item.name))?;
                }
            }
            Err(errors) => {
                console.partial_error_line("Unable to list files.  Continuing.")?;
                console.errors(&errors)?;
            }
        }
        console.blank()?;
    }

    console.emphasis_line("Attempting to read from file in blob storage...")?;
    let first_line = match worker.read_first_line().await.into_result() {
        Ok(line) => line,
        Err(errors) => {
            console.error_line("Failed to read from file.  Aborting.")?;
            console.errors(&errors)?;
            return Err(OperationFailed::new("read", errors.len()).into());
        }
    };
    console.line(&format!("First line read from file: '{first_line}'"))?;
    console.blank()?;

    console.emphasis_line("Attempting to write to file in blob storage...")?;
    match worker.write_timestamp().await.into_result() {
        Ok(_) => {
            console.success_line("File written successfully.  Check contents of file.")?;
            console.blank()?;
            Ok(())
        }
        Err(errors) => {
            console.error_line("Failed to write to file.")?;
            console.errors(&errors)?;
            Err(OperationFailed::new("write", errors.len()).into())
        }
    }
}

async fn run_structured(args: RunArgs, ctx: &CliContext) -> Result<()> {
    let worker = ctx.worker();
    let settings = ctx.settings();

    let list = if args.no_list {
        None
    } else {
        let outcome = worker.list_container().await;
        Some(OperationReport::from_outcome(
            "list",
            settings.input_container(),
            outcome,
        ))
    };

    let read = OperationReport::from_outcome(
        "read",
        settings.input_blob_path.as_deref(),
        worker.read_first_line().await,
    );
    let write = if read.ok {
        Some(OperationReport::from_outcome(
            "write",
            settings.output_blob_path.as_deref(),
            worker.write_timestamp().await,
        ))
    } else {
        None
    };

    let failed = match &write {
        Some(write) if !write.ok => Some(("write", write.errors.len())),
        Some(_) => None,
        None => Some(("read", read.errors.len())),
    };
    let report = RunReport {
        environment: ctx.environment().to_string(),
        list,
        read,
        write,
    };
    emit_structured(&report, ctx.output())?;

    match failed {
        Some((operation, errors)) => Err(OperationFailed::new(operation, errors).into()),
        None => Ok(()),
    }
}
