use anyhow::Result;
use blobkit_errors::prelude::ErrorCode;
use blobkit_store::prelude::*;
use clap::Args;
use serde::Serialize;

use super::context::CliContext;
use super::output::{emit_structured, report_failure};
use crate::console::ConsoleWriter;
use crate::errors::OperationFailed;

#[derive(Args, Clone, Debug)]
pub struct ValidateArgs {
    /// Path in the form CONTAINER/PATH
    pub path: String,
}

#[derive(Debug, Serialize)]
struct ValidationReport<'a> {
    path: &'a str,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    parts: Option<PathParts>,
    violations: Vec<ViolationView>,
}

#[derive(Debug, Serialize)]
struct ViolationView {
    kind: ViolationKind,
    code: ErrorCode,
    message: String,
}

impl From<&Violation> for ViolationView {
    fn from(violation: &Violation) -> Self {
        Self {
            kind: violation.kind,
            code: violation.kind.code(),
            message: violation.message.clone(),
        }
    }
}

pub fn cmd_validate(args: ValidateArgs, ctx: &CliContext) -> Result<()> {
    let parsed = parse_blob_path(&args.path);
    let report = match parsed {
        Ok(parts) => ValidationReport {
            path: &args.path,
            valid: true,
            parts: Some(parts),
            violations: Vec::new(),
        },
        Err(invalid) => ValidationReport {
            path: &args.path,
            valid: false,
            parts: None,
            violations: invalid.violations().iter().map(ViolationView::from).collect(),
        },
    };

    if !ctx.output().is_human() {
        emit_structured(&report, ctx.output())?;
        if report.valid {
            return Ok(());
        }
        return Err(OperationFailed::new("validate", report.violations.len()).into());
    }

    let mut console = ConsoleWriter::stdout();
    match &report.parts {
        Some(parts) => {
            console.success_line(&format!("Path '{}' is valid.", args.path))?;
            console.line(&format!("  container: {}", parts.container()))?;
            console.line(&format!("  blob path: {}", parts.blob_path()))?;
            Ok(())
        }
        None => {
            let messages: Vec<String> = report
                .violations
                .iter()
                .map(|v| v.message.clone())
                .collect();
            Err(report_failure(
                &mut console,
                "validate",
                &format!("Path '{}' is invalid.", args.path),
                &messages,
            )?)
        }
    }
}
