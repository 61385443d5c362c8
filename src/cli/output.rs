use anyhow::Result;
use blobkit_store::Outcome;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn is_human(&self) -> bool {
        matches!(self, OutputFormat::Human)
    }
}

/// Machine-readable result of one storage operation.
#[derive(Debug, Serialize)]
pub struct OperationReport<T> {
    pub operation: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<T>,
    pub errors: Vec<String>,
}

impl<T> OperationReport<T> {
    pub fn from_outcome(operation: &'static str, target: Option<&str>, outcome: Outcome<T>) -> Self {
        let (value, errors) = match outcome.into_result() {
            Ok(value) => (Some(value), Vec::new()),
            Err(errors) => (None, errors),
        };
        Self {
            operation,
            target: target.map(str::to_string),
            ok: value.is_some(),
            value,
            errors,
        }
    }
}

pub fn emit_structured<T: Serialize>(payload: &T, output: &OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(payload)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(payload)?),
        OutputFormat::Human => {}
    }
    Ok(())
}

/// Emits `report` and fails with [`OperationFailed`](crate::errors::OperationFailed) when it is not ok.
pub fn emit_report<T: Serialize>(report: &OperationReport<T>, output: &OutputFormat) -> Result<()> {
    emit_structured(report, output)?;
    if report.ok {
        return Ok(());
    }
    Err(crate::errors::OperationFailed::new(report.operation, report.errors.len()).into())
}

/// Prints `headline` and the error list, then yields the error the binary turns into exit status 1.
pub fn report_failure<W: std::io::Write>(
    console: &mut crate::console::ConsoleWriter<W>,
    operation: &'static str,
    headline: &str,
    errors: &[String],
) -> Result<anyhow::Error> {
    console.error_line(headline)?;
    console.errors(errors)?;
    Ok(crate::errors::OperationFailed::new(operation, errors.len()).into())
}
