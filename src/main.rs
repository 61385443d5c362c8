use std::process::ExitCode;

use blobkit_cli::cli;
use blobkit_cli::errors::OperationFailed;

#[tokio::main]
async fn main() -> ExitCode {
    match cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        // Error lines were already printed by the command.
        Err(err) if err.downcast_ref::<OperationFailed>().is_some() => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
