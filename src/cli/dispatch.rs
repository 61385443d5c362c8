use super::env::CliArgs;
use super::list::cmd_list;
use super::read::cmd_read;
use super::run::cmd_run;
use super::validate::cmd_validate;
use super::write::cmd_write;
use crate::cli::commands::Commands;
use crate::cli::context::CliContext;
use anyhow::Result;

pub async fn dispatch(cli: &CliArgs, ctx: &CliContext) -> Result<()> {
    match cli.command.clone() {
        Commands::Run(args) => cmd_run(args, ctx).await,
        Commands::List(args) => cmd_list(args, ctx).await,
        Commands::Read(args) => cmd_read(args, ctx).await,
        Commands::Write(args) => cmd_write(args, ctx).await,
        Commands::Validate(args) => cmd_validate(args, ctx),
    }
}
