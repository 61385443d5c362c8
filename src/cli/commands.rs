use clap::Subcommand;

use super::list::ListArgs;
use super::read::ReadArgs;
use super::run::RunArgs;
use super::validate::ValidateArgs;
use super::write::WriteArgs;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// List the input container, read the input file, then write the output file
    Run(RunArgs),

    /// List the blobs in a container
    List(ListArgs),

    /// Print the first line of a blob
    Read(ReadArgs),

    /// Write a line of text (a timestamp by default) to a blob
    Write(WriteArgs),

    /// Check a container/path string against the naming rules
    Validate(ValidateArgs),
}
