use std::{env, process::ExitCode};

use anyhow::Result;
use clap::{CommandFactory, error::ErrorKind};

mod args;
pub mod commands;
mod exit_status;
pub mod report;
mod run;
mod side_files;

pub use args::{Arguments, Command, ConvertArgs, ScanArgs};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let command = args.into_command();

    if let Command::Convert(ConvertArgs { file: None, .. }) = &command {
        let _ = Arguments::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "the following required argument was not provided: --file <PATH>",
            )
            .print();
        return Ok(ExitStatus::Error.into());
    }

    let cwd = env::current_dir()?;
    let result = run::run(command, &cwd)?;
    report::print(&result);

    Ok(result.exit_status.into())
}
