use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use clap::Parser;
use colored::Colorize;
use i18n_codemod::cli::{Arguments, ExitStatus};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Arguments::parse();

    let default_filter = if args.verbose() {
        "i18n_codemod=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env("I18N_CODEMOD_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();

    match i18n_codemod::cli::run_cli(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {:#}", "error:".bold().red(), err);
            ExitStatus::Error.into()
        }
    }
}
