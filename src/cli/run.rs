//! Dispatches a parsed command to its handler.
//!
//! Handlers take the working directory explicitly so they can be driven from
//! tests without touching the process state.

use std::path::Path;

use anyhow::Result;

use super::{
    args::Command,
    commands::{CommandResult, convert::convert, init::init, scan::scan},
};

pub fn run(command: Command, cwd: &Path) -> Result<CommandResult> {
    match command {
        Command::Convert(args) => convert(args, cwd),
        Command::Scan(args) => scan(args, cwd),
        Command::Init => init(cwd),
    }
}
