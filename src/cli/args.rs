//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - (default) / `convert`: rewrite one source file
//! - `scan`: list convertible strings across a source tree without writing
//! - `init`: write a default configuration file

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None, args_conflicts_with_subcommands = true)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Top-level flags behave like `convert`
    #[command(flatten)]
    pub convert: ConvertArgs,
}

impl Arguments {
    /// Resolve the top-level flags into an explicit command.
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Convert(self.convert))
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Convert(args)) => args.verbose,
            Some(Command::Scan(args)) => args.verbose,
            Some(Command::Init) => false,
            None => self.convert.verbose,
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct ConvertArgs {
    /// Source file to convert, relative to the working directory
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Write changes to disk (default is dry-run)
    #[arg(long)]
    pub write: bool,

    /// Print a line diff of the changes
    #[arg(long)]
    pub print: bool,

    /// List every generated key with its original text
    #[arg(long)]
    pub report: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ScanArgs {
    /// Project directory to scan (default: current directory)
    pub path: Option<PathBuf>,

    /// Number of most frequent strings to show
    #[arg(long, default_value_t = 20)]
    pub top: usize,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replace UI strings in one file with translation lookups
    Convert(ConvertArgs),
    /// List convertible UI strings across the project without changing files
    Scan(ScanArgs),
    /// Initialize a new .i18n-codemod.json configuration file
    Init,
}
