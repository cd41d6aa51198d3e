use crate::{
    cli::ExitStatus,
    core::{ConversionContext, data::ConversionRecord},
};

#[derive(Debug)]
pub enum CommandSummary {
    Convert(ConvertSummary),
    Scan(ScanSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ConvertSummary {
    /// The file as given on the command line.
    pub file: String,
    pub ctx: ConversionContext,
    pub original: String,
    pub output: String,
    pub print_diff: bool,
    pub list_keys: bool,
    pub written: bool,
}

#[derive(Debug)]
pub struct FileFindings {
    /// Path relative to the scanned directory.
    pub file: String,
    pub records: Vec<ConversionRecord>,
}

#[derive(Debug)]
pub struct ScanSummary {
    pub files_scanned: usize,
    /// Files with at least one convertible string, sorted by path.
    pub findings: Vec<FileFindings>,
    /// One message per file that failed to load or parse.
    pub parse_errors: Vec<String>,
    pub top: usize,
}

impl ScanSummary {
    pub fn candidate_count(&self) -> usize {
        self.findings.iter().map(|f| f.records.len()).sum()
    }
}

#[derive(Debug)]
pub struct InitSummary {
    pub file_name: &'static str,
}

/// Result of running a command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub exit_status: ExitStatus,
    pub verbose: bool,
}
