use std::path::Path;

use anyhow::{Result, bail};
use rayon::prelude::*;
use tracing::debug;

use super::{CommandResult, CommandSummary, FileFindings, ScanSummary};
use crate::{
    cli::{ExitStatus, args::ScanArgs},
    config::{KeyTables, load_config},
    core::{
        Codemod, ConversionContext, NamespaceResolver, SourceUnit, file_scanner::scan_files,
    },
};

/// Run the conversion in dry mode over every source file under the project
/// root and collect what would be converted. Nothing is written.
pub fn scan(args: ScanArgs, cwd: &Path) -> Result<CommandResult> {
    let root = match &args.path {
        Some(path) => cwd.join(path),
        None => cwd.to_path_buf(),
    };
    if !root.is_dir() {
        bail!("Directory not found: {}", root.display());
    }

    let loaded = load_config(&root)?;
    let config = &loaded.config;
    let tables = KeyTables::load(config, &loaded.base_dir)?;
    let resolver = NamespaceResolver::from_config(config);
    let codemod = Codemod::new(config, &tables);

    let scanned = scan_files(
        &root,
        &config.includes,
        &config.ignores,
        config.ignore_test_files,
    );
    debug!(
        files = scanned.files.len(),
        skipped = scanned.skipped_count,
        "scanned source tree"
    );

    let files: Vec<&String> = scanned.files.iter().collect();
    let results: Vec<Result<FileFindings, String>> = files
        .par_iter()
        .map(|file| scan_file(Path::new(file.as_str()), &root, &codemod, &resolver))
        .collect();

    let mut findings = Vec::new();
    let mut parse_errors = Vec::new();
    for result in results {
        match result {
            Ok(found) if !found.records.is_empty() => findings.push(found),
            Ok(_) => {}
            Err(message) => parse_errors.push(message),
        }
    }

    let summary = ScanSummary {
        files_scanned: files.len(),
        findings,
        parse_errors,
        top: args.top,
    };
    let exit_status = if summary.candidate_count() > 0 {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    };

    Ok(CommandResult {
        summary: CommandSummary::Scan(summary),
        exit_status,
        verbose: args.verbose,
    })
}

fn scan_file(
    path: &Path,
    root: &Path,
    codemod: &Codemod,
    resolver: &NamespaceResolver,
) -> Result<FileFindings, String> {
    let display_path = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/");
    let unit = SourceUnit::load(path, &display_path, resolver).map_err(|e| e.to_string())?;
    let mut ctx = ConversionContext::new(&unit.display_path, unit.ns_group.clone());
    codemod
        .transform(&unit.text, &mut ctx)
        .map_err(|e| e.to_string())?;

    Ok(FileFindings {
        file: display_path,
        records: ctx.records,
    })
}
