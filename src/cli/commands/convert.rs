use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use super::{CommandResult, CommandSummary, ConvertSummary};
use crate::{
    cli::{
        ExitStatus,
        args::ConvertArgs,
        side_files::{append_manual_log, append_modified_log},
    },
    config::{KeyTables, load_config},
    core::{Codemod, ConversionContext, NamespaceResolver, SourceUnit},
};

/// Convert the single file named by `args`, resolved against `cwd`.
///
/// Side files are appended in `cwd`. A parse failure aborts before anything
/// is written.
pub fn convert(args: ConvertArgs, cwd: &Path) -> Result<CommandResult> {
    let Some(file) = args.file else {
        bail!("missing required argument --file");
    };
    let display_path = file.to_string_lossy().into_owned();
    let path = cwd.join(&file);
    if !path.is_file() {
        bail!("File not found: {}", display_path);
    }

    let loaded = load_config(cwd)?;
    if !loaded.from_file {
        debug!("no config file found, using defaults");
    }
    let tables = KeyTables::load(&loaded.config, &loaded.base_dir)?;
    let resolver = NamespaceResolver::from_config(&loaded.config);
    let unit = SourceUnit::load(&path, &display_path, &resolver)?;

    let codemod = Codemod::new(&loaded.config, &tables);
    let mut ctx = ConversionContext::new(&unit.display_path, unit.ns_group.clone());
    let output = codemod.transform(&unit.text, &mut ctx)?;

    if !ctx.manual.is_empty() {
        append_manual_log(cwd, &display_path, &ctx.manual)?;
    }

    let changed = output != unit.text;
    let written = args.write && changed;
    if written {
        fs::write(&path, &output).with_context(|| format!("Failed to write {}", display_path))?;
        append_modified_log(cwd, &display_path)?;
        info!(file = %display_path, keys = ctx.stats.total(), "wrote converted file");
    }

    Ok(CommandResult {
        summary: CommandSummary::Convert(ConvertSummary {
            file: display_path,
            ctx,
            original: unit.text,
            output,
            print_diff: args.print,
            list_keys: args.report,
            written,
        }),
        exit_status: ExitStatus::Success,
        verbose: args.verbose,
    })
}
