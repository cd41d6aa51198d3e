use std::{fs, path::Path};

use anyhow::{Result, bail};

use super::{CommandResult, CommandSummary, InitSummary};
use crate::{
    cli::ExitStatus,
    config::{CONFIG_FILE_NAME, default_config_json},
};

pub fn init(dir: &Path) -> Result<CommandResult> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(&config_path, default_config_json()?)?;

    Ok(CommandResult {
        summary: CommandSummary::Init(InitSummary {
            file_name: CONFIG_FILE_NAME,
        }),
        exit_status: ExitStatus::Success,
        verbose: false,
    })
}
