use std::io;

use dialoguer::theme::ColorfulTheme;

use crate::{
    cli::{output, prompts},
    config::ConfigManager,
    core::services::ReportService,
    errors::CliError,
    utils::build_info,
};

/// Presence of this variable switches the CLI to line-oriented stdin input.
pub const SCRIPT_ENV: &str = "SALES_REPORT_SCRIPT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

impl CliMode {
    pub fn from_env() -> Self {
        if std::env::var_os(SCRIPT_ENV).is_some() {
            CliMode::Script
        } else {
            CliMode::Interactive
        }
    }
}

/// Collects a period from the operator and writes its report.
pub fn run_cli() -> Result<(), CliError> {
    let mode = CliMode::from_env();
    if mode == CliMode::Script {
        colored::control::set_override(false);
    }

    output::section(build_info::current().banner());

    let manager = ConfigManager::from_env();
    let config = manager.load()?.with_env_overrides();
    tracing::debug!(config = %manager.path().display(), ?mode, "configuration loaded");

    let period = match mode {
        CliMode::Interactive => prompts::prompt_period(&ColorfulTheme::default())?,
        CliMode::Script => prompts::read_period(io::stdin().lock())?,
    };

    let service = ReportService::from_config(&config)?;
    let path = service.run(period.year, period.month)?;
    output::success(format!(
        "Report for {period} created at {}",
        path.display()
    ));
    Ok(())
}
