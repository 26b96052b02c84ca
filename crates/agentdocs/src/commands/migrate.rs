//! Agent file migration command.

use std::path::PathBuf;

use agentdocs_config::{CliSettings, Config};
use agentdocs_migrate::{DocumentStatus, MigrateSummary, Migrator};
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the migrate command.
#[derive(Args)]
pub(crate) struct MigrateArgs {
    /// Directory containing agent definition files (overrides config).
    agents_dir: Option<PathBuf>,

    /// Plugin root path substituted into rewritten documents (overrides config).
    #[arg(long)]
    plugin_path: Option<String>,

    /// Path to configuration file (default: auto-discover agentdocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Preview changes without writing files.
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl MigrateArgs {
    /// Execute the migrate command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the agents directory cannot
    /// be read, or any document failed to update.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        // Build CLI settings from args
        let cli_settings = CliSettings {
            agents_dir: self.agents_dir,
            plugin_path: self.plugin_path,
        };

        // Load config
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        if self.dry_run {
            output.highlight("[DRY RUN] No files will be written.");
        }

        let migrator =
            Migrator::new(config.agents_dir, config.plugin.path).dry_run(self.dry_run);
        let summary = migrator.run()?;

        print_summary(&output, &summary);

        let failed = summary.failed();
        if failed > 0 {
            return Err(CliError::Incomplete(failed));
        }
        Ok(())
    }
}

fn print_summary(output: &Output, summary: &MigrateSummary) {
    for report in &summary.reports {
        match &report.status {
            DocumentStatus::Updated => output.success(&format!("Updated: {}", report.name)),
            DocumentStatus::Unchanged => output.info(&format!("Unchanged: {}", report.name)),
            DocumentStatus::Failed(message) => {
                output.error(&format!("Error updating {}: {message}", report.name));
            }
        }
        for warning in &report.warnings {
            output.warning(&format!("  {warning}"));
        }
    }

    output.info(&format!(
        "\nDone: {} updated, {} unchanged, {} failed. Please review the changes.",
        summary.updated(),
        summary.unchanged(),
        summary.failed()
    ));
    output.warning("Note: project-specific references (tech docs, repo layout, etc.) may need manual review.");
}
