//! CLI error types.

use agentdocs_config::ConfigError;
use agentdocs_migrate::MigrateError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Migrate(#[from] MigrateError),

    #[error("{0} document(s) could not be updated")]
    Incomplete(usize),
}
