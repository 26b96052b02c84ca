//! Configuration management for agentdocs.
//!
//! Parses `agentdocs.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the agents directory.
    pub agents_dir: Option<PathBuf>,
    /// Override the plugin root path.
    pub plugin_path: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "agentdocs.toml";

/// Default plugin root path written into rewritten documents.
///
/// Kept literal, `~` included: the value is substituted into document text,
/// not resolved against the local filesystem.
pub const DEFAULT_PLUGIN_PATH: &str = "~/.claude/plugins/repos/software-dev-workflow";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Agents configuration (paths are relative strings from TOML).
    agents: AgentsConfigRaw,
    /// Plugin configuration.
    pub plugin: PluginConfig,

    /// Resolved agents directory (set after loading).
    #[serde(skip)]
    pub agents_dir: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw agents configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct AgentsConfigRaw {
    dir: Option<String>,
}

/// Plugin configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Plugin root path substituted into rewritten documents.
    pub path: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_PLUGIN_PATH.to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `agentdocs.toml` in the current directory and
    /// parents, falling back to defaults when none exists.
    ///
    /// CLI settings are applied after loading and path resolution, allowing
    /// CLI arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist, parsing
    /// fails, or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(agents_dir) = &settings.agents_dir {
            self.agents_dir.clone_from(agents_dir);
        }
        if let Some(plugin_path) = &settings.plugin_path {
            self.plugin.path.clone_from(plugin_path);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            agents: AgentsConfigRaw::default(),
            plugin: PluginConfig::default(),
            agents_dir: base.join("agents"),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.plugin.path.is_empty() {
            return Err(ConfigError::Validation(
                "plugin.path cannot be empty".to_owned(),
            ));
        }
        if self.agents_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "agents.dir cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.agents_dir = config_dir.join(self.agents.dir.as_deref().unwrap_or("agents"));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.agents_dir, PathBuf::from("/test/agents"));
        assert_eq!(config.plugin.path, DEFAULT_PLUGIN_PATH);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let toml = "";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.plugin.path, DEFAULT_PLUGIN_PATH);
    }

    #[test]
    fn test_parse_plugin_config() {
        let toml = r#"
[plugin]
path = "/opt/plugins/workflow"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.plugin.path, "/opt/plugins/workflow");
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[agents]
dir = "team/agents"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(config.agents_dir, PathBuf::from("/project/team/agents"));
    }

    #[test]
    fn test_resolve_paths_default_dir() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(config.agents_dir, PathBuf::from("/project/agents"));
    }

    #[test]
    fn test_apply_cli_settings_agents_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            agents_dir: Some(PathBuf::from("/custom/agents")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.agents_dir, PathBuf::from("/custom/agents"));
        assert_eq!(config.plugin.path, DEFAULT_PLUGIN_PATH); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_plugin_path() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            plugin_path: Some("/opt/plugin".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.plugin.path, "/opt/plugin");
        assert_eq!(config.agents_dir, PathBuf::from("/test/agents")); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.agents_dir, PathBuf::from("/test/agents"));
        assert_eq!(config.plugin.path, DEFAULT_PLUGIN_PATH);
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_plugin_path() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.plugin.path = String::new();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("plugin.path"));
    }
}
