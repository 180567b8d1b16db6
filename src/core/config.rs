use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

fn default_currency() -> String {
    "Rs".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Symbol prefixed to amounts in table output. Display only.
    #[serde(default = "default_currency")]
    pub currency: String,
    pub data_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            data_path: None,
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to defaults
    /// when no file has been created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = project_dirs()?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    /// Directory holding the ledger database.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = project_dirs()?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn ledger_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("ledger"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("org", "budgetflow", "budgetflow")
        .context("Could not determine project directories")
}
