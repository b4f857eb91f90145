use crate::output::ColorMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "cgrep";
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the config file location
pub const CONFIG_PATH_ENV: &str = "CGREP_CONFIG";

/// User configuration, stored as JSON in the platform config directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Worker threads for scanning files in parallel.
    /// If 0, uses the number of CPU cores
    #[serde(default = "default_jobs")]
    pub jobs: usize,

    /// Files larger than this many bytes are skipped (0 = no limit)
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Skip files whose content looks binary
    #[serde(default = "default_skip_binary")]
    pub skip_binary: bool,

    /// When to color plain output
    #[serde(default)]
    pub color: ColorMode,
}

fn default_jobs() -> usize {
    0 // 0 means use CPU count
}

fn default_max_file_size() -> u64 {
    0
}

fn default_skip_binary() -> bool {
    false
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            jobs: default_jobs(),
            max_file_size: default_max_file_size(),
            skip_binary: default_skip_binary(),
            color: ColorMode::default(),
        }
    }
}

impl AppConfig {
    /// Load config from the config directory, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    /// Load config from a specific file, or return default if it does not exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;
        Ok(config)
    }

    /// Save config to the config directory
    pub fn save(&self) -> Result<()> {
        self.save_to(&get_config_path()?)
    }

    /// Save config to a specific file, creating its directory if needed
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(config_path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Get the effective worker count (resolves 0 to CPU count)
    pub fn effective_jobs(&self) -> usize {
        if self.jobs == 0 { num_cpus() } else { self.jobs }
    }

    /// The file size limit, if any
    pub fn max_file_size_limit(&self) -> Option<u64> {
        (self.max_file_size > 0).then_some(self.max_file_size)
    }
}

/// Get the number of CPUs available
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }
    Ok(get_app_config_dir()?.join(CONFIG_FILE))
}

/// Get the application config directory (not created)
pub fn get_app_config_dir() -> Result<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join("Library").join("Application Support"))
    } else {
        // Linux/Unix: XDG_CONFIG_HOME or ~/.config; Windows: %APPDATA%
        dirs::config_dir()
    };

    let base = base.context("Could not determine config directory")?;
    Ok(base.join(APP_NAME))
}
