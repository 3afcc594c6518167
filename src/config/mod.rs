//! Configuration management for Suppressor

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::{CacheOptions, CacheTiming, ModuleKeyFormat};
use crate::error::{ConfigError, Result};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Key of the server project whose suppressions are cached
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_key: Option<String>,

    /// Recorded server response served as the issue source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues_file: Option<PathBuf>,

    /// Template used to build module keys from local project ids
    #[serde(default)]
    pub module_key_format: ModuleKeyFormat,

    /// Seconds between background refreshes
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Seconds a cold read waits for the first snapshot
    #[serde(default = "default_first_snapshot_timeout_secs")]
    pub first_snapshot_timeout_secs: u64,
}

fn default_refresh_interval_secs() -> u64 {
    CacheTiming::REFRESH_INTERVAL.as_secs()
}

fn default_first_snapshot_timeout_secs() -> u64 {
    CacheTiming::FIRST_SNAPSHOT_WAIT.as_secs()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_key: None,
            issues_file: None,
            module_key_format: ModuleKeyFormat::default(),
            refresh_interval_secs: default_refresh_interval_secs(),
            first_snapshot_timeout_secs: default_first_snapshot_timeout_secs(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".suppressor").join("config.yaml"))
    }

    /// Resolve an optional override to a concrete path.
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path()?)
    }

    /// Load configuration from `path`, or the default path when `None`.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path)?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;

        // Set file permissions to 600 on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Apply command-line overrides on top of file values.
    pub fn with_overrides(mut self, project_key: Option<&str>, issues_file: Option<&str>) -> Self {
        if let Some(project_key) = project_key {
            self.project_key = Some(project_key.to_string());
        }
        if let Some(issues_file) = issues_file {
            self.issues_file = Some(PathBuf::from(issues_file));
        }
        self
    }

    /// Validate that the configuration can drive a cache.
    ///
    /// The module-key format is checked when the file is parsed.
    pub fn validate(&self) -> Result<()> {
        self.require_project_key()?;
        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::Invalid("refresh_interval_secs must be positive".into()).into());
        }
        if self.first_snapshot_timeout_secs == 0 {
            return Err(
                ConfigError::Invalid("first_snapshot_timeout_secs must be positive".into()).into(),
            );
        }
        Ok(())
    }

    pub fn require_project_key(&self) -> Result<&str> {
        match self.project_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ConfigError::MissingProjectKey.into()),
        }
    }

    pub fn require_issues_file(&self) -> Result<&Path> {
        self.issues_file
            .as_deref()
            .ok_or_else(|| ConfigError::MissingIssuesFile.into())
    }

    /// Cache construction options described by this configuration.
    pub fn cache_options(&self) -> CacheOptions {
        CacheOptions {
            refresh_interval: Duration::from_secs(self.refresh_interval_secs),
            first_snapshot_timeout: Duration::from_secs(self.first_snapshot_timeout_secs),
            module_key_format: self.module_key_format.clone(),
        }
    }
}
