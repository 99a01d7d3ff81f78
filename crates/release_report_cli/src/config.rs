//! Configuration management for the release report CLI.
//!
//! The configuration is stored in TOML format and names the repository to read
//! from, the releases a user may pick and the folders scripts live in. It can be
//! loaded from a specified file path or from the default location in the current
//! directory.
//!
//! Connection values can be overridden from the environment (`ADO_ORG`,
//! `ADO_PROJECT`, `ADO_REPO`, `ADO_BRANCH`). The personal access token is never
//! stored in the file; it is read from `ADO_PAT` only.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use ado_client::{connection::DEFAULT_API_VERSION, ConnectionSettings};
use release_report_core::ReleaseQuery;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::Error;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "release-report.toml";

/// Environment variable holding the personal access token
pub const TOKEN_ENV_VAR: &str = "ADO_PAT";

pub const ORGANIZATION_ENV_VAR: &str = "ADO_ORG";
pub const PROJECT_ENV_VAR: &str = "ADO_PROJECT";
pub const REPOSITORY_ENV_VAR: &str = "ADO_REPO";
pub const BRANCH_ENV_VAR: &str = "ADO_BRANCH";

const DEFAULT_BRANCH: &str = "main";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Main configuration structure for the release report CLI.
///
/// # Example TOML Configuration
///
/// ```toml
/// releases = ["1.0.0", "1.1.0", "1.2.0"]
///
/// [azure_devops]
/// organization_url = "https://dev.azure.com/contoso"
/// project = "Data Platform"
/// repository = "db-migrations"
/// branch = "main"
///
/// [folders]
/// folder1 = "folder1/scripts"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Releases offered for selection
    #[serde(default)]
    pub releases: Vec<String>,

    /// Repository the scripts are read from
    #[serde(default)]
    pub azure_devops: AzureDevOpsConfig,

    /// Folder label to repository-relative scripts path
    #[serde(default)]
    pub folders: BTreeMap<String, String>,
}

/// Location of the repository on Azure DevOps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AzureDevOpsConfig {
    #[serde(default)]
    pub organization_url: String,

    #[serde(default)]
    pub project: String,

    #[serde(default)]
    pub repository: String,

    #[serde(default = "default_branch")]
    pub branch: String,

    #[serde(default = "default_api_version")]
    pub api_version: String,
}

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

impl Default for AzureDevOpsConfig {
    fn default() -> Self {
        Self {
            organization_url: String::new(),
            project: String::new(),
            repository: String::new(),
            branch: default_branch(),
            api_version: default_api_version(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file does not exist, cannot be read, or
    /// does not contain a valid configuration.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use std::path::Path;
    /// use release_report_cli::config::AppConfig;
    ///
    /// let config_path = Path::new("./release-report.toml");
    /// match AppConfig::load(config_path) {
    ///     Ok(config) => println!("Loaded {} releases", config.releases.len()),
    ///     Err(e) => eprintln!("Failed to load config: {}", e),
    /// }
    /// ```
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read configuration file: {}", e)))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))?;

        Ok(config)
    }

    /// Loads configuration and applies the `ADO_*` overrides from the process
    /// environment.
    pub fn load_with_env(path: &Path) -> Result<Self, Error> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Saves the configuration to a TOML file, creating parent directories as
    /// needed and overwriting any existing file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if serialization fails or the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        debug!("Saving configuration to {:?}", path);

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize configuration: {}", e)))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create directory: {}", e)))?;
        }

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write configuration file: {}", e)))?;

        info!("Configuration saved to {:?}", path);
        Ok(())
    }

    /// Replaces connection values with non-empty values returned by `lookup`.
    ///
    /// `lookup` receives an environment variable name; production code passes
    /// `std::env::var`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let ado = &mut self.azure_devops;
        let targets = [
            (ORGANIZATION_ENV_VAR, &mut ado.organization_url),
            (PROJECT_ENV_VAR, &mut ado.project),
            (REPOSITORY_ENV_VAR, &mut ado.repository),
            (BRANCH_ENV_VAR, &mut ado.branch),
        ];

        for (name, target) in targets {
            if let Some(value) = lookup(name).filter(|v| !v.trim().is_empty()) {
                debug!(variable = name, "Applying environment override");
                *target = value.trim().to_string();
            }
        }
    }

    /// Checks that the configuration can drive a fetch.
    ///
    /// The token is not part of the file and is checked separately by
    /// [`AppConfig::connection_settings`].
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` naming the first problem found.
    pub fn validate(&self) -> Result<(), Error> {
        let ado = &self.azure_devops;
        let required = [
            ("azure_devops.organization_url", &ado.organization_url, ORGANIZATION_ENV_VAR),
            ("azure_devops.project", &ado.project, PROJECT_ENV_VAR),
            ("azure_devops.repository", &ado.repository, REPOSITORY_ENV_VAR),
        ];
        for (key, value, env_var) in required {
            if value.trim().is_empty() {
                return Err(Error::Config(format!(
                    "{key} is not set (set it in the configuration file or through {env_var})"
                )));
            }
        }

        if ado.branch.trim().is_empty() {
            return Err(Error::Config("azure_devops.branch must not be empty".to_string()));
        }

        if self.releases.is_empty() {
            return Err(Error::Config("No releases are configured".to_string()));
        }
        if let Some(blank) = self.releases.iter().find(|r| r.trim().is_empty()) {
            return Err(Error::Config(format!("Invalid release identifier: {:?}", blank)));
        }

        if self.folders.is_empty() {
            return Err(Error::Config("No folders are configured".to_string()));
        }
        if let Some((label, _)) = self.folders.iter().find(|(_, p)| p.trim().is_empty()) {
            return Err(Error::Config(format!(
                "Folder '{label}' has an empty scripts path"
            )));
        }

        Ok(())
    }

    /// Builds the connection settings for the configured repository.
    ///
    /// `token` is the value of `ADO_PAT`, see [`read_token_from_env`].
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration is incomplete or no token was
    /// provided.
    pub fn connection_settings(&self, token: Option<String>) -> Result<ConnectionSettings, Error> {
        self.validate()?;

        let token = token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::Config(format!("{TOKEN_ENV_VAR} is not set")))?;

        let ado = &self.azure_devops;
        let mut settings = ConnectionSettings::new(
            &ado.organization_url,
            &ado.project,
            &ado.repository,
            &ado.branch,
            SecretString::from(token),
        );
        settings.api_version = ado.api_version.clone();

        Ok(settings)
    }

    /// Turns the user's release and folder choice into a query.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArguments` if the release is not configured or the
    /// folder label is unknown.
    pub fn resolve_query(&self, release: &str, folder: &str) -> Result<ReleaseQuery, Error> {
        let release = release.trim();
        if !self.releases.iter().any(|r| r == release) {
            return Err(Error::InvalidArguments(format!(
                "Unknown release '{}'. Configured releases: {}",
                release,
                self.releases.join(", ")
            )));
        }

        let scripts_path = self.folders.get(folder).ok_or_else(|| {
            Error::InvalidArguments(format!(
                "Unknown folder '{}'. Configured folders: {}",
                folder,
                self.folders.keys().cloned().collect::<Vec<_>>().join(", ")
            ))
        })?;

        Ok(ReleaseQuery::new(release, folder, scripts_path))
    }
}

impl Default for AppConfig {
    /// Starter configuration written by `config init`.
    fn default() -> Self {
        let folders = ["folder1", "folder2", "folder3"]
            .into_iter()
            .map(|label| (label.to_string(), format!("{label}/scripts")))
            .collect();

        Self {
            releases: vec!["1.0.0".to_string(), "1.1.0".to_string(), "1.2.0".to_string()],
            azure_devops: AzureDevOpsConfig::default(),
            folders,
        }
    }
}

/// Reads the personal access token from `ADO_PAT`.
pub fn read_token_from_env() -> Option<String> {
    std::env::var(TOKEN_ENV_VAR).ok()
}

/// Resolves the configuration file path.
///
/// Returns the provided path or `release-report.toml` in the current directory.
pub fn get_config_path(path: Option<&str>) -> PathBuf {
    match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(DEFAULT_CONFIG_FILENAME),
    }
}
