//! Stack file handling for drush-stack

use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::commands::stack::DrushStack;
use crate::executor::Executor;
use crate::shell::FlagValue;

/// Errors that can occur while loading a stack file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No stack file found in current directory or its parents: {0}")]
    ConfigNotFound(PathBuf),
    #[error("Unknown working directory: {0}")]
    UnknownWorkingDirectory(String),
    #[error("Unable to parse YAML stack file {path}: {source}")]
    Yaml {
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("Unable to parse JSON stack file {path}: {source}")]
    Json {
        source: serde_json::Error,
        path: PathBuf,
    },
    #[error("Invalid stack file: {0}")]
    Validation(String),
}

/// A loosely typed flag as written in a stack file (`true`, `1`, `"0"`, ...)
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ConfigFlag {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl From<ConfigFlag> for FlagValue {
    fn from(flag: ConfigFlag) -> Self {
        match flag {
            ConfigFlag::Bool(b) => FlagValue::Bool(b),
            ConfigFlag::Int(i) => FlagValue::Int(i),
            ConfigFlag::Str(s) => FlagValue::Str(s),
        }
    }
}

/// Options for a `site-install` step
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ConfigSiteInstall {
    pub profile: String,
    pub site_name: Option<String>,
    pub site_mail: Option<String>,
    pub sites_subdir: Option<String>,
    pub locale: Option<String>,
    pub account_mail: Option<String>,
    pub account_name: Option<String>,
    pub account_pass: Option<String>,
    pub db_prefix: Option<String>,
    pub db_su: Option<String>,
    pub db_su_pw: Option<String>,
    pub db_url: Option<String>,
    pub config_dir: Option<String>,
    pub existing_config: Option<ConfigFlag>,
    #[serde(default)]
    pub disable_update_status_module: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ConfigRevertFeatures {
    #[serde(default)]
    pub force: bool,
    #[serde(default)]
    pub excluded: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConfigDrushCommand {
    pub command: String,
    #[serde(default = "default_true")]
    pub assume_yes: bool,
}

/// A single entry of the `steps` list
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ConfigStep {
    Status,
    MaintenanceOn,
    MaintenanceOff,
    UpdateDb,
    ClearCache(String),
    RevertAllFeatures(ConfigRevertFeatures),
    SiteInstall(ConfigSiteInstall),
    Drush(ConfigDrushCommand),
}

fn default_true() -> bool {
    true
}

fn default_drush() -> String {
    "drush".to_string()
}

/// Root structure of a stack file
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_drush")]
    pub drush: String,
    pub root: Option<String>,
    pub uri: Option<String>,
    pub alias: Option<String>,
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub simulate: bool,
    #[serde(default = "default_true")]
    pub stop_on_fail: bool,
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub steps: Vec<ConfigStep>,
}

/// List of supported stack file names
const FILENAMES: [&str; 3] = [".drush-stack.json", ".drush-stack.yaml", ".drush-stack.yml"];

impl Config {
    /// Loads and parses a stack file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if the file cannot be read, or
    /// `ConfigError::Yaml`/`ConfigError::Json` if parsing fails.
    pub fn from_file(file: &Path) -> Result<Config, ConfigError> {
        let contents = std::fs::read_to_string(file)
            .map_err(|_| ConfigError::ConfigNotFound(file.to_path_buf()))?;
        let config: Config = if file.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&contents).map_err(|e| ConfigError::Json {
                source: e,
                path: file.to_path_buf(),
            })?
        } else {
            serde_yaml::from_str(&contents).map_err(|e| ConfigError::Yaml {
                source: e,
                path: file.to_path_buf(),
            })?
        };
        Ok(config)
    }

    /// Searches for a stack file in the current directory and its parents.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownWorkingDirectory` if the cwd cannot be determined,
    /// or `ConfigError::ConfigNotFound` if no stack file is found.
    pub fn find_config() -> Result<PathBuf, ConfigError> {
        let config_path = std::env::current_dir()
            .map_err(|e| ConfigError::UnknownWorkingDirectory(e.to_string()))?;
        let mut path = config_path.clone();
        debug!("Searching for stack file in {}", config_path.display());
        loop {
            for file in &FILENAMES {
                let config_path = path.join(file);
                if config_path.exists() {
                    info!("Found stack file: {}", config_path.display());
                    return Ok(config_path);
                }
            }
            if !path.pop() {
                return Err(ConfigError::ConfigNotFound(config_path));
            }
        }
    }

    /// Reject values that would only fail once the stack runs.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` for an empty executable, an empty
    /// `drush` step command or a `site_install` step without a profile.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.drush.trim().is_empty() {
            return Err(ConfigError::Validation(
                "`drush` executable must not be empty".to_string(),
            ));
        }
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                ConfigStep::Drush(cmd) if cmd.command.trim().is_empty() => {
                    return Err(ConfigError::Validation(format!(
                        "Step {} has an empty command",
                        i + 1
                    )));
                }
                ConfigStep::SiteInstall(install) if install.profile.trim().is_empty() => {
                    return Err(ConfigError::Validation(format!(
                        "Step {} installs a site without a profile",
                        i + 1
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Resolve the executable against `cwd` when it is a relative path.
    ///
    /// Bare names such as `drush` are left for `PATH` lookup.
    #[must_use]
    pub fn executable(&self, cwd: &Path) -> String {
        let drush = Path::new(&self.drush);
        if drush.is_relative() && self.drush.contains('/') {
            cwd.join(drush).to_string_lossy().into_owned()
        } else {
            self.drush.clone()
        }
    }

    /// Build a stack with every global option and step applied.
    #[must_use]
    pub fn build_stack<E: Executor>(&self, cwd: &Path, executor: E) -> DrushStack<E> {
        let mut stack = DrushStack::with_executor(self.executable(cwd), executor);
        stack.stop_on_fail(self.stop_on_fail);
        if let Some(root) = &self.root {
            stack.drupal_root_directory(root);
        }
        if let Some(uri) = &self.uri {
            stack.uri(uri);
        }
        if let Some(alias) = &self.alias {
            stack.site_alias(alias);
        }
        if self.debug {
            stack.debug();
        }
        if self.verbose {
            stack.verbose();
        }
        if self.simulate {
            stack.simulate();
        }
        for step in &self.steps {
            step.apply(&mut stack);
        }
        stack
    }
}

impl ConfigStep {
    fn apply<E: Executor>(&self, stack: &mut DrushStack<E>) {
        match self {
            ConfigStep::Status => {
                stack.status();
            }
            ConfigStep::MaintenanceOn => {
                stack.maintenance_on();
            }
            ConfigStep::MaintenanceOff => {
                stack.maintenance_off();
            }
            ConfigStep::UpdateDb => {
                stack.update_db();
            }
            ConfigStep::ClearCache(bin) => {
                stack.clear_cache(bin);
            }
            ConfigStep::RevertAllFeatures(revert) => {
                stack.revert_all_features(revert.force, &revert.excluded);
            }
            ConfigStep::SiteInstall(install) => install.apply(stack),
            ConfigStep::Drush(cmd) => {
                stack.drush(cmd.command.as_str(), cmd.assume_yes);
            }
        }
    }
}

impl ConfigSiteInstall {
    fn apply<E: Executor>(&self, stack: &mut DrushStack<E>) {
        if let Some(site_name) = &self.site_name {
            stack.site_name(site_name);
        }
        if let Some(site_mail) = &self.site_mail {
            stack.site_mail(site_mail);
        }
        if let Some(sites_subdir) = &self.sites_subdir {
            stack.sites_subdir(sites_subdir);
        }
        if let Some(locale) = &self.locale {
            stack.locale(locale);
        }
        if let Some(account_mail) = &self.account_mail {
            stack.account_mail(account_mail);
        }
        if let Some(account_name) = &self.account_name {
            stack.account_name(account_name);
        }
        if let Some(account_pass) = &self.account_pass {
            stack.account_pass(account_pass);
        }
        if let Some(db_prefix) = &self.db_prefix {
            stack.db_prefix(db_prefix);
        }
        if let Some(db_su) = &self.db_su {
            stack.db_su(db_su);
        }
        if let Some(db_su_pw) = &self.db_su_pw {
            stack.db_su_pw(db_su_pw);
        }
        if let Some(db_url) = &self.db_url {
            stack.db_url(db_url);
        }
        if let Some(config_dir) = &self.config_dir {
            stack.config_dir(config_dir);
        }
        if let Some(flag) = &self.existing_config {
            stack.existing_config(flag.clone());
        }
        if self.disable_update_status_module {
            stack.disable_update_status_module();
        }
        stack.site_install(&self.profile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".drush-stack.json");
        std::fs::write(
            &path,
            r#"{
                "drush": "vendor/bin/drush",
                "root": "/var/www/html",
                "steps": ["status", {"clear_cache": "menu"}]
            }"#,
        )
        .unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.drush, "vendor/bin/drush");
        assert!(config.stop_on_fail);
        assert_eq!(
            config.steps,
            vec![ConfigStep::Status, ConfigStep::ClearCache("menu".to_string())]
        );
    }

    #[test]
    fn test_from_file_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".drush-stack.yaml");
        std::fs::write(
            &path,
            "alias: '@qa'\nsteps:\n  - maintenance_on\n  - drush:\n      command: en views\n      assume_yes: false\n",
        )
        .unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.drush, "drush");
        assert_eq!(config.alias.as_deref(), Some("@qa"));
        assert_eq!(
            config.steps[1],
            ConfigStep::Drush(ConfigDrushCommand {
                command: "en views".to_string(),
                assume_yes: false,
            })
        );
    }

    #[test]
    fn test_invalid_yaml_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".drush-stack.yaml");
        std::fs::write(&path, "steps: [not_a_step]\n").unwrap();
        match Config::from_file(&path) {
            Err(ConfigError::Yaml { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected ConfigError::Yaml, got: {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_empty_command() {
        let config: Config =
            serde_yaml::from_str("steps:\n  - drush:\n      command: ' '\n").unwrap();
        match config.validate() {
            Err(ConfigError::Validation(msg)) => assert!(msg.contains("empty command"), "got: {msg}"),
            other => panic!("Expected Validation error, got: {other:?}"),
        }
    }

    #[test]
    fn test_executable_resolution() {
        let cwd = Path::new("/srv/site");
        let mut config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.executable(cwd), "drush");
        config.drush = "vendor/bin/drush".to_string();
        assert_eq!(config.executable(cwd), "/srv/site/vendor/bin/drush");
        config.drush = "/usr/local/bin/drush".to_string();
        assert_eq!(config.executable(cwd), "/usr/local/bin/drush");
    }

    #[test]
    fn test_existing_config_flag_forms() {
        let config: Config = serde_yaml::from_str(
            "steps:\n  - site_install: { profile: minimal, existing_config: '0' }\n  - site_install: { profile: minimal, existing_config: 1 }\n",
        )
        .unwrap();
        let stack = config.build_stack(Path::new("."), crate::executor::ShellExecutor::new());
        assert_eq!(
            stack.queue().commands(),
            [
                "drush site-install minimal -y",
                "drush site-install minimal -y --existing-config",
            ]
        );
    }
}
