//! Core implementation of drush-stack
//!
//! drush-stack composes Drush invocations with shared global options (Drupal
//! root, URI, verbosity), a leading site alias and per-command arguments, then
//! runs them one after another with optional stop-on-fail. A stack can be
//! built in code through [`DrushStack`] or described in a `.drush-stack.yaml`
//! file and loaded with [`load_stack`].

use std::path::PathBuf;

use log::debug;

use crate::config_file::{Config, ConfigError};
use crate::executor::Executor;

pub mod commands;
pub mod config_file;
pub mod executor;
pub mod logger;
pub mod report;
pub mod shell;

pub use commands::arguments::{ArgumentAccumulator, CommandText};
pub use commands::queue::ExecutionQueue;
pub use commands::stack::DrushStack;
pub use commands::version::DrushVersion;
pub use executor::{ExecutionResult, ShellExecutor};

/// Locate and validate a stack file, returning it with its directory and path.
///
/// # Errors
///
/// Returns `ConfigError` if the stack file is not found, cannot be parsed or
/// contains invalid values.
pub fn load_config(config_file: Option<&str>) -> Result<(Config, PathBuf, PathBuf), ConfigError> {
    let config_path = match config_file {
        Some(file) => {
            let config_path = PathBuf::from(file);
            if !config_path.exists() {
                return Err(ConfigError::ConfigNotFound(config_path));
            }
            config_path
        }
        None => Config::find_config()?,
    };
    let cwd = config_path
        .parent()
        .ok_or_else(|| ConfigError::ConfigNotFound(config_path.clone()))?
        .to_path_buf();
    debug!(
        "Loading stack file: {} (cwd: {})",
        config_path.display(),
        cwd.display()
    );
    let config = Config::from_file(&config_path)?;
    config.validate()?;
    Ok((config, cwd, config_path))
}

/// Load a stack file and compose its steps into a stack using `executor`.
///
/// Steps that depend on the Drush version (`update_db`) query it through
/// `executor` while the stack is built.
///
/// # Errors
///
/// Returns `ConfigError` under the same conditions as [`load_config`].
pub fn load_stack<E: Executor>(
    config_file: Option<&str>,
    executor: E,
) -> Result<(DrushStack<E>, PathBuf, PathBuf), ConfigError> {
    let (config, cwd, config_path) = load_config(config_file)?;
    let stack = config.build_stack(&cwd, executor);
    Ok((stack, cwd, config_path))
}
