//! The process primitive a stack runs its command lines through

use std::io::Write;
use std::path::PathBuf;
use std::process::Command as ProcessCommand;
use std::time::{Duration, Instant};

use log::debug;

/// Outcome of one shell invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    /// `None` when the process could not be spawned or was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

impl ExecutionResult {
    /// A successful result with no output, used when there was nothing to run.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            exit_code: Some(0),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Primary output text: stdout, or stderr when stdout is blank.
    #[must_use]
    pub fn output(&self) -> &str {
        if self.stdout.trim().is_empty() {
            &self.stderr
        } else {
            &self.stdout
        }
    }
}

/// Runs a shell command line and captures what it produced.
///
/// `printed` asks the implementation to echo the command's output to the
/// user; it never changes what is captured.
pub trait Executor {
    fn execute(&self, command_line: &str, printed: bool) -> ExecutionResult;
}

/// Executes command lines with `sh -c`, optionally in a fixed directory.
#[derive(Debug, Clone, Default)]
pub struct ShellExecutor {
    cwd: Option<PathBuf>,
}

impl ShellExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn in_dir(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(cwd.into()),
        }
    }
}

impl Executor for ShellExecutor {
    fn execute(&self, command_line: &str, printed: bool) -> ExecutionResult {
        debug!("Executing: {command_line}");
        let mut process = ProcessCommand::new("sh");
        process.arg("-c").arg(command_line);
        if let Some(cwd) = &self.cwd {
            process.current_dir(cwd);
        }

        let start = Instant::now();
        let output = process.output();
        let duration = start.elapsed();

        let result = match output {
            Ok(o) => ExecutionResult {
                exit_code: o.status.code(),
                stdout: String::from_utf8_lossy(&o.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&o.stderr).into_owned(),
                duration,
            },
            Err(e) => ExecutionResult {
                exit_code: None,
                stdout: String::new(),
                stderr: e.to_string(),
                duration,
            },
        };

        if printed {
            let _ = std::io::stdout().write_all(result.stdout.as_bytes());
            let _ = std::io::stderr().write_all(result.stderr.as_bytes());
        }
        result
    }
}
