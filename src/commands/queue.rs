use log::{debug, warn};

use crate::executor::{ExecutionResult, Executor};

/// Ordered command lines waiting to be run.
///
/// Lines are never rewritten once pushed. Running advances a cursor instead of
/// removing lines, so the whole composed history stays inspectable while a
/// later `run` picks up where the previous one stopped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionQueue {
    commands: Vec<String>,
    executed: usize,
}

impl ExecutionQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command_line: impl Into<String>) {
        self.commands.push(command_line.into());
    }

    /// Every composed line, executed or not.
    #[must_use]
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Lines not yet handed to an executor.
    #[must_use]
    pub fn pending(&self) -> &[String] {
        &self.commands[self.executed..]
    }

    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.commands.last().map(String::as_str)
    }

    /// All composed lines chained with `&&`.
    #[must_use]
    pub fn joined(&self) -> String {
        self.commands.join(" && ")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Run pending lines in order.
    ///
    /// With `stop_on_fail` the first failing result is returned immediately and
    /// the lines after it stay pending. Without it every line runs and the
    /// last result is returned. An empty queue yields a successful empty result.
    pub fn run<E: Executor>(
        &mut self,
        executor: &E,
        stop_on_fail: bool,
        printed: bool,
    ) -> ExecutionResult {
        let mut last = ExecutionResult::empty();
        while let Some(command_line) = self.commands.get(self.executed) {
            let result = executor.execute(command_line, printed);
            self.executed += 1;
            if !result.success() {
                warn!(
                    "Command failed (exit code {:?}): {command_line}",
                    result.exit_code
                );
                if stop_on_fail {
                    debug!("Stopping with {} command(s) pending", self.pending().len());
                    return result;
                }
            }
            last = result;
        }
        last
    }
}
