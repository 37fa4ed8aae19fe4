use std::path::Path;
use std::process::ExitCode;

use drush_stack::ShellExecutor;
use drush_stack::config_file::Config;

/// Print each composed command line, one per line.
pub fn run(config: &Config, cwd: &Path) -> ExitCode {
    let stack = config.build_stack(cwd, ShellExecutor::in_dir(cwd));
    for line in stack.queue().commands() {
        println!("{line}");
    }
    ExitCode::SUCCESS
}
