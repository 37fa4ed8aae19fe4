use std::path::Path;
use std::process::ExitCode;

use drush_stack::config_file::Config;
use drush_stack::{DrushStack, ShellExecutor};

pub fn run(config: &Config, cwd: &Path) -> ExitCode {
    let mut stack = DrushStack::with_executor(config.executable(cwd), ShellExecutor::in_dir(cwd));
    let version = stack.version();
    println!("{version}");
    if version.is_unknown() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
