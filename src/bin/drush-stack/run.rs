use std::path::Path;
use std::process::ExitCode;

use clap::Args;
use log::error;

use drush_stack::ShellExecutor;
use drush_stack::config_file::Config;
use drush_stack::report::ReportingExecutor;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Keep going after a failing command (overrides `stop_on_fail` in the stack file)
    #[arg(long)]
    no_stop_on_fail: bool,
}

/// Run the stack and report each command.
pub fn run(args: &RunArgs, config: &Config, cwd: &Path, quiet: bool) -> ExitCode {
    let executor = ReportingExecutor::new(ShellExecutor::in_dir(cwd));
    let mut stack = config.build_stack(cwd, executor);
    if args.no_stop_on_fail {
        stack.stop_on_fail(false);
    }
    stack.printed(!quiet);

    stack.executor().expect(stack.queue().pending().len());
    let result = stack.run();
    stack.executor().finish();

    if result.success() {
        ExitCode::SUCCESS
    } else {
        error!("Stack failed with exit code {:?}", result.exit_code);
        ExitCode::FAILURE
    }
}
