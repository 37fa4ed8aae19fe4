mod plan;
mod run;
mod version;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use drush_stack::load_config;

#[derive(Parser, Debug)]
#[command(name = "drush-stack", about = "Run a stack of Drush commands")]
struct Cli {
    /// Path to stack file (auto-detected if not specified)
    #[arg(short, long)]
    config: Option<String>,

    /// Log file path (written in addition to stderr)
    #[arg(long)]
    log_file: Option<String>,

    /// Only log warnings and errors, and do not echo command output
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Execute every step of the stack
    Run(run::RunArgs),
    /// Print the composed command lines without running them
    Plan,
    /// Print the detected Drush version
    Version,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_file = cli.log_file.as_deref().map(std::fs::File::create).transpose()?;
    drush_stack::logger::init(cli.quiet, log_file);

    let (config, cwd, _) = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Run(ref args) => Ok(run::run(args, &config, &cwd, cli.quiet)),
        Commands::Plan => Ok(plan::run(&config, &cwd)),
        Commands::Version => Ok(version::run(&config, &cwd)),
    }
}
