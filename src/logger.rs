use std::io::Write;
use std::time::Instant;

use log::{Log, Metadata, Record};
use parking_lot::Mutex;

struct StackLogger {
    stderr: bool,
    file: Option<Mutex<std::fs::File>>,
    filter: log::LevelFilter,
    start: Instant,
}

impl StackLogger {
    fn format(&self, record: &Record) -> String {
        let elapsed = self.start.elapsed().as_secs_f64();
        format!(
            "[{elapsed:.3}s] [{}] {} - {}",
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl Log for StackLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.filter
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = self.format(record);
        if self.stderr {
            let _ = writeln!(std::io::stderr().lock(), "{line}");
        }
        if let Some(ref file) = self.file {
            let _ = writeln!(file.lock(), "{line}");
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
        if let Some(ref file) = self.file {
            let _ = file.lock().flush();
        }
    }
}

/// Parse `RUST_LOG`-style level names, falling back to `default`.
fn level_from_env(default: log::LevelFilter) -> log::LevelFilter {
    std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl StackLogger {
    /// With `quiet` and a log file, records go to the file only. With `quiet`
    /// and no file, stderr keeps warnings and errors.
    fn new(quiet: bool, log_file: Option<std::fs::File>) -> Self {
        let default = if quiet {
            log::LevelFilter::Warn
        } else {
            log::LevelFilter::Info
        };
        StackLogger {
            stderr: !quiet || log_file.is_none(),
            file: log_file.map(Mutex::new),
            filter: level_from_env(default),
            start: Instant::now(),
        }
    }
}

/// Initialize the global logger. Must be called once before any logging.
///
/// # Panics
///
/// Panics if called more than once.
pub fn init(quiet: bool, log_file: Option<std::fs::File>) {
    let logger = StackLogger::new(quiet, log_file);
    let filter = logger.filter;
    log::set_boxed_logger(Box::new(logger)).expect("logger already initialized");
    log::set_max_level(filter);
}
