//! Per-command progress lines for headless runs

use std::cell::Cell;
use std::io::{IsTerminal, Write};
use std::time::{Duration, Instant};

use anstyle::{AnsiColor, Effects, Reset, Style};

use crate::executor::{ExecutionResult, Executor};

const BOLD: Style = Style::new().effects(Effects::BOLD);
const DIM: Style = Style::new().effects(Effects::DIMMED);
const GREEN: Style = Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::Green)));
const RED: Style = Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::Red)));
const YELLOW: Style = Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::Yellow)));

/// Only emits escape codes when stderr is a terminal.
#[derive(Debug, Clone, Copy)]
struct Painter {
    color: bool,
}

impl Painter {
    fn paint(self, style: Style, s: &str) -> String {
        if self.color {
            format!("{style}{s}{Reset}")
        } else {
            s.to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub expected: usize,
    pub passed: usize,
    pub failed: usize,
}

impl Tally {
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.expected.saturating_sub(self.passed + self.failed)
    }
}

/// Wraps an executor and prints `[i/n] <command> PASS|FAIL <duration>` for each
/// command once [`ReportingExecutor::expect`] has armed it.
///
/// Invocations made before arming, such as the version query issued while the
/// stack is being built, pass through silently.
#[derive(Debug)]
pub struct ReportingExecutor<E> {
    inner: E,
    tally: Cell<Tally>,
    painter: Painter,
    start: Cell<Option<Instant>>,
}

impl<E: Executor> ReportingExecutor<E> {
    #[must_use]
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            tally: Cell::new(Tally::default()),
            painter: Painter {
                color: std::io::stderr().is_terminal(),
            },
            start: Cell::new(None),
        }
    }

    /// Start reporting; `count` is the number of commands about to run.
    pub fn expect(&self, count: usize) {
        self.tally.set(Tally {
            expected: count,
            ..Tally::default()
        });
        self.start.set(Some(Instant::now()));
    }

    #[must_use]
    pub fn tally(&self) -> Tally {
        self.tally.get()
    }

    /// Print the summary line for the armed run.
    pub fn finish(&self) {
        let Some(start) = self.start.get() else {
            return;
        };
        eprintln!();
        eprintln!("{}", self.summary(start.elapsed()));
    }

    fn summary(&self, elapsed: Duration) -> String {
        let p = self.painter;
        let tally = self.tally.get();
        let mut parts = Vec::new();
        if tally.passed > 0 {
            parts.push(p.paint(GREEN, &format!("{} passed", tally.passed)));
        }
        if tally.failed > 0 {
            parts.push(p.paint(RED, &format!("{} failed", tally.failed)));
        }
        if tally.skipped() > 0 {
            parts.push(p.paint(YELLOW, &format!("{} skipped", tally.skipped())));
        }
        format!(
            "{} {} {}",
            p.paint(BOLD, &format!("{} commands:", tally.expected)),
            parts.join(&p.paint(DIM, ", ")),
            p.paint(DIM, &format!("({})", format_duration(elapsed)))
        )
    }
}

impl<E: Executor> Executor for ReportingExecutor<E> {
    fn execute(&self, command_line: &str, printed: bool) -> ExecutionResult {
        if self.start.get().is_none() {
            return self.inner.execute(command_line, printed);
        }

        let p = self.painter;
        let mut tally = self.tally.get();
        let idx = tally.passed + tally.failed + 1;
        let width = tally.expected.to_string().len();
        let prefix = format!("[{idx:>width$}/{}]", tally.expected);
        eprint!("{} {} ", p.paint(BOLD, &prefix), command_line);
        let _ = std::io::stderr().flush();
        if printed {
            eprintln!();
        }

        let result = self.inner.execute(command_line, printed);
        let duration = p.paint(DIM, &format_duration(result.duration));
        if result.success() {
            tally.passed += 1;
            eprintln!("{} {duration}", p.paint(GREEN, "PASS"));
        } else {
            tally.failed += 1;
            eprintln!("{} {duration}", p.paint(RED, "FAIL"));
            if !printed {
                let _ = std::io::stderr().write_all(result.stdout.as_bytes());
                let _ = std::io::stderr().write_all(result.stderr.as_bytes());
            }
        }
        self.tally.set(tally);
        result
    }
}

#[must_use]
pub fn format_duration(d: Duration) -> String {
    let total_secs = d.as_secs();
    let tenths = d.subsec_millis() / 100;
    if total_secs < 60 {
        format!("{total_secs}.{tenths}s")
    } else {
        let mins = total_secs / 60;
        let secs = total_secs % 60;
        format!("{mins}m {secs}.{tenths}s")
    }
}
