//! Error types and low-level output routines.

use atty::Stream;
use std::{
    fmt,
    fmt::Display,
    io::{self, Write},
    time::Instant,
};

/// All fatal conditions the checker can diagnose.
///
/// Every class terminates the run; the binary prints the error and exits
/// with code 1. `Line` errors echo the offending line for operator
/// diagnostics.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// Malformed bytes, reported with line and column.
    Parse {
        file: String,
        line: usize,
        column: usize,
        message: String,
    },
    /// A semantic failure not tied to the bytes of one line.
    Check {
        file: String,
        line: usize,
        message: String,
    },
    /// A failure attributable to the current line, echoed in `context`.
    Line {
        file: String,
        line: usize,
        message: String,
        context: String,
    },
    /// An internal impossibility; should never fire.
    Fatal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Parse {
                file,
                line,
                column,
                message,
            } => write!(
                f,
                "parse error: at line {} column {} in '{}': {}",
                line, column, file, message
            ),
            Error::Check {
                file,
                line,
                message,
            } => write!(f, "error: at line {} in '{}': {}", line, file, message),
            Error::Line {
                file,
                line,
                message,
                context,
            } => write!(
                f,
                "error: at line {} in '{}': {}\n{}",
                line, file, message, context
            ),
            Error::Fatal(message) => write!(f, "fatal internal error: {}", message),
        }
    }
}

/// Back end of the `puts!` macro.
///
/// A broken pipe means whoever read our output went away, so the run
/// ends with the conventional 141 rather than a panic.
pub fn write_stdout(args: fmt::Arguments) {
    match io::stdout().write_fmt(args) {
        Ok(()) => (),
        Err(ref err) if err.kind() == io::ErrorKind::BrokenPipe => std::process::exit(141),
        Err(ref err) => panic!("{}", err),
    }
}

/// Back end of the `die!` macro: an environment failure, reported on
/// stderr (in red when stderr is a terminal) with exit code 1.
pub fn die(args: fmt::Arguments) -> ! {
    let color = atty::is(Stream::Stderr);
    if color {
        eprint!("\x1b[1;31m");
    }
    eprint!("lidrup-check: error: {}", args);
    if color {
        eprint!("\x1b[0m");
    }
    eprintln!();
    std::process::exit(1);
}

/// Reset SIGPIPE to its default disposition so writing into a closed
/// pipe terminates the process before `write_stdout` ever sees an error.
pub fn install_signal_handler() {
    let previous = unsafe { libc::signal(libc::SIGPIPE, libc::SIG_DFL) };
    assert!(previous != libc::SIG_ERR);
}

/// Marks states the checker can never reach.
///
/// Undefined behavior if the invariant checks are compiled out, so keep
/// [`config::CHECK_INVARIANTS`](crate::config::CHECK_INVARIANTS) on
/// unless chasing the last few percent.
pub fn unreachable() -> ! {
    invariant!(false, "entered unreachable checker state");
    unsafe { std::hint::unreachable_unchecked() }
}

/// The final solution line, `s VERIFIED` or `s NOT VERIFIED`.
pub fn print_solution(verdict: &str) {
    puts!("s {}\n", verdict);
}

/// One aligned `c <key>: <value>` line of the statistics block.
pub fn print_key_value(key: &str, value: impl Display) {
    comment!("{:<24} {:>14}", format!("{}:", key), value);
}

/// Reports how long a phase took once it goes out of scope.
pub struct Timer {
    name: &'static str,
    start: Instant,
    /// Timing lines are suppressed under `--quiet`.
    pub disabled: bool,
}

impl Timer {
    pub fn new(name: &'static str) -> Timer {
        Timer {
            name,
            start: Instant::now(),
            disabled: false,
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if self.disabled {
            return;
        }
        let seconds = self.start.elapsed().as_secs_f64();
        print_key_value(&format!("{} (s)", self.name), format!("{:.3}", seconds));
    }
}
