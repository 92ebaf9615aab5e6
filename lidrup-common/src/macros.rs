//! Output and assertion macros used throughout the crate.
//!
//! All stdout traffic funnels through [`puts!`], which delegates to
//! [`output::write_stdout`](crate::output::write_stdout) so a reader that
//! closed the pipe ends the run instead of panicking it.

/// Format to stdout.
#[macro_export]
macro_rules! puts {
    ($($arg:tt)*) => {
        $crate::output::write_stdout(format_args!($($arg)*))
    };
}

/// A full comment line: `c `, the formatted message, and a newline.
///
/// The format string must be a literal so the prefix and newline can be
/// glued onto it at compile time.
#[macro_export]
macro_rules! comment {
    ($fmt:expr) => {
        $crate::puts!(concat!("c ", $fmt, "\n"))
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::puts!(concat!("c ", $fmt, "\n"), $($arg)*)
    };
}

/// Report an environment failure (unreadable file, broken archive) on
/// stderr and terminate with exit code 1.
#[macro_export]
macro_rules! die {
    ($($arg:tt)*) => {
        $crate::output::die(format_args!($($arg)*))
    };
}

/// Assert an internal invariant.
///
/// Unlike `assert!` this can be compiled out through
/// [`config::CHECK_INVARIANTS`](crate::config::CHECK_INVARIANTS).
#[macro_export]
macro_rules! invariant {
    ($($arg:tt)*) => {
        if $crate::config::CHECK_INVARIANTS {
            assert!($($arg)*);
        }
    };
}

/// Assert a precondition of the surrounding function, gated by
/// [`config::CHECK_PRECONDITIONS`](crate::config::CHECK_PRECONDITIONS).
#[macro_export]
macro_rules! requires {
    ($($arg:tt)*) => {
        if $crate::config::CHECK_PRECONDITIONS {
            assert!($($arg)*);
        }
    };
}
