//! Capability traits
//!
//! An environment advertises what it can do by implementing these traits.
//! Programs name the capabilities they need as trait bounds, so a program
//! asking for a console cannot be run against an environment without one:
//!
//! ```compile_fail
//! use envio::log;
//!
//! struct Bare;
//!
//! // `Bare` does not implement `Logger`.
//! let _ = log::info::<Bare>("hello");
//! ```
//!
//! Capability methods return programs. An implementation may act
//! immediately and return the outcome, or return a program that acts when it
//! is run; either way the accessor functions in [`console`] and [`log`] run
//! the returned program against the same environment.

use crate::error::ConsoleError;
use crate::io::Io;

/// Line-oriented console
pub trait Console: Sized + 'static {
    /// Print `line`.
    fn write_line(&mut self, line: String) -> Io<Self, ()>;

    /// Read one line of input.
    fn read_line(&mut self) -> Io<Self, String, ConsoleError>;
}

/// Informational logging
pub trait Logger: Sized + 'static {
    /// Record `message`.
    fn info(&mut self, message: String) -> Io<Self, ()>;
}

/// Console accessors for any environment with a [`Console`].
pub mod console {
    use super::*;

    /// Print a line through the environment's console.
    pub fn write_line<Env: Console>(line: impl Into<String>) -> Io<Env, ()> {
        let line = line.into();
        Io::use_env(move |env: &mut Env| env.write_line(line))
    }

    /// Read a line through the environment's console.
    pub fn read_line<Env: Console>() -> Io<Env, String, ConsoleError> {
        Io::use_env(|env: &mut Env| env.read_line())
    }
}

/// Logging accessors for any environment with a [`Logger`].
pub mod log {
    use super::*;

    /// Log `message` through the environment's logger.
    pub fn info<Env: Logger>(message: impl Into<String>) -> Io<Env, ()> {
        let message = message.into();
        Io::use_env(move |env: &mut Env| env.info(message))
    }
}
