//! # freeio
//!
//! Effectful programs as data. A [`Program`] describes which commands to
//! issue and how each output feeds the rest of the computation; an
//! interpreter decides how the commands are carried out.
//!
//! ```
//! use freeio::{io, log, read_lines, write_lines, HandlerExt, MockHandler, Program};
//!
//! let program: Program<usize> = io! {
//!     lines <= read_lines("a.txt");
//!     let numbered: Vec<String> = lines
//!         .iter()
//!         .enumerate()
//!         .map(|(i, line)| format!("{}: {line}", i + 1))
//!         .collect();
//!     let count = numbered.len();
//!     _ <= write_lines("a.txt.prefixed", numbered);
//!     log("done");
//!     Program::lift(count)
//! };
//!
//! let mut mock = MockHandler::new();
//! assert_eq!(mock.run(program).unwrap(), 3);
//! assert_eq!(mock.written()[0].lines[0], "1: Hello");
//! ```
//!
//! The same program runs unchanged against [`LiveHandler`] (files and
//! console for real), [`AsyncLiveHandler`] (tokio) or any middleware stack
//! built from [`Trace`], [`Metrics`], [`Recording`] and [`Quiet`].

pub mod effects;
pub mod outcome;

pub use effects::{
    interpret, interpret_async, interpret_blocking, interpret_recursive, log, read_line,
    read_lines, write_line, write_lines, AsyncHandler, AsyncHandlerExt, AsyncLiveHandler,
    Blocking, Command, CommandCounts, ConsoleRead, ConsoleWrite, Continuation, Effect,
    EffectError, Handler, HandlerExt, Instruction, LiveHandler, Log, Metrics, MockHandler,
    NoOpHandler, Program, Quiet, ReadLines, RecordedEvent, Recording, Result, Resume, Trace,
    WriteLines,
};
#[cfg(feature = "test-utils")]
pub use effects::FaultInjection;
pub use outcome::{failure, success, CannotFail, Outcome, OutcomeExt};
