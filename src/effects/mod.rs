//! Effect descriptions and their interpreters
//!
//! Programs are built from a closed algebra of commands and composed without
//! running anything. Handlers decide what each command means; interpreters
//! step a program against a handler until it finishes or a command fails.
//! Middleware wraps handlers to add tracing, counting, recording or log
//! suppression.

pub mod algebra;
pub mod handler;
pub mod handlers;
pub mod interpreter;
pub mod middleware;
pub mod program;

pub use algebra::*;
pub use handler::*;
pub use handlers::{AsyncLiveHandler, LiveHandler, MockHandler};
pub use interpreter::{
    interpret, interpret_async, interpret_blocking, interpret_recursive, AsyncHandlerExt,
    HandlerExt,
};
#[cfg(feature = "test-utils")]
pub use middleware::FaultInjection;
pub use middleware::{CommandCounts, Metrics, Quiet, RecordedEvent, Recording, Trace};
pub use program::{Continuation, Instruction, Program, Resume};
