//! # envio
//!
//! Effect programs as functions of an environment. A program states the
//! capabilities it needs as trait bounds ([`Console`], [`Logger`]) and the
//! error it may fail with; any environment providing those capabilities can
//! run it.
//!
//! ```
//! use envio::{console, log, ConsoleError, Console, Io, Logger, TestEnv};
//!
//! fn quiz<Env: Console + Logger>() -> Io<Env, (), ConsoleError> {
//!     log::info("Starting the quiz...")
//!         .then(console::write_line("Enter your name:"))
//!         .bind_fallible(|_| console::read_line())
//!         .bind_infallible(|name| log::info(format!("Name is @{name}")))
//! }
//!
//! let mut env = TestEnv::new().with_response("Ada");
//! quiz().run(&mut env).unwrap();
//! assert_eq!(env.logs(), ["Starting the quiz...", "Name is @Ada"]);
//! assert_eq!(env.written(), ["Enter your name:"]);
//! ```

pub mod capability;
pub mod error;
pub mod io;
pub mod live;
pub mod testing;

pub use capability::{console, log, Console, Logger};
pub use error::ConsoleError;
pub use freeio::{CannotFail, Outcome, OutcomeExt};
pub use io::Io;
pub use live::LiveEnv;
pub use testing::TestEnv;
