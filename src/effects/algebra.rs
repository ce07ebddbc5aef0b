//! Effect algebra
//!
//! The closed set of commands a [`Program`](crate::Program) can describe. A
//! command carries only the data needed to invoke it; what it returns is
//! fixed per command kind by [`Effect::Output`].

use std::path::{Path, PathBuf};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::effects::program::Program;

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::ReadLines {}
    impl Sealed for super::WriteLines {}
    impl Sealed for super::Log {}
    impl Sealed for super::ConsoleWrite {}
    impl Sealed for super::ConsoleRead {}
}

/// A command type together with the output an interpreter must supply for it.
///
/// Implemented only by the commands of this module; the output type of every
/// command must match the continuation interpreters hand it to.
///
/// ```compile_fail
/// use freeio::{Command, Effect, Log};
///
/// struct Counterfeit;
///
/// impl Effect for Counterfeit {
///     type Output = u32;
///     const NAME: &'static str = "counterfeit";
///
///     fn into_command(self) -> Command {
///         Command::Log(Log { message: String::new() })
///     }
/// }
/// ```
pub trait Effect: sealed::Sealed + Sized + Send + 'static {
    /// Value handed to the continuation once the command has been performed.
    type Output: Send + 'static;

    /// Name used in traces and error messages.
    const NAME: &'static str;

    /// Wrap the command into the closed [`Command`] enum.
    fn into_command(self) -> Command;

    /// Lift the command into a one-step program yielding its output.
    fn into_program(self) -> Program<Self::Output> {
        Program::from_command(self)
    }
}

/// Read every line of a text file.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ReadLines {
    pub path: PathBuf,
}

/// Replace a text file with the given lines.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct WriteLines {
    pub path: PathBuf,
    pub lines: Vec<String>,
}

/// Emit an informational log message.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Log {
    pub message: String,
}

/// Write one line of text to the console.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ConsoleWrite {
    pub text: String,
}

/// Read one line of text from the console.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ConsoleRead;

impl Effect for ReadLines {
    type Output = Vec<String>;
    const NAME: &'static str = "read_lines";

    fn into_command(self) -> Command {
        Command::ReadLines(self)
    }
}

impl Effect for WriteLines {
    type Output = ();
    const NAME: &'static str = "write_lines";

    fn into_command(self) -> Command {
        Command::WriteLines(self)
    }
}

impl Effect for Log {
    type Output = ();
    const NAME: &'static str = "log";

    fn into_command(self) -> Command {
        Command::Log(self)
    }
}

impl Effect for ConsoleWrite {
    type Output = ();
    const NAME: &'static str = "console_write";

    fn into_command(self) -> Command {
        Command::ConsoleWrite(self)
    }
}

impl Effect for ConsoleRead {
    type Output = String;
    const NAME: &'static str = "console_read";

    fn into_command(self) -> Command {
        Command::ConsoleRead(self)
    }
}

/// Any command of the algebra.
///
/// Interpreters dispatch with an exhaustive `match`, so adding a variant is a
/// compile error everywhere it is not handled.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Command {
    ReadLines(ReadLines),
    WriteLines(WriteLines),
    Log(Log),
    ConsoleWrite(ConsoleWrite),
    ConsoleRead(ConsoleRead),
}

impl Command {
    /// Short name of the command kind.
    pub fn name(&self) -> &'static str {
        match self {
            Command::ReadLines(_) => ReadLines::NAME,
            Command::WriteLines(_) => WriteLines::NAME,
            Command::Log(_) => Log::NAME,
            Command::ConsoleWrite(_) => ConsoleWrite::NAME,
            Command::ConsoleRead(_) => ConsoleRead::NAME,
        }
    }
}

/// Describe reading all lines of `path`.
pub fn read_lines(path: impl AsRef<Path>) -> Program<Vec<String>> {
    ReadLines {
        path: path.as_ref().to_path_buf(),
    }
    .into_program()
}

/// Describe writing `lines` to `path`.
pub fn write_lines<I, S>(path: impl AsRef<Path>, lines: I) -> Program<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    WriteLines {
        path: path.as_ref().to_path_buf(),
        lines: lines.into_iter().map(Into::into).collect(),
    }
    .into_program()
}

/// Describe logging `message`.
pub fn log(message: impl Into<String>) -> Program<()> {
    Log {
        message: message.into(),
    }
    .into_program()
}

/// Describe writing a line to the console.
pub fn write_line(text: impl Into<String>) -> Program<()> {
    ConsoleWrite { text: text.into() }.into_program()
}

/// Describe reading a line from the console.
pub fn read_line() -> Program<String> {
    ConsoleRead.into_program()
}
