// Effect handler traits
//
// A handler supplies the output of each command kind. The interpreter owns
// the loop; handlers only answer one command at a time, synchronously
// (`Handler`) or through a deferred future (`AsyncHandler`).

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::effects::algebra::{ConsoleRead, ConsoleWrite, Effect, Log, ReadLines, WriteLines};

/// Errors that end an interpreter run
#[derive(Debug, Error)]
pub enum EffectError {
    /// The handler has no way to perform this command kind.
    #[error("Unsupported operation: {command}")]
    Unsupported { command: &'static str },

    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Console error: {0}")]
    Console(String),

    #[error("Injected fault in {command}")]
    Injected { command: &'static str },
}

impl EffectError {
    /// Whether the error signals a handler/algebra mismatch rather than a
    /// failed effect.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, EffectError::Unsupported { .. })
    }
}

/// Result type for handler and interpreter operations
pub type Result<T> = std::result::Result<T, EffectError>;

/// Synchronous handler: one method per command kind.
pub trait Handler {
    /// Supply the lines of `cmd.path`.
    fn read_lines(&mut self, cmd: ReadLines) -> Result<Vec<String>>;

    /// Persist `cmd.lines` to `cmd.path`.
    fn write_lines(&mut self, cmd: WriteLines) -> Result<()>;

    /// Emit a log message.
    fn log(&mut self, cmd: Log) -> Result<()>;

    /// Write a line to the console.
    fn console_write(&mut self, cmd: ConsoleWrite) -> Result<()>;

    /// Read a line from the console.
    fn console_read(&mut self, cmd: ConsoleRead) -> Result<String>;
}

impl<H: Handler + ?Sized> Handler for &mut H {
    fn read_lines(&mut self, cmd: ReadLines) -> Result<Vec<String>> {
        (**self).read_lines(cmd)
    }

    fn write_lines(&mut self, cmd: WriteLines) -> Result<()> {
        (**self).write_lines(cmd)
    }

    fn log(&mut self, cmd: Log) -> Result<()> {
        (**self).log(cmd)
    }

    fn console_write(&mut self, cmd: ConsoleWrite) -> Result<()> {
        (**self).console_write(cmd)
    }

    fn console_read(&mut self, cmd: ConsoleRead) -> Result<String> {
        (**self).console_read(cmd)
    }
}

/// Asynchronous handler: each command's output is deferred.
#[async_trait]
pub trait AsyncHandler: Send {
    /// Supply the lines of `cmd.path`.
    async fn read_lines(&mut self, cmd: ReadLines) -> Result<Vec<String>>;

    /// Persist `cmd.lines` to `cmd.path`.
    async fn write_lines(&mut self, cmd: WriteLines) -> Result<()>;

    /// Emit a log message.
    async fn log(&mut self, cmd: Log) -> Result<()>;

    /// Write a line to the console.
    async fn console_write(&mut self, cmd: ConsoleWrite) -> Result<()>;

    /// Read a line from the console.
    async fn console_read(&mut self, cmd: ConsoleRead) -> Result<String>;
}

/// Adapts a synchronous handler to the asynchronous protocol.
///
/// Every future resolves immediately with the wrapped handler's answer.
pub struct Blocking<H> {
    inner: H,
}

impl<H> Blocking<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    pub fn into_inner(self) -> H {
        self.inner
    }
}

#[async_trait]
impl<H: Handler + Send> AsyncHandler for Blocking<H> {
    async fn read_lines(&mut self, cmd: ReadLines) -> Result<Vec<String>> {
        self.inner.read_lines(cmd)
    }

    async fn write_lines(&mut self, cmd: WriteLines) -> Result<()> {
        self.inner.write_lines(cmd)
    }

    async fn log(&mut self, cmd: Log) -> Result<()> {
        self.inner.log(cmd)
    }

    async fn console_write(&mut self, cmd: ConsoleWrite) -> Result<()> {
        self.inner.console_write(cmd)
    }

    async fn console_read(&mut self, cmd: ConsoleRead) -> Result<String> {
        self.inner.console_read(cmd)
    }
}

/// A no-op handler for testing pure program structure
///
/// Output-less commands succeed without doing anything; commands that must
/// produce a value are declined with [`EffectError::Unsupported`].
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpHandler;

impl NoOpHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Handler for NoOpHandler {
    fn read_lines(&mut self, _cmd: ReadLines) -> Result<Vec<String>> {
        Err(EffectError::Unsupported {
            command: ReadLines::NAME,
        })
    }

    fn write_lines(&mut self, _cmd: WriteLines) -> Result<()> {
        Ok(())
    }

    fn log(&mut self, _cmd: Log) -> Result<()> {
        Ok(())
    }

    fn console_write(&mut self, _cmd: ConsoleWrite) -> Result<()> {
        Ok(())
    }

    fn console_read(&mut self, _cmd: ConsoleRead) -> Result<String> {
        Err(EffectError::Unsupported {
            command: ConsoleRead::NAME,
        })
    }
}
