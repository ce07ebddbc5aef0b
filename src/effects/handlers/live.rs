// Live effect handlers
//
// Perform commands for real: files through std::fs or tokio::fs, console
// I/O through a reader/writer pair, log messages through tracing.

use async_trait::async_trait;
use std::io::{BufRead, Stdout, Write};
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::effects::algebra::{ConsoleRead, ConsoleWrite, Log, ReadLines, WriteLines};
use crate::effects::handler::{AsyncHandler, EffectError, Handler, Result};

fn io_error(path: &Path, source: std::io::Error) -> EffectError {
    EffectError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn console_error(source: std::io::Error) -> EffectError {
    EffectError::Console(source.to_string())
}

/// One line per element, each terminated by a newline.
fn render_lines(lines: &[String]) -> String {
    let mut content = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    content
}

fn strip_newline(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

/// Synchronous live handler
pub struct LiveHandler<R = std::io::StdinLock<'static>, W = Stdout> {
    input: R,
    output: W,
}

impl LiveHandler {
    /// Handler bound to the process's standard input and output.
    pub fn stdio() -> Self {
        Self::with_console(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> LiveHandler<R, W> {
    /// Handler using `input` and `output` as its console.
    pub fn with_console(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_console(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> Handler for LiveHandler<R, W> {
    fn read_lines(&mut self, cmd: ReadLines) -> Result<Vec<String>> {
        let content =
            std::fs::read_to_string(&cmd.path).map_err(|e| io_error(&cmd.path, e))?;
        Ok(content.lines().map(str::to_string).collect())
    }

    fn write_lines(&mut self, cmd: WriteLines) -> Result<()> {
        std::fs::write(&cmd.path, render_lines(&cmd.lines)).map_err(|e| io_error(&cmd.path, e))
    }

    fn log(&mut self, cmd: Log) -> Result<()> {
        tracing::info!(target: "freeio", "{}", cmd.message);
        Ok(())
    }

    fn console_write(&mut self, cmd: ConsoleWrite) -> Result<()> {
        writeln!(self.output, "{}", cmd.text).map_err(console_error)?;
        self.output.flush().map_err(console_error)
    }

    fn console_read(&mut self, _cmd: ConsoleRead) -> Result<String> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(console_error)?;
        if read == 0 {
            return Err(EffectError::Console("end of input".into()));
        }
        Ok(strip_newline(line))
    }
}

/// Asynchronous live handler
pub struct AsyncLiveHandler<R = tokio::io::BufReader<tokio::io::Stdin>, W = tokio::io::Stdout> {
    input: R,
    output: W,
}

impl AsyncLiveHandler {
    /// Handler bound to the process's standard input and output.
    pub fn stdio() -> Self {
        Self::with_console(
            tokio::io::BufReader::new(tokio::io::stdin()),
            tokio::io::stdout(),
        )
    }
}

impl<R, W> AsyncLiveHandler<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    /// Handler using `input` and `output` as its console.
    pub fn with_console(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_console(self) -> (R, W) {
        (self.input, self.output)
    }
}

#[async_trait]
impl<R, W> AsyncHandler for AsyncLiveHandler<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn read_lines(&mut self, cmd: ReadLines) -> Result<Vec<String>> {
        let content = tokio::fs::read_to_string(&cmd.path)
            .await
            .map_err(|e| io_error(&cmd.path, e))?;
        Ok(content.lines().map(str::to_string).collect())
    }

    async fn write_lines(&mut self, cmd: WriteLines) -> Result<()> {
        tokio::fs::write(&cmd.path, render_lines(&cmd.lines))
            .await
            .map_err(|e| io_error(&cmd.path, e))
    }

    async fn log(&mut self, cmd: Log) -> Result<()> {
        tracing::info!(target: "freeio", "{}", cmd.message);
        Ok(())
    }

    async fn console_write(&mut self, cmd: ConsoleWrite) -> Result<()> {
        let mut line = cmd.text.into_bytes();
        line.push(b'\n');
        self.output.write_all(&line).await.map_err(console_error)?;
        self.output.flush().await.map_err(console_error)
    }

    async fn console_read(&mut self, _cmd: ConsoleRead) -> Result<String> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .await
            .map_err(console_error)?;
        if read == 0 {
            return Err(EffectError::Console("end of input".into()));
        }
        Ok(strip_newline(line))
    }
}
