// Middleware layers for effect handlers
//
// These composable handlers add cross-cutting behaviour such as tracing,
// counting, recording or log suppression without touching program
// descriptions. Each layer wraps an inner handler and implements the
// synchronous and asynchronous protocols whenever the inner handler does.

use async_trait::async_trait;
use std::future::Future;
use std::time::Instant;
use tracing::{debug, trace, warn};

use crate::effects::algebra::{
    Command, ConsoleRead, ConsoleWrite, Effect, Log, ReadLines, WriteLines,
};
use crate::effects::handler::{AsyncHandler, Handler, Result};

/// Tracing middleware that logs every command
pub struct Trace<H> {
    inner: H,
    prefix: String,
}

impl<H> Trace<H> {
    pub fn new(inner: H) -> Self {
        Self::with_prefix(inner, "freeio")
    }

    pub fn with_prefix(inner: H, prefix: impl Into<String>) -> Self {
        Self {
            inner,
            prefix: prefix.into(),
        }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    pub fn into_inner(self) -> H {
        self.inner
    }
}

fn traced<T>(prefix: &str, command: &'static str, run: impl FnOnce() -> Result<T>) -> Result<T> {
    let start = Instant::now();
    trace!(prefix, command, "start");
    let result = run();
    report(prefix, command, start, &result);
    result
}

async fn traced_async<T, F>(prefix: &str, command: &'static str, run: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let start = Instant::now();
    trace!(prefix, command, "start");
    let result = run.await;
    report(prefix, command, start, &result);
    result
}

fn report<T>(prefix: &str, command: &'static str, start: Instant, result: &Result<T>) {
    let duration = start.elapsed();
    match result {
        Ok(_) => debug!(prefix, command, ?duration, "success"),
        Err(e) => warn!(prefix, command, ?duration, error = %e, "failed"),
    }
}

impl<H: Handler> Handler for Trace<H> {
    fn read_lines(&mut self, cmd: ReadLines) -> Result<Vec<String>> {
        let inner = &mut self.inner;
        traced(&self.prefix, ReadLines::NAME, || inner.read_lines(cmd))
    }

    fn write_lines(&mut self, cmd: WriteLines) -> Result<()> {
        let inner = &mut self.inner;
        traced(&self.prefix, WriteLines::NAME, || inner.write_lines(cmd))
    }

    fn log(&mut self, cmd: Log) -> Result<()> {
        let inner = &mut self.inner;
        traced(&self.prefix, Log::NAME, || inner.log(cmd))
    }

    fn console_write(&mut self, cmd: ConsoleWrite) -> Result<()> {
        let inner = &mut self.inner;
        traced(&self.prefix, ConsoleWrite::NAME, || inner.console_write(cmd))
    }

    fn console_read(&mut self, cmd: ConsoleRead) -> Result<String> {
        let inner = &mut self.inner;
        traced(&self.prefix, ConsoleRead::NAME, || inner.console_read(cmd))
    }
}

#[async_trait]
impl<H: AsyncHandler> AsyncHandler for Trace<H> {
    async fn read_lines(&mut self, cmd: ReadLines) -> Result<Vec<String>> {
        traced_async(&self.prefix, ReadLines::NAME, self.inner.read_lines(cmd)).await
    }

    async fn write_lines(&mut self, cmd: WriteLines) -> Result<()> {
        traced_async(&self.prefix, WriteLines::NAME, self.inner.write_lines(cmd)).await
    }

    async fn log(&mut self, cmd: Log) -> Result<()> {
        traced_async(&self.prefix, Log::NAME, self.inner.log(cmd)).await
    }

    async fn console_write(&mut self, cmd: ConsoleWrite) -> Result<()> {
        traced_async(&self.prefix, ConsoleWrite::NAME, self.inner.console_write(cmd)).await
    }

    async fn console_read(&mut self, cmd: ConsoleRead) -> Result<String> {
        traced_async(&self.prefix, ConsoleRead::NAME, self.inner.console_read(cmd)).await
    }
}

/// Per-kind command counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CommandCounts {
    pub read_lines: u64,
    pub write_lines: u64,
    pub log: u64,
    pub console_write: u64,
    pub console_read: u64,
    pub errors: u64,
}

impl CommandCounts {
    /// Commands that completed successfully.
    pub fn total(&self) -> u64 {
        self.read_lines + self.write_lines + self.log + self.console_write + self.console_read
    }
}

/// Metrics collection middleware
pub struct Metrics<H> {
    inner: H,
    counts: CommandCounts,
}

impl<H> Metrics<H> {
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            counts: CommandCounts::default(),
        }
    }

    pub fn counts(&self) -> CommandCounts {
        self.counts
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    pub fn into_inner(self) -> H {
        self.inner
    }

    fn tally<T>(&mut self, result: Result<T>, counter: fn(&mut CommandCounts) -> &mut u64) -> Result<T> {
        match &result {
            Ok(_) => *counter(&mut self.counts) += 1,
            Err(_) => self.counts.errors += 1,
        }
        result
    }
}

impl<H: Handler> Handler for Metrics<H> {
    fn read_lines(&mut self, cmd: ReadLines) -> Result<Vec<String>> {
        let result = self.inner.read_lines(cmd);
        self.tally(result, |c| &mut c.read_lines)
    }

    fn write_lines(&mut self, cmd: WriteLines) -> Result<()> {
        let result = self.inner.write_lines(cmd);
        self.tally(result, |c| &mut c.write_lines)
    }

    fn log(&mut self, cmd: Log) -> Result<()> {
        let result = self.inner.log(cmd);
        self.tally(result, |c| &mut c.log)
    }

    fn console_write(&mut self, cmd: ConsoleWrite) -> Result<()> {
        let result = self.inner.console_write(cmd);
        self.tally(result, |c| &mut c.console_write)
    }

    fn console_read(&mut self, cmd: ConsoleRead) -> Result<String> {
        let result = self.inner.console_read(cmd);
        self.tally(result, |c| &mut c.console_read)
    }
}

#[async_trait]
impl<H: AsyncHandler> AsyncHandler for Metrics<H> {
    async fn read_lines(&mut self, cmd: ReadLines) -> Result<Vec<String>> {
        let result = self.inner.read_lines(cmd).await;
        self.tally(result, |c| &mut c.read_lines)
    }

    async fn write_lines(&mut self, cmd: WriteLines) -> Result<()> {
        let result = self.inner.write_lines(cmd).await;
        self.tally(result, |c| &mut c.write_lines)
    }

    async fn log(&mut self, cmd: Log) -> Result<()> {
        let result = self.inner.log(cmd).await;
        self.tally(result, |c| &mut c.log)
    }

    async fn console_write(&mut self, cmd: ConsoleWrite) -> Result<()> {
        let result = self.inner.console_write(cmd).await;
        self.tally(result, |c| &mut c.console_write)
    }

    async fn console_read(&mut self, cmd: ConsoleRead) -> Result<String> {
        let result = self.inner.console_read(cmd).await;
        self.tally(result, |c| &mut c.console_read)
    }
}

/// Logging suppression
///
/// Discards `log` commands without consulting the inner handler; the program
/// still advances past them. Every other command is delegated.
pub struct Quiet<H> {
    inner: H,
}

impl<H> Quiet<H> {
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

impl<H: Handler> Handler for Quiet<H> {
    fn read_lines(&mut self, cmd: ReadLines) -> Result<Vec<String>> {
        self.inner.read_lines(cmd)
    }

    fn write_lines(&mut self, cmd: WriteLines) -> Result<()> {
        self.inner.write_lines(cmd)
    }

    fn log(&mut self, _cmd: Log) -> Result<()> {
        Ok(())
    }

    fn console_write(&mut self, cmd: ConsoleWrite) -> Result<()> {
        self.inner.console_write(cmd)
    }

    fn console_read(&mut self, cmd: ConsoleRead) -> Result<String> {
        self.inner.console_read(cmd)
    }
}

#[async_trait]
impl<H: AsyncHandler> AsyncHandler for Quiet<H> {
    async fn read_lines(&mut self, cmd: ReadLines) -> Result<Vec<String>> {
        self.inner.read_lines(cmd).await
    }

    async fn write_lines(&mut self, cmd: WriteLines) -> Result<()> {
        self.inner.write_lines(cmd).await
    }

    async fn log(&mut self, _cmd: Log) -> Result<()> {
        Ok(())
    }

    async fn console_write(&mut self, cmd: ConsoleWrite) -> Result<()> {
        self.inner.console_write(cmd).await
    }

    async fn console_read(&mut self, cmd: ConsoleRead) -> Result<String> {
        self.inner.console_read(cmd).await
    }
}

/// Something the recording middleware observed
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// The inner handler performed the command.
    Performed(Command),
    /// The inner handler failed the command.
    Failed { command: Command, error: String },
}

/// Recording middleware - captures every command for verification
pub struct Recording<H> {
    inner: H,
    events: Vec<RecordedEvent>,
}

impl<H> Recording<H> {
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            events: Vec::new(),
        }
    }

    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Commands in the order they were issued, regardless of outcome.
    pub fn commands(&self) -> Vec<Command> {
        self.events
            .iter()
            .map(|event| match event {
                RecordedEvent::Performed(command) => command.clone(),
                RecordedEvent::Failed { command, .. } => command.clone(),
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    pub fn into_inner(self) -> H {
        self.inner
    }

    fn record<T>(&mut self, command: Command, result: Result<T>) -> Result<T> {
        let event = match &result {
            Ok(_) => RecordedEvent::Performed(command),
            Err(e) => RecordedEvent::Failed {
                command,
                error: e.to_string(),
            },
        };
        self.events.push(event);
        result
    }
}

impl<H: Handler> Handler for Recording<H> {
    fn read_lines(&mut self, cmd: ReadLines) -> Result<Vec<String>> {
        let command = cmd.clone().into_command();
        let result = self.inner.read_lines(cmd);
        self.record(command, result)
    }

    fn write_lines(&mut self, cmd: WriteLines) -> Result<()> {
        let command = cmd.clone().into_command();
        let result = self.inner.write_lines(cmd);
        self.record(command, result)
    }

    fn log(&mut self, cmd: Log) -> Result<()> {
        let command = cmd.clone().into_command();
        let result = self.inner.log(cmd);
        self.record(command, result)
    }

    fn console_write(&mut self, cmd: ConsoleWrite) -> Result<()> {
        let command = cmd.clone().into_command();
        let result = self.inner.console_write(cmd);
        self.record(command, result)
    }

    fn console_read(&mut self, cmd: ConsoleRead) -> Result<String> {
        let result = self.inner.console_read(cmd);
        self.record(cmd.into_command(), result)
    }
}

#[async_trait]
impl<H: AsyncHandler> AsyncHandler for Recording<H> {
    async fn read_lines(&mut self, cmd: ReadLines) -> Result<Vec<String>> {
        let command = cmd.clone().into_command();
        let result = self.inner.read_lines(cmd).await;
        self.record(command, result)
    }

    async fn write_lines(&mut self, cmd: WriteLines) -> Result<()> {
        let command = cmd.clone().into_command();
        let result = self.inner.write_lines(cmd).await;
        self.record(command, result)
    }

    async fn log(&mut self, cmd: Log) -> Result<()> {
        let command = cmd.clone().into_command();
        let result = self.inner.log(cmd).await;
        self.record(command, result)
    }

    async fn console_write(&mut self, cmd: ConsoleWrite) -> Result<()> {
        let command = cmd.clone().into_command();
        let result = self.inner.console_write(cmd).await;
        self.record(command, result)
    }

    async fn console_read(&mut self, cmd: ConsoleRead) -> Result<String> {
        let result = self.inner.console_read(cmd).await;
        self.record(cmd.into_command(), result)
    }
}

/// Fault injection middleware for testing
///
/// Fails each command with probability `failure_rate`, drawing from a seeded
/// generator so a given seed always fails the same commands. Rates are
/// clamped to `0.0..=1.0`; a non-finite rate never fails.
#[cfg(feature = "test-utils")]
pub struct FaultInjection<H> {
    inner: H,
    failure_rate: f64,
    rng: rand::rngs::StdRng,
}

#[cfg(feature = "test-utils")]
impl<H> FaultInjection<H> {
    pub fn new(inner: H, failure_rate: f64) -> Self {
        use rand::SeedableRng;
        // NaN and infinities disable injection.
        let failure_rate = if failure_rate.is_finite() {
            failure_rate.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            inner,
            failure_rate,
            rng: rand::rngs::StdRng::seed_from_u64(0),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        use rand::SeedableRng;
        self.rng = rand::rngs::StdRng::seed_from_u64(seed);
        self
    }

    pub fn into_inner(self) -> H {
        self.inner
    }

    fn check(&mut self, command: &'static str) -> Result<()> {
        use rand::Rng;
        if self.rng.gen_bool(self.failure_rate) {
            debug!(command, "injecting fault");
            return Err(crate::effects::handler::EffectError::Injected { command });
        }
        Ok(())
    }
}

#[cfg(feature = "test-utils")]
impl<H: Handler> Handler for FaultInjection<H> {
    fn read_lines(&mut self, cmd: ReadLines) -> Result<Vec<String>> {
        self.check(ReadLines::NAME)?;
        self.inner.read_lines(cmd)
    }

    fn write_lines(&mut self, cmd: WriteLines) -> Result<()> {
        self.check(WriteLines::NAME)?;
        self.inner.write_lines(cmd)
    }

    fn log(&mut self, cmd: Log) -> Result<()> {
        self.check(Log::NAME)?;
        self.inner.log(cmd)
    }

    fn console_write(&mut self, cmd: ConsoleWrite) -> Result<()> {
        self.check(ConsoleWrite::NAME)?;
        self.inner.console_write(cmd)
    }

    fn console_read(&mut self, cmd: ConsoleRead) -> Result<String> {
        self.check(ConsoleRead::NAME)?;
        self.inner.console_read(cmd)
    }
}

#[cfg(feature = "test-utils")]
#[async_trait]
impl<H: AsyncHandler> AsyncHandler for FaultInjection<H> {
    async fn read_lines(&mut self, cmd: ReadLines) -> Result<Vec<String>> {
        self.check(ReadLines::NAME)?;
        self.inner.read_lines(cmd).await
    }

    async fn write_lines(&mut self, cmd: WriteLines) -> Result<()> {
        self.check(WriteLines::NAME)?;
        self.inner.write_lines(cmd).await
    }

    async fn log(&mut self, cmd: Log) -> Result<()> {
        self.check(Log::NAME)?;
        self.inner.log(cmd).await
    }

    async fn console_write(&mut self, cmd: ConsoleWrite) -> Result<()> {
        self.check(ConsoleWrite::NAME)?;
        self.inner.console_write(cmd).await
    }

    async fn console_read(&mut self, cmd: ConsoleRead) -> Result<String> {
        self.check(ConsoleRead::NAME)?;
        self.inner.console_read(cmd).await
    }
}
