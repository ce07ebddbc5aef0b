// Test environment with canned console input and captured output

use std::collections::VecDeque;

use crate::capability::{Console, Logger};
use crate::error::ConsoleError;
use crate::io::Io;

/// In-memory environment for tests
///
/// Console reads pop canned responses in order; once they run out the
/// console reports [`ConsoleError::Closed`]. A scripted failure, when set,
/// makes every read fail instead. Writes and log messages are captured.
#[derive(Clone, Debug, Default)]
pub struct TestEnv {
    responses: VecDeque<String>,
    failure: Option<String>,
    written: Vec<String>,
    logs: Vec<String>,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next console read.
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.responses.push_back(response.into());
        self
    }

    /// Make every console read fail with `message`.
    pub fn failing_with(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Lines written to the console, in order.
    pub fn written(&self) -> &[String] {
        &self.written
    }

    /// Messages logged, in order.
    pub fn logs(&self) -> &[String] {
        &self.logs
    }
}

impl Console for TestEnv {
    fn write_line(&mut self, line: String) -> Io<Self, ()> {
        self.written.push(line);
        Io::unit()
    }

    fn read_line(&mut self) -> Io<Self, String, ConsoleError> {
        if let Some(message) = &self.failure {
            return Io::fail(ConsoleError::Scripted(message.clone()));
        }
        match self.responses.pop_front() {
            Some(response) => Io::succeed(response),
            None => Io::fail(ConsoleError::Closed),
        }
    }
}

impl Logger for TestEnv {
    fn info(&mut self, message: String) -> Io<Self, ()> {
        self.logs.push(message);
        Io::unit()
    }
}
