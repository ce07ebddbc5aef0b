// Live environment: real console, logging through tracing

use std::io::{BufRead, Stdout, Write};

use tracing::warn;

use crate::capability::{Console, Logger};
use crate::error::ConsoleError;
use crate::io::Io;

/// Environment backed by a real reader/writer pair
pub struct LiveEnv<R = std::io::StdinLock<'static>, W = Stdout> {
    input: R,
    output: W,
}

impl LiveEnv {
    /// Environment bound to the process's standard input and output.
    pub fn stdio() -> Self {
        Self::with_console(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> LiveEnv<R, W> {
    pub fn with_console(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_console(self) -> (R, W) {
        (self.input, self.output)
    }

    fn read_input(&mut self) -> Result<String, ConsoleError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::Closed);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}

impl<R, W> Console for LiveEnv<R, W>
where
    R: BufRead + 'static,
    W: Write + 'static,
{
    // Printing cannot fail as far as the program is concerned; a broken
    // output stream is reported through tracing instead.
    fn write_line(&mut self, line: String) -> Io<Self, ()> {
        let written = writeln!(self.output, "{line}").and_then(|_| self.output.flush());
        if let Err(error) = written {
            warn!(%error, "console write failed");
        }
        Io::unit()
    }

    fn read_line(&mut self) -> Io<Self, String, ConsoleError> {
        Io::from_outcome(self.read_input())
    }
}

impl<R, W> Logger for LiveEnv<R, W>
where
    R: 'static,
    W: 'static,
{
    fn info(&mut self, message: String) -> Io<Self, ()> {
        tracing::info!(target: "envio", "{}", message);
        Io::unit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::console;
    use std::io::Cursor;

    fn env(input: &str) -> LiveEnv<Cursor<Vec<u8>>, Vec<u8>> {
        LiveEnv::with_console(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn echoes_a_line() {
        let mut env = env("ada\r\n");
        let program = console::read_line()
            .bind_infallible(|name| console::write_line(format!("hi {name}")));
        program.run(&mut env).unwrap();
        let (_, output) = env.into_console();
        assert_eq!(String::from_utf8(output).unwrap(), "hi ada\n");
    }

    #[test]
    fn end_of_input_is_closed() {
        let mut env = env("");
        let result = console::read_line().run(&mut env);
        assert!(matches!(result, Err(ConsoleError::Closed)));
    }
}
