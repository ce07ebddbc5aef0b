// Deterministic mock handler
//
// Answers every command from in-memory state so program logic can be tested
// without touching the file system or the console.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};

use crate::effects::algebra::{ConsoleRead, ConsoleWrite, Log, ReadLines, WriteLines};
use crate::effects::handler::{EffectError, Handler, Result};

/// Mock handler with canned inputs and captured outputs
///
/// - `read_lines` returns lines registered with [`with_lines`](Self::with_lines)
///   or previously written to the same path; any other path yields
///   `["Hello", "World", <path>]`.
/// - `write_lines` is recorded and never reaches the file system.
/// - `log` and `console_write` append to [`output`](Self::output).
/// - `console_read` pops the next canned input line.
#[derive(Clone, Debug, Default)]
pub struct MockHandler {
    files: HashMap<PathBuf, Vec<String>>,
    input: VecDeque<String>,
    output: Vec<String>,
    written: Vec<WriteLines>,
}

impl MockHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `lines` for reads of `path`.
    pub fn with_lines<I, S>(mut self, path: impl AsRef<Path>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files.insert(
            path.as_ref().to_path_buf(),
            lines.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Queue one line of console input.
    pub fn with_input(mut self, line: impl Into<String>) -> Self {
        self.input.push_back(line.into());
        self
    }

    /// Lines that would have been printed, in order.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Files the program asked to write, in order.
    pub fn written(&self) -> &[WriteLines] {
        &self.written
    }

    /// Canned input lines not consumed yet.
    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }

    /// Forget captured output and writes, keeping canned inputs.
    pub fn clear(&mut self) {
        self.output.clear();
        self.written.clear();
    }

    fn default_lines(path: &Path) -> Vec<String> {
        vec![
            "Hello".to_string(),
            "World".to_string(),
            path.display().to_string(),
        ]
    }
}

impl Handler for MockHandler {
    fn read_lines(&mut self, cmd: ReadLines) -> Result<Vec<String>> {
        Ok(self
            .files
            .get(&cmd.path)
            .cloned()
            .unwrap_or_else(|| Self::default_lines(&cmd.path)))
    }

    fn write_lines(&mut self, cmd: WriteLines) -> Result<()> {
        self.files.insert(cmd.path.clone(), cmd.lines.clone());
        self.written.push(cmd);
        Ok(())
    }

    fn log(&mut self, cmd: Log) -> Result<()> {
        self.output.push(cmd.message);
        Ok(())
    }

    fn console_write(&mut self, cmd: ConsoleWrite) -> Result<()> {
        self.output.push(cmd.text);
        Ok(())
    }

    fn console_read(&mut self, _cmd: ConsoleRead) -> Result<String> {
        self.input
            .pop_front()
            .ok_or_else(|| EffectError::Console("no canned input left".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_paths_get_default_lines() {
        let mut mock = MockHandler::new();
        let lines = mock.read_lines(ReadLines { path: "a.txt".into() }).unwrap();
        assert_eq!(lines, vec!["Hello", "World", "a.txt"]);
    }

    #[test]
    fn written_files_are_readable_back() {
        let mut mock = MockHandler::new();
        mock.write_lines(WriteLines {
            path: "out.txt".into(),
            lines: vec!["1: x".into()],
        })
        .unwrap();
        let lines = mock.read_lines(ReadLines { path: "out.txt".into() }).unwrap();
        assert_eq!(lines, vec!["1: x"]);
        assert_eq!(mock.written().len(), 1);
    }

    #[test]
    fn console_input_runs_out() {
        let mut mock = MockHandler::new().with_input("only");
        assert_eq!(mock.console_read(ConsoleRead).unwrap(), "only");
        assert!(matches!(
            mock.console_read(ConsoleRead),
            Err(EffectError::Console(_))
        ));
    }
}
