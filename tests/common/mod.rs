// Shared program fixtures for integration tests

#![allow(dead_code)]

use freeio::{io, log, read_lines, write_lines, Program};

/// Read `path`, prefix every line with its number, write the result next to
/// it and report progress through log messages.
pub fn number_lines(path: &str) -> Program<()> {
    let path = path.to_string();
    io! {
        lines <= read_lines(&path);
        _ <= log(format!("There are {} lines", lines.len()));
        _ <= log("Prepending line numbers");
        let numbered: Vec<String> = lines
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{}: {line}", i + 1))
            .collect();
        let target = format!("{path}.prefixed");
        _ <= write_lines(&target, numbered);
        log(format!("Lines prepended and file saved successfully to '{target}'"))
    }
}

/// `n` log steps in a left-nested bind chain, yielding how many ran.
pub fn many_logs(n: usize) -> Program<usize> {
    let mut program = Program::lift(0usize);
    for i in 0..n {
        program = program.bind(move |count| log(format!("step {i}")).map(move |_| count + 1));
    }
    program
}
