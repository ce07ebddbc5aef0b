// End-to-end scenario under the mock interpreter

mod common;

use std::path::Path;

use common::number_lines;
use freeio::{interpret, interpret_recursive, HandlerExt, MockHandler, NoOpHandler, Quiet};

#[test]
fn number_lines_under_mock() {
    let mut mock = MockHandler::new();
    interpret(number_lines("a.txt"), &mut mock).unwrap();

    assert_eq!(
        mock.output(),
        [
            "There are 3 lines",
            "Prepending line numbers",
            "Lines prepended and file saved successfully to 'a.txt.prefixed'",
        ]
    );
    assert_eq!(
        mock.output().last().map(String::as_str),
        Some("Lines prepended and file saved successfully to 'a.txt.prefixed'")
    );

    let written = mock.written();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].path, Path::new("a.txt.prefixed"));
    assert_eq!(written[0].lines, ["1: Hello", "2: World", "3: a.txt"]);
    assert!(!Path::new("a.txt.prefixed").exists());
}

#[test]
fn number_lines_uses_registered_contents() {
    let mut mock = MockHandler::new().with_lines("notes.txt", ["alpha", "beta"]);
    mock.run(number_lines("notes.txt")).unwrap();
    assert_eq!(mock.output()[0], "There are 2 lines");
    assert_eq!(mock.written()[0].lines, ["1: alpha", "2: beta"]);
}

#[test]
fn mock_runs_are_deterministic() {
    let mut first = MockHandler::new();
    let mut second = MockHandler::new();
    let a = interpret(number_lines("a.txt"), &mut first).unwrap();
    let b = interpret(number_lines("a.txt"), &mut second).unwrap();
    assert_eq!(a, b);
    assert_eq!(first.output(), second.output());
    assert_eq!(first.written(), second.written());
}

#[test]
fn recursive_driver_agrees_on_short_programs() {
    let mut iterative = MockHandler::new();
    let mut recursive = MockHandler::new();
    interpret(number_lines("a.txt"), &mut iterative).unwrap();
    interpret_recursive(number_lines("a.txt"), &mut recursive).unwrap();
    assert_eq!(iterative.output(), recursive.output());
    assert_eq!(iterative.written(), recursive.written());
}

#[test]
fn quiet_keeps_the_result_and_drops_every_log() {
    let mut loud = MockHandler::new();
    let loud_result = interpret(number_lines("a.txt"), &mut loud);

    let mut quiet = Quiet::new(MockHandler::new());
    let quiet_result = interpret(number_lines("a.txt"), &mut quiet);

    assert_eq!(loud_result.unwrap(), quiet_result.unwrap());
    let mock = quiet.into_inner();
    assert!(mock.output().is_empty());
    assert_eq!(mock.written(), loud.written());
}

#[test]
fn unsupported_reads_abort_before_any_write() {
    let err = interpret(number_lines("a.txt"), &mut NoOpHandler::new()).unwrap_err();
    assert!(err.is_unsupported());
}
