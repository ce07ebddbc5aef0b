// Live handlers against temporary directories

mod common;

use std::fs;

use common::number_lines;
use freeio::{
    interpret, interpret_async, read_line, write_line, AsyncHandlerExt, AsyncLiveHandler,
    EffectError, LiveHandler, Program,
};

#[test]
fn sync_live_numbers_a_real_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("a.txt");
    fs::write(&path, "first\nsecond\n")?;

    let mut handler = LiveHandler::with_console(&b""[..], Vec::new());
    interpret(number_lines(path.to_str().unwrap_or_default()), &mut handler)?;

    let written = fs::read_to_string(dir.path().join("a.txt.prefixed"))?;
    assert_eq!(written, "1: first\n2: second\n");
    Ok(())
}

#[test]
fn sync_live_reports_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.txt");
    let mut handler = LiveHandler::with_console(&b""[..], Vec::new());
    let err = interpret(number_lines(path.to_str().unwrap()), &mut handler).unwrap_err();
    assert!(matches!(err, EffectError::Io { .. }));
    assert!(!dir.path().join("missing.txt.prefixed").exists());
}

#[test]
fn sync_live_console_greets() {
    let program = read_line().bind(|name| write_line(format!("Hello, {name}!")));
    let mut handler = LiveHandler::with_console(&b"Ada\n"[..], Vec::new());
    interpret(program, &mut handler).unwrap();
    let (_, output) = handler.into_console();
    assert_eq!(output, b"Hello, Ada!\n");
}

#[tokio::test]
async fn async_live_numbers_a_real_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("b.txt");
    tokio::fs::write(&path, "x\ny\nz\n").await?;

    let mut handler = AsyncLiveHandler::with_console(tokio::io::BufReader::new(&b""[..]), Vec::new());
    interpret_async(number_lines(path.to_str().unwrap_or_default()), &mut handler).await?;

    let written = tokio::fs::read_to_string(dir.path().join("b.txt.prefixed")).await?;
    assert_eq!(written, "1: x\n2: y\n3: z\n");
    Ok(())
}

#[tokio::test]
async fn async_live_console_reads_in_order() {
    let program: Program<(String, String)> = read_line()
        .bind_and_combine(|_| read_line(), |a, b| (a, b));
    let input = tokio::io::BufReader::new(&b"one\r\ntwo\n"[..]);
    let mut handler = AsyncLiveHandler::with_console(input, Vec::new());
    let pair = handler.run_async(program).await.unwrap();
    assert_eq!(pair, ("one".to_string(), "two".to_string()));
}

#[tokio::test]
async fn async_live_end_of_input_is_an_error() {
    let mut handler =
        AsyncLiveHandler::with_console(tokio::io::BufReader::new(&b""[..]), Vec::new());
    let err = interpret_async(read_line(), &mut handler).await.unwrap_err();
    assert!(matches!(err, EffectError::Console(_)));
}
