//! Interpreters
//!
//! Drivers that step a [`Program`] to completion against a handler. All of
//! them share the same contract: resume the program, hand the pending
//! command to the handler, feed the output to the continuation, repeat. A
//! handler error ends the run immediately and is returned unchanged.

use async_trait::async_trait;

use crate::effects::handler::{AsyncHandler, Handler, Result};
use crate::effects::program::{Instruction, Program, Resume};

impl<A> Instruction<A> {
    /// Perform the pending command with `handler` and continue the program.
    pub fn dispatch<H: Handler + ?Sized>(self, handler: &mut H) -> Result<Program<A>> {
        Ok(match self {
            Instruction::ReadLines(cmd, k) => k.resume(handler.read_lines(cmd)?),
            Instruction::WriteLines(cmd, k) => k.resume(handler.write_lines(cmd)?),
            Instruction::Log(cmd, k) => k.resume(handler.log(cmd)?),
            Instruction::ConsoleWrite(cmd, k) => k.resume(handler.console_write(cmd)?),
            Instruction::ConsoleRead(cmd, k) => k.resume(handler.console_read(cmd)?),
        })
    }

    /// Await the pending command's output from `handler` and continue the
    /// program.
    pub async fn dispatch_async<H: AsyncHandler + ?Sized>(
        self,
        handler: &mut H,
    ) -> Result<Program<A>> {
        Ok(match self {
            Instruction::ReadLines(cmd, k) => k.resume(handler.read_lines(cmd).await?),
            Instruction::WriteLines(cmd, k) => k.resume(handler.write_lines(cmd).await?),
            Instruction::Log(cmd, k) => k.resume(handler.log(cmd).await?),
            Instruction::ConsoleWrite(cmd, k) => k.resume(handler.console_write(cmd).await?),
            Instruction::ConsoleRead(cmd, k) => k.resume(handler.console_read(cmd).await?),
        })
    }
}

/// Run `program` to completion with an iterative loop.
///
/// Stack usage does not depend on the length of the program.
pub fn interpret<A, H>(mut program: Program<A>, handler: &mut H) -> Result<A>
where
    A: 'static,
    H: Handler + ?Sized,
{
    loop {
        program = match program.resume() {
            Resume::Done(value) => return Ok(value),
            Resume::Step(instruction) => instruction.dispatch(handler)?,
        };
    }
}

/// Run `program` by recursing once per command.
///
/// Only suitable for short programs: every command adds a stack frame.
pub fn interpret_recursive<A, H>(program: Program<A>, handler: &mut H) -> Result<A>
where
    A: 'static,
    H: Handler + ?Sized,
{
    match program.resume() {
        Resume::Done(value) => Ok(value),
        Resume::Step(instruction) => {
            let next = instruction.dispatch(handler)?;
            interpret_recursive(next, handler)
        }
    }
}

/// Run `program`, suspending on each command until its output resolves.
///
/// Commands are issued strictly one after another. Dropping the returned
/// future stops observing the run; a command already issued is not aborted.
pub async fn interpret_async<A, H>(mut program: Program<A>, handler: &mut H) -> Result<A>
where
    A: Send + 'static,
    H: AsyncHandler + ?Sized,
{
    loop {
        program = match program.resume() {
            Resume::Done(value) => return Ok(value),
            Resume::Step(instruction) => instruction.dispatch_async(handler).await?,
        };
    }
}

/// Drive an asynchronous handler to completion from synchronous code.
pub fn interpret_blocking<A, H>(program: Program<A>, handler: &mut H) -> Result<A>
where
    A: Send + 'static,
    H: AsyncHandler + ?Sized,
{
    futures::executor::block_on(interpret_async(program, handler))
}

/// Method syntax for driving programs with a synchronous handler.
pub trait HandlerExt: Handler {
    /// Run `program` with the iterative interpreter.
    fn run<A: 'static>(&mut self, program: Program<A>) -> Result<A> {
        interpret(program, self)
    }
}

impl<H: Handler + ?Sized> HandlerExt for H {}

/// Method syntax for driving programs with an asynchronous handler.
#[async_trait]
pub trait AsyncHandlerExt: AsyncHandler {
    /// Run `program` with the asynchronous interpreter.
    async fn run_async<A: Send + 'static>(&mut self, program: Program<A>) -> Result<A> {
        interpret_async(program, self).await
    }
}

#[async_trait]
impl<H: AsyncHandler + ?Sized> AsyncHandlerExt for H {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::algebra::{log, read_line, read_lines, write_line};
    use crate::effects::handler::{Blocking, EffectError, NoOpHandler};
    use crate::effects::handlers::MockHandler;

    #[test]
    fn interpret_returns_lifted_value() {
        assert_eq!(interpret(Program::lift(5), &mut NoOpHandler).unwrap(), 5);
    }

    #[test]
    fn unsupported_command_ends_the_run() {
        let program = log("before")
            .then(read_lines("a.txt"))
            .bind(|_| write_line("never"));
        let mut handler = NoOpHandler::new();
        let err = interpret(program, &mut handler).unwrap_err();
        assert!(matches!(err, EffectError::Unsupported { command: "read_lines" }));
    }

    #[test]
    fn recursive_and_iterative_agree_on_short_programs() {
        let build = || read_line().bind(|name| log(format!("hello {name}")).map(move |_| name));
        let mut first = MockHandler::new().with_input("ada");
        let mut second = MockHandler::new().with_input("ada");
        let a = interpret(build(), &mut first).unwrap();
        let b = interpret_recursive(build(), &mut second).unwrap();
        assert_eq!(a, b);
        assert_eq!(first.output(), second.output());
    }

    #[test]
    fn handler_ext_runs_programs() {
        let mut handler = MockHandler::new();
        let lines = handler.run(read_lines("x")).unwrap();
        assert_eq!(lines, vec!["Hello", "World", "x"]);
    }

    #[tokio::test]
    async fn async_interpreter_matches_sync() {
        let build = || read_lines("a.txt").bind(|lines| log(format!("{} lines", lines.len())));
        let mut sync = MockHandler::new();
        interpret(build(), &mut sync).unwrap();

        let mut blocking = Blocking::new(MockHandler::new());
        blocking.run_async(build()).await.unwrap();
        assert_eq!(blocking.inner().output(), sync.output());
    }

    #[test]
    fn blocking_driver_runs_async_handlers() {
        let mut handler = Blocking::new(MockHandler::new().with_input("ada"));
        let name = interpret_blocking(read_line(), &mut handler).unwrap();
        assert_eq!(name, "ada");
    }
}
