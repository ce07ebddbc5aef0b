//! Program values
//!
//! A [`Program`] is an inert description of a sequence of commands. Nothing
//! runs when a program is built or composed; an interpreter drives it by
//! repeatedly calling [`Program::resume`] and feeding each pending command's
//! output back through the returned [`Continuation`].
//!
//! Internally the continuation chain is a queue of type-erased closures and
//! already built chains. `bind` and `then` append to the queue in constant
//! time and `resume` re-associates nested chains iteratively, so arbitrarily
//! long left- or right-nested compositions resume, and drop unfinished,
//! without growing the call stack.

use std::any::Any;
use std::collections::VecDeque;
use std::fmt;
use std::marker::PhantomData;

use crate::effects::algebra::{
    Command, ConsoleRead, ConsoleWrite, Effect, Log, ReadLines, WriteLines,
};

type Erased = Box<dyn Any + Send>;

enum Kont {
    /// Continue with a function of the previous value.
    Bind(Box<dyn FnOnce(Erased) -> Chain + Send>),
    /// Discard the previous value and continue with an already built chain.
    Then(Chain),
}

struct Chain {
    head: Head,
    conts: VecDeque<Kont>,
}

impl Chain {
    fn into_parts(mut self) -> (Head, VecDeque<Kont>) {
        let head = std::mem::replace(&mut self.head, Head::Done(Box::new(())));
        (head, std::mem::take(&mut self.conts))
    }
}

// Chains nest through `Kont::Then`; tear them down with a worklist so
// dropping an unfinished program never recurses once per nested level.
impl Drop for Chain {
    fn drop(&mut self) {
        let mut pending = vec![std::mem::take(&mut self.conts)];
        while let Some(mut conts) = pending.pop() {
            for kont in conts.drain(..) {
                if let Kont::Then(mut nested) = kont {
                    pending.push(std::mem::take(&mut nested.conts));
                }
            }
        }
    }
}

enum Head {
    Done(Erased),
    Pending(Command),
}

fn unerase<T: 'static>(value: Erased) -> T {
    match value.downcast::<T>() {
        Ok(value) => *value,
        // Every continuation is pushed by a typed `bind`, so the queue order
        // guarantees each one receives the type it was built for.
        Err(_) => unreachable!(
            "continuation expected {} but received another type",
            std::any::type_name::<T>()
        ),
    }
}

/// Put `front` ahead of `rest`, moving whichever side is shorter.
fn splice(rest: &mut VecDeque<Kont>, mut front: VecDeque<Kont>) {
    if front.is_empty() {
        return;
    }
    if front.len() >= rest.len() {
        front.append(rest);
        *rest = front;
    } else {
        while let Some(k) = front.pop_back() {
            rest.push_front(k);
        }
    }
}

/// Description of an effectful computation producing an `A`.
///
/// Programs are built at description time, never mutated, and consumed
/// exactly once by an interpreter.
#[must_use = "a program does nothing until it is interpreted"]
pub struct Program<A> {
    chain: Chain,
    _output: PhantomData<fn() -> A>,
}

/// One observation of a program: finished, or waiting on a command.
pub enum Resume<A> {
    /// The program has finished with a value.
    Done(A),
    /// The program needs the output of a command before it can continue.
    Step(Instruction<A>),
}

/// A pending command paired with the typed continuation that consumes its
/// output.
pub enum Instruction<A> {
    ReadLines(ReadLines, Continuation<Vec<String>, A>),
    WriteLines(WriteLines, Continuation<(), A>),
    Log(Log, Continuation<(), A>),
    ConsoleWrite(ConsoleWrite, Continuation<(), A>),
    ConsoleRead(ConsoleRead, Continuation<String, A>),
}

/// The rest of a program, waiting for an `O`.
#[must_use = "dropping a continuation abandons the rest of the program"]
pub struct Continuation<O, A> {
    conts: VecDeque<Kont>,
    _types: PhantomData<fn(O) -> A>,
}

impl<A> Program<A> {
    fn from_chain(chain: Chain) -> Self {
        Self {
            chain,
            _output: PhantomData,
        }
    }

    /// Observe the program: either its final value or the next command.
    ///
    /// Pure continuations between commands are applied here, in a loop.
    pub fn resume(self) -> Resume<A>
    where
        A: 'static,
    {
        let (mut head, mut conts) = self.chain.into_parts();
        loop {
            match head {
                Head::Pending(command) => {
                    return Resume::Step(Instruction::new(command, conts));
                }
                Head::Done(value) => {
                    let next = match conts.pop_front() {
                        None => return Resume::Done(unerase(value)),
                        Some(Kont::Bind(k)) => k(value),
                        Some(Kont::Then(next)) => next,
                    };
                    let (next_head, next_conts) = next.into_parts();
                    head = next_head;
                    splice(&mut conts, next_conts);
                }
            }
        }
    }

    /// Number of continuations queued behind the current head.
    pub fn pending_binds(&self) -> usize {
        self.chain.conts.len()
    }
}

impl<A: Send + 'static> Program<A> {
    /// Wrap a plain value as a finished program.
    pub fn lift(value: A) -> Self {
        Self::from_chain(Chain {
            head: Head::Done(Box::new(value)),
            conts: VecDeque::new(),
        })
    }

    /// A program consisting of a single command, yielding its output.
    pub fn from_command<C>(command: C) -> Self
    where
        C: Effect<Output = A>,
    {
        Self::from_chain(Chain {
            head: Head::Pending(command.into_command()),
            conts: VecDeque::new(),
        })
    }

    /// Continue with `f` applied to this program's value.
    ///
    /// Only the continuation chain is rewritten; no command runs.
    pub fn bind<B, F>(mut self, f: F) -> Program<B>
    where
        B: Send + 'static,
        F: FnOnce(A) -> Program<B> + Send + 'static,
    {
        self.chain
            .conts
            .push_back(Kont::Bind(Box::new(move |value| {
                f(unerase::<A>(value)).chain
            })));
        Program::from_chain(self.chain)
    }

    /// Transform the final value.
    pub fn map<B, F>(self, f: F) -> Program<B>
    where
        B: Send + 'static,
        F: FnOnce(A) -> B + Send + 'static,
    {
        self.bind(move |value| Program::lift(f(value)))
    }

    /// Run `next` after this program, keeping only `next`'s value.
    pub fn then<B>(mut self, next: Program<B>) -> Program<B>
    where
        B: Send + 'static,
    {
        self.chain.conts.push_back(Kont::Then(next.chain));
        Program::from_chain(self.chain)
    }

    /// Run this program, then `f` of its value, and combine both values.
    pub fn bind_and_combine<B, C, F, G>(self, f: F, combine: G) -> Program<C>
    where
        A: Clone,
        B: Send + 'static,
        C: Send + 'static,
        F: FnOnce(A) -> Program<B> + Send + 'static,
        G: FnOnce(A, B) -> C + Send + 'static,
    {
        self.bind(move |first| {
            let kept = first.clone();
            f(first).map(move |second| combine(kept, second))
        })
    }

    /// Run programs in order and collect their values.
    pub fn sequence<I>(programs: I) -> Program<Vec<A>>
    where
        I: IntoIterator<Item = Program<A>>,
    {
        programs
            .into_iter()
            .fold(Program::lift(Vec::new()), |acc, program| {
                acc.bind(move |mut values| {
                    program.map(move |value| {
                        values.push(value);
                        values
                    })
                })
            })
    }
}

impl<A> fmt::Debug for Program<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Program");
        match &self.chain.head {
            Head::Done(_) => s.field("head", &"Done"),
            Head::Pending(command) => s.field("head", command),
        };
        s.field("pending_binds", &self.chain.conts.len()).finish()
    }
}

impl<A> Instruction<A> {
    fn new(command: Command, conts: VecDeque<Kont>) -> Self {
        match command {
            Command::ReadLines(c) => Instruction::ReadLines(c, Continuation::new(conts)),
            Command::WriteLines(c) => Instruction::WriteLines(c, Continuation::new(conts)),
            Command::Log(c) => Instruction::Log(c, Continuation::new(conts)),
            Command::ConsoleWrite(c) => Instruction::ConsoleWrite(c, Continuation::new(conts)),
            Command::ConsoleRead(c) => Instruction::ConsoleRead(c, Continuation::new(conts)),
        }
    }

    /// Short name of the pending command.
    pub fn name(&self) -> &'static str {
        match self {
            Instruction::ReadLines(..) => ReadLines::NAME,
            Instruction::WriteLines(..) => WriteLines::NAME,
            Instruction::Log(..) => Log::NAME,
            Instruction::ConsoleWrite(..) => ConsoleWrite::NAME,
            Instruction::ConsoleRead(..) => ConsoleRead::NAME,
        }
    }

    /// A copy of the pending command.
    pub fn command(&self) -> Command {
        match self {
            Instruction::ReadLines(c, _) => Command::ReadLines(c.clone()),
            Instruction::WriteLines(c, _) => Command::WriteLines(c.clone()),
            Instruction::Log(c, _) => Command::Log(c.clone()),
            Instruction::ConsoleWrite(c, _) => Command::ConsoleWrite(c.clone()),
            Instruction::ConsoleRead(c, _) => Command::ConsoleRead(*c),
        }
    }
}

impl<A> fmt::Debug for Instruction<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Instruction").field(&self.command()).finish()
    }
}

impl<O: Send + 'static, A> Continuation<O, A> {
    fn new(conts: VecDeque<Kont>) -> Self {
        Self {
            conts,
            _types: PhantomData,
        }
    }

    /// Feed the command's output and get the remaining program.
    pub fn resume(self, output: O) -> Program<A> {
        Program::from_chain(Chain {
            head: Head::Done(Box::new(output)),
            conts: self.conts,
        })
    }
}

/// Do-notation for programs.
///
/// `x <= program;` binds the value of `program` to `x`, `_ <= program;` and
/// `program;` run a program for its effect, `let` binds plain values (with an
/// optional type on a single name), and the last expression is the program
/// whose value is returned.
///
/// ```
/// use freeio::{io, log, read_lines, Program};
///
/// let program: Program<usize> = io! {
///     lines <= read_lines("notes.txt");
///     let count = lines.len();
///     log(format!("{count} lines"));
///     Program::lift(count)
/// };
/// # let _ = program;
/// ```
#[macro_export]
macro_rules! io {
    (let $x:ident : $t:ty = $e:expr; $($rest:tt)+) => {{
        let $x: $t = $e;
        $crate::io!($($rest)+)
    }};
    (let $p:pat = $e:expr; $($rest:tt)+) => {{
        let $p = $e;
        $crate::io!($($rest)+)
    }};
    (_ <= $e:expr; $($rest:tt)+) => {
        $crate::Program::then($e, $crate::io!($($rest)+))
    };
    ($x:ident <= $e:expr; $($rest:tt)+) => {
        $crate::Program::bind($e, move |$x| $crate::io!($($rest)+))
    };
    ($e:expr; $($rest:tt)+) => {
        $crate::Program::then($e, $crate::io!($($rest)+))
    };
    ($e:expr) => {
        $e
    };
}
