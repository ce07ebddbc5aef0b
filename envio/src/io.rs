//! Environment programs
//!
//! An [`Io`] is a deferred function of an environment. Running it is plain
//! function application: the environment is handed in once by `&mut` and the
//! program decides which capabilities to call on it. The error type `E`
//! threads through composition; the first failure skips every later step and
//! becomes the outcome of the run.
//!
//! Programs whose error type is [`CannotFail`] compose into fallible ones
//! through [`Io::widen`], [`Io::bind_fallible`] and [`Io::bind_infallible`].
//! The opposite direction does not exist:
//!
//! ```compile_fail
//! use envio::{console, Io, TestEnv};
//!
//! // `read_line` can fail, so it is not an infallible program.
//! let program: Io<TestEnv, String> = console::read_line::<TestEnv>();
//! ```

use std::fmt;

use freeio::{CannotFail, Outcome, OutcomeExt};

type Run<Env, T, E> = Box<dyn FnOnce(&mut Env) -> Outcome<T, E> + Send>;

/// A program over environment `Env`, producing `T` or failing with `E`.
///
/// Composition nests closures: running or dropping an `Io` uses stack in
/// proportion to how many `bind`/`map`/`then` steps it was built from. It is
/// meant for short capability programs. Long or generated step sequences
/// belong in a [`freeio::Program`], whose interpreters run in constant stack
/// depth.
#[must_use = "an environment program does nothing until it is run"]
pub struct Io<Env, T, E = CannotFail> {
    run: Run<Env, T, E>,
}

impl<Env, T, E> Io<Env, T, E>
where
    Env: 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    /// Wrap a function of the environment.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnOnce(&mut Env) -> Outcome<T, E> + Send + 'static,
    {
        Self { run: Box::new(f) }
    }

    /// Give the program access to the environment.
    ///
    /// `f` receives the environment of the run and returns the program to
    /// continue with, usually a capability method. That program runs against
    /// the same environment.
    pub fn use_env<F>(f: F) -> Self
    where
        F: FnOnce(&mut Env) -> Io<Env, T, E> + Send + 'static,
    {
        Self::from_fn(move |env| f(env).run(env))
    }

    /// A program that succeeds with `value` without touching the environment.
    pub fn succeed(value: T) -> Self {
        Self::from_outcome(Ok(value))
    }

    /// A program that fails with `error` without touching the environment.
    pub fn fail(error: E) -> Self {
        Self::from_outcome(Err(error))
    }

    /// A program that yields an already known outcome.
    pub fn from_outcome(outcome: Outcome<T, E>) -> Self {
        Self::from_fn(move |_| outcome)
    }

    /// Apply the program to `env`.
    pub fn run(self, env: &mut Env) -> Outcome<T, E> {
        (self.run)(env)
    }

    /// Continue with `f` of the value; a failure skips `f`.
    pub fn bind<U, F>(self, f: F) -> Io<Env, U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Io<Env, U, E> + Send + 'static,
    {
        Io::from_fn(move |env| {
            let value = self.run(env)?;
            f(value).run(env)
        })
    }

    /// Transform the value; a failure passes through unchanged.
    pub fn map<U, F>(self, f: F) -> Io<Env, U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        Io::from_fn(move |env| self.run(env).map(f))
    }

    /// Run `next` after this program, keeping only `next`'s value.
    pub fn then<U>(self, next: Io<Env, U, E>) -> Io<Env, U, E>
    where
        U: Send + 'static,
    {
        self.bind(move |_| next)
    }

    /// Run this program, then `f` of its value, and combine both values.
    pub fn bind_and_combine<U, V, F, G>(self, f: F, combine: G) -> Io<Env, V, E>
    where
        T: Clone,
        U: Send + 'static,
        V: Send + 'static,
        F: FnOnce(T) -> Io<Env, U, E> + Send + 'static,
        G: FnOnce(T, U) -> V + Send + 'static,
    {
        self.bind(move |first| {
            let kept = first.clone();
            f(first).map(move |second| combine(kept, second))
        })
    }

    /// Continue with an infallible step.
    pub fn bind_infallible<U, F>(self, f: F) -> Io<Env, U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Io<Env, U> + Send + 'static,
    {
        self.bind(move |value| f(value).widen())
    }
}

impl<Env, E> Io<Env, (), E>
where
    Env: 'static,
    E: Send + 'static,
{
    /// A program that succeeds with no value.
    pub fn unit() -> Self {
        Self::succeed(())
    }
}

impl<Env, T> Io<Env, T, CannotFail>
where
    Env: 'static,
    T: Send + 'static,
{
    /// Relabel an infallible program with any error type.
    pub fn widen<E>(self) -> Io<Env, T, E>
    where
        E: Send + 'static,
    {
        Io::from_fn(move |env| self.run(env).widen())
    }

    /// Continue an infallible program with a fallible step.
    pub fn bind_fallible<U, E, F>(self, f: F) -> Io<Env, U, E>
    where
        U: Send + 'static,
        E: Send + 'static,
        F: FnOnce(T) -> Io<Env, U, E> + Send + 'static,
    {
        self.widen().bind(f)
    }

    /// Run the program; there is no failure to observe.
    pub fn run_infallible(self, env: &mut Env) -> T {
        self.run(env).into_value()
    }
}

impl<Env, T, E> fmt::Debug for Io<Env, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Io")
            .field("value", &std::any::type_name::<T>())
            .field("error", &std::any::type_name::<E>())
            .finish_non_exhaustive()
    }
}
