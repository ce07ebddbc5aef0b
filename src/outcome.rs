//! Result channel
//!
//! Fallible steps report through Rust's own `Result`: `Ok` is the success
//! case and `Err` the failure case. This module adds the pieces the effect
//! layers need on top of it: an uninhabited [`CannotFail`] error marker for
//! steps that are statically known to succeed, and a total conversion from
//! such results into any fallible result.

use std::fmt;

/// Outcome of a step or of a whole run.
///
/// Defaults the error type to [`CannotFail`], so `Outcome<T>` reads as
/// "always succeeds".
pub type Outcome<T, E = CannotFail> = std::result::Result<T, E>;

/// Error type of a step that cannot fail.
///
/// The enum has no variants, so no value of it can exist. A
/// `Result<T, CannotFail>` is therefore always `Ok`, and matching on the
/// error arm is an empty `match`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum CannotFail {}

impl CannotFail {
    /// Turn the (impossible) error into any type.
    pub fn absurd<T>(self) -> T {
        match self {}
    }
}

impl fmt::Debug for CannotFail {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Display for CannotFail {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl std::error::Error for CannotFail {}

/// Conversions available on infallible outcomes.
pub trait OutcomeExt<T> {
    /// Relabel an infallible outcome with an arbitrary error type.
    fn widen<E>(self) -> Outcome<T, E>;

    /// Extract the value. Total: there is no error to observe.
    fn into_value(self) -> T;
}

impl<T> OutcomeExt<T> for Outcome<T, CannotFail> {
    fn widen<E>(self) -> Outcome<T, E> {
        match self {
            Ok(value) => Ok(value),
            Err(never) => never.absurd(),
        }
    }

    fn into_value(self) -> T {
        match self {
            Ok(value) => value,
            Err(never) => never.absurd(),
        }
    }
}

/// Success constructor with the error type left open.
pub fn success<T, E>(value: T) -> Outcome<T, E> {
    Ok(value)
}

/// Failure constructor with the value type left open.
pub fn failure<T, E>(error: E) -> Outcome<T, E> {
    Err(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widen_keeps_the_value() {
        let ok: Outcome<u32> = Ok(7);
        let widened: Outcome<u32, String> = ok.widen();
        assert_eq!(widened, Ok(7));
    }

    #[test]
    fn into_value_is_total() {
        let ok: Outcome<&str> = success("done");
        assert_eq!(ok.into_value(), "done");
    }

    #[test]
    fn map_relabels_failure_without_touching_it() {
        let failed: Outcome<u32, &str> = failure("boom");
        let mapped = failed.map(|v| v.to_string());
        assert_eq!(mapped, Err("boom"));
    }
}
