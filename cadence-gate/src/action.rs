// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cadence_error::BoxError;

/// Something a gate can fire with the arguments of a call.
///
/// Implemented for every `FnMut(A) -> O` closure where `O` is `()` or
/// `Result<(), E>`, so both infallible and fallible closures can be wrapped.
pub trait Action<A>: Send + 'static {
    /// Run the action once.
    ///
    /// # Errors
    /// Returns the action's own failure, boxed.
    fn call(&mut self, args: A) -> Result<(), BoxError>;
}

impl<A, F, O> Action<A> for F
where
    F: FnMut(A) -> O + Send + 'static,
    O: ActionOutcome,
{
    fn call(&mut self, args: A) -> Result<(), BoxError> {
        self(args).into_result()
    }
}

/// Return types an [`Action`] closure may produce.
pub trait ActionOutcome {
    /// Normalise the outcome to a boxed result.
    ///
    /// # Errors
    /// Returns the boxed failure for `Err` outcomes.
    fn into_result(self) -> Result<(), BoxError>;
}

impl ActionOutcome for () {
    fn into_result(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<E> ActionOutcome for Result<(), E>
where
    E: Into<BoxError>,
{
    fn into_result(self) -> Result<(), BoxError> {
        self.map_err(Into::into)
    }
}
