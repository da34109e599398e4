// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cadence_error::{panic_message, BoxError};
use core::any::Any;

/// A callback registered on an [`EventBus`](crate::EventBus) topic.
///
/// Implemented for every `Fn(&P)` closure returning `()` or `Result<(), E>`,
/// so most callers never name this trait. Implement it directly for listener
/// types that carry their own state.
pub trait Listener<P: ?Sized>: Send + Sync + 'static {
    /// Handle one emitted payload.
    ///
    /// # Errors
    /// Whatever the listener considers a failure; it is collected by `emit`
    /// and does not stop the fan-out.
    fn on_event(&self, payload: &P) -> Result<(), BoxError>;
}

/// Return values a closure listener may produce.
pub trait ListenerOutcome {
    /// Normalise the value into a listener result.
    ///
    /// # Errors
    /// Returns the listener's own error, boxed.
    fn into_outcome(self) -> Result<(), BoxError>;
}

impl ListenerOutcome for () {
    fn into_outcome(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<E> ListenerOutcome for Result<(), E>
where
    E: Into<BoxError>,
{
    fn into_outcome(self) -> Result<(), BoxError> {
        self.map_err(Into::into)
    }
}

impl<P, F, O> Listener<P> for F
where
    P: ?Sized,
    F: Fn(&P) -> O + Send + Sync + 'static,
    O: ListenerOutcome,
{
    fn on_event(&self, payload: &P) -> Result<(), BoxError> {
        self(payload).into_outcome()
    }
}

/// A listener panicked while handling an emission.
///
/// Carried as the source of a [`ListenerFailure`](cadence_error::ListenerFailure).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("listener panicked: {message}")]
pub struct ListenerPanic {
    message: String,
}

impl ListenerPanic {
    pub(crate) fn from_payload(payload: &(dyn Any + Send)) -> Self {
        Self {
            message: panic_message(payload),
        }
    }

    /// The panic message, if the payload was a string.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
