// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the Cadence library
//!
//! This crate defines the root [`CadenceError`] type shared by timer gates and the
//! event bus. Configuration mistakes fail fast with
//! [`CadenceError::InvalidConfiguration`]; failures raised by user code while a gate
//! fires or while a topic fans out are carried by [`CadenceError::ActionFailure`] and
//! [`CadenceError::ListenerFailures`].
//!
//! # Examples
//!
//! ```
//! use cadence_error::{CadenceError, Result};
//!
//! fn window_ms(raw: i64) -> Result<u64> {
//!     if raw <= 0 {
//!         return Err(CadenceError::invalid_configuration("window must be positive"));
//!     }
//!     Ok(raw as u64)
//! }
//!
//! assert!(window_ms(0).is_err());
//! ```

use core::any::Any;
use core::fmt;

/// Boxed error produced by user-supplied actions and listeners.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Root error type for all Cadence operations
#[derive(Debug, thiserror::Error)]
pub enum CadenceError {
    /// A gate or bus was configured with values it cannot honour
    ///
    /// Raised for non-positive windows, empty topics and handles minted by a
    /// different bus.
    #[error("Invalid configuration: {context}")]
    InvalidConfiguration {
        /// What was wrong with the configuration
        context: String,
    },

    /// The wrapped action failed while the gate was firing it
    #[error("Action failed: {0}")]
    ActionFailure(#[source] BoxError),

    /// One or more listeners failed during a single emission
    ///
    /// The fan-out ran to completion; every failure is listed in the order the
    /// failing listeners were invoked.
    #[error("{} listener(s) failed on topic '{topic}'", failures.len())]
    ListenerFailures {
        /// Topic that was being emitted
        topic: String,
        /// Individual listener failures
        failures: Vec<ListenerFailure>,
    },
}

impl CadenceError {
    /// Create an invalid configuration error with the given context
    pub fn invalid_configuration(context: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            context: context.into(),
        }
    }

    /// Wrap an action failure
    pub fn action_failure(error: impl Into<BoxError>) -> Self {
        Self::ActionFailure(error.into())
    }

    /// Aggregate listener failures for `topic`
    pub fn listener_failures(topic: impl Into<String>, failures: Vec<ListenerFailure>) -> Self {
        Self::ListenerFailures {
            topic: topic.into(),
            failures,
        }
    }

    /// Check if this error was caused by the caller's configuration
    ///
    /// Configuration errors never change on retry; runtime failures may.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration { .. })
    }

    /// Check if this error originates from user code (an action or a listener)
    #[must_use]
    pub const fn is_user_failure(&self) -> bool {
        matches!(self, Self::ActionFailure(_) | Self::ListenerFailures { .. })
    }

    /// Listener failures carried by this error, empty for other variants
    #[must_use]
    pub fn failures(&self) -> &[ListenerFailure] {
        match self {
            Self::ListenerFailures { failures, .. } => failures,
            _ => &[],
        }
    }
}

/// A single listener failure collected during an emission
#[derive(Debug)]
pub struct ListenerFailure {
    subscription: u64,
    source: BoxError,
}

impl ListenerFailure {
    /// Record that the listener registered as `subscription` failed with `source`
    pub fn new(subscription: u64, source: impl Into<BoxError>) -> Self {
        Self {
            subscription,
            source: source.into(),
        }
    }

    /// Raw identifier of the subscription whose listener failed
    #[must_use]
    pub const fn subscription(&self) -> u64 {
        self.subscription
    }

    /// The error the listener produced
    #[must_use]
    pub fn error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.source.as_ref()
    }

    /// Consume the failure and return the underlying error
    #[must_use]
    pub fn into_error(self) -> BoxError {
        self.source
    }
}

impl fmt::Display for ListenerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener #{} failed: {}", self.subscription, self.source)
    }
}

impl std::error::Error for ListenerFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Text of a panic payload caught with `catch_unwind`
///
/// `panic!` payloads are `&'static str` or `String`; anything else yields a
/// fixed placeholder.
#[must_use]
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Specialized Result type for Cadence operations
///
/// ```
/// use cadence_error::Result;
///
/// fn configure() -> Result<u64> {
///     Ok(250)
/// }
/// ```
pub type Result<T> = std::result::Result<T, CadenceError>;

/// Helper trait for adding context to `Result`s
pub trait ResultExt<T> {
    /// Add context to an error
    ///
    /// Only configuration errors gain the prefix; user failures keep their
    /// original source so callers can still downcast them.
    ///
    /// # Errors
    /// Returns `Err(CadenceError)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context to an error using a closure (lazy evaluation)
    ///
    /// # Errors
    /// Returns `Err(CadenceError)` if the underlying result is `Err`.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<CadenceError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.with_context(|| context.into())
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| match e.into() {
            CadenceError::InvalidConfiguration { context } => CadenceError::InvalidConfiguration {
                context: format!("{}: {context}", f()),
            },
            other => other,
        })
    }
}
