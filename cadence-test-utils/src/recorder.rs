// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cadence_error::CadenceError;
use parking_lot::Mutex;
use std::sync::Arc;

/// Shared log of the arguments something was called with.
///
/// Clones share the same log, so one clone can be moved into a closure while
/// the test keeps another for assertions.
///
/// ```rust
/// use cadence_test_utils::CallRecorder;
///
/// let recorder = CallRecorder::new();
/// let mut action = recorder.action();
/// action("first");
/// action("second");
///
/// assert_eq!(recorder.calls(), vec!["first", "second"]);
/// ```
#[derive(Debug)]
pub struct CallRecorder<T> {
    calls: Arc<Mutex<Vec<T>>>,
}

impl<T> CallRecorder<T> {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn record(&self, value: T) {
        self.calls.lock().push(value);
    }

    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }
}

impl<T: Clone> CallRecorder<T> {
    pub fn calls(&self) -> Vec<T> {
        self.calls.lock().clone()
    }
}

impl<T: Send + 'static> CallRecorder<T> {
    /// An infallible gate action that records its argument.
    pub fn action(&self) -> impl FnMut(T) + Send + 'static {
        let recorder = self.clone();
        move |value| recorder.record(value)
    }
}

impl<T: Clone + Send + 'static> CallRecorder<T> {
    /// An infallible bus listener that records a copy of the payload.
    pub fn listener(&self) -> impl Fn(&T) + Send + Sync + 'static {
        let recorder = self.clone();
        move |value: &T| recorder.record(value.clone())
    }
}

impl<T> Clone for CallRecorder<T> {
    fn clone(&self) -> Self {
        Self {
            calls: self.calls.clone(),
        }
    }
}

impl<T> Default for CallRecorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects the messages of failures handed to a gate's failure handler.
#[derive(Debug, Clone, Default)]
pub struct FailureLog {
    messages: CallRecorder<String>,
}

impl FailureLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handler suitable for `GateBuilder::on_failure`.
    pub fn handler(&self) -> impl Fn(CadenceError) + Send + Sync + 'static {
        let messages = self.messages.clone();
        move |err: CadenceError| messages.record(err.to_string())
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.calls()
    }

    pub fn count(&self) -> usize {
        self.messages.count()
    }
}
