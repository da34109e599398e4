// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::lock::SharedLock;
use crate::timer::Timer;
use core::future::Future;

/// The primitives a gate needs from an async runtime.
pub trait Runtime: Send + Sync + 'static {
    type Lock<T: Send>: SharedLock<T>;
    type Timer: Timer;

    /// Whether [`spawn`](Self::spawn) and the timer are usable from the
    /// calling thread.
    fn has_context() -> bool;

    /// Detach `future` onto the runtime's executor.
    ///
    /// Must only be called when [`has_context`](Self::has_context) holds.
    fn spawn<F>(future: F)
    where
        F: Future<Output = ()> + Send + 'static;

    fn timer() -> Self::Timer {
        Self::Timer::default()
    }
}
