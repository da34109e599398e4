// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#[cfg(feature = "runtime-tokio")]
use std::future::Future;

#[cfg(feature = "runtime-tokio")]
use crate::{runtime::Runtime, timer::Timer};

/// Tokio executor with `parking_lot` locks.
#[cfg(feature = "runtime-tokio")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioRuntime;

#[cfg(feature = "runtime-tokio")]
impl Runtime for TokioRuntime {
    type Lock<T: Send> = parking_lot::Mutex<T>;
    type Timer = TokioTimer;

    fn has_context() -> bool {
        tokio::runtime::Handle::try_current().is_ok()
    }

    fn spawn<F>(future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tokio::spawn(future);
    }
}

/// Timer backed by `tokio::time`, so a paused test clock drives it.
#[cfg(feature = "runtime-tokio")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

#[cfg(feature = "runtime-tokio")]
impl Timer for TokioTimer {
    type Instant = tokio::time::Instant;
    type Sleep = tokio::time::Sleep;

    fn now(&self) -> Self::Instant {
        tokio::time::Instant::now()
    }

    fn sleep_until(&self, deadline: Self::Instant) -> Self::Sleep {
        tokio::time::sleep_until(deadline)
    }
}
