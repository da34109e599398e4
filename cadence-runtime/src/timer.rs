// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt::Debug;
use core::future::Future;
use core::ops::{Add, Sub};
use core::time::Duration;

/// Clock and sleep source of a runtime.
pub trait Timer: Clone + Default + Debug + Send + Sync + 'static {
    type Instant: Copy
        + Ord
        + Debug
        + Send
        + Sync
        + Add<Duration, Output = Self::Instant>
        + Sub<Self::Instant, Output = Duration>;

    type Sleep: Future<Output = ()> + Send + 'static;

    fn now(&self) -> Self::Instant;

    /// Sleep until `deadline`. Completes immediately if it has passed.
    fn sleep_until(&self, deadline: Self::Instant) -> Self::Sleep;

    /// Sleep for `delay`, measured from the moment of this call.
    fn sleep(&self, delay: Duration) -> Self::Sleep {
        self.sleep_until(self.now() + delay)
    }
}
