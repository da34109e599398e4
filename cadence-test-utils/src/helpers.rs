// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;
use tokio::task::yield_now;
use tokio::time::advance;

const SETTLE_ROUNDS: usize = 16;

/// Yield repeatedly so tasks woken by the last clock change can run.
///
/// Never sleeps, so a paused clock does not auto-advance while settling.
pub async fn settle() {
    for _ in 0..SETTLE_ROUNDS {
        yield_now().await;
    }
}

/// Advance a paused clock by `ms` and let woken timer tasks finish.
pub async fn advance_and_settle(ms: u64) {
    advance(Duration::from_millis(ms)).await;
    settle().await;
}
