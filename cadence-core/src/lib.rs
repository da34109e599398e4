// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cancellation and deferred execution primitives shared by Cadence gates.

pub mod cancellation_token;
pub mod timer_task;

pub use self::cancellation_token::{CancellationToken, Cancelled};
pub use self::timer_task::TimerTask;
