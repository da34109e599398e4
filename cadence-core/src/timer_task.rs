// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Spawned background tasks that are cancelled when their handle is dropped.

use crate::CancellationToken;
use cadence_runtime::runtime::Runtime;
use cadence_runtime::timer::Timer;
use core::future::Future;
use core::time::Duration;

/// Handle to a task spawned on runtime `R`, cancelled on drop.
///
/// Owning a `TimerTask` is owning "the" timer: replacing the handle drops the
/// previous one, which signals its token, so a holder of `Option<TimerTask>`
/// can never have two live timers.
///
/// ```rust
/// use cadence_core::TimerTask;
/// use cadence_runtime::DefaultRuntime;
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() {
/// let task = TimerTask::after::<DefaultRuntime, _>(Duration::from_millis(50), || {
///     println!("fired");
/// });
///
/// // Dropping before the delay elapses disarms it.
/// drop(task);
/// # }
/// ```
#[derive(Debug)]
pub struct TimerTask {
    cancel: CancellationToken,
}

impl TimerTask {
    /// Spawn the future built by `f` on runtime `R`.
    ///
    /// `f` receives the task's token; the future is expected to stop at its
    /// next checkpoint once the token is cancelled.
    pub fn spawn<R, F, Fut>(f: F) -> Self
    where
        R: Runtime,
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        R::spawn(f(cancel.clone()));
        Self { cancel }
    }

    /// Run `fire` once `delay` has elapsed, unless cancelled first.
    ///
    /// The deadline is taken when `after` is called, not when the executor
    /// first polls the task. The sleep races the token, so a cancelled task
    /// releases its timer immediately instead of sleeping out the delay.
    pub fn after<R, F>(delay: Duration, fire: F) -> Self
    where
        R: Runtime,
        F: FnOnce() + Send + 'static,
    {
        let timer = R::timer();
        let sleep = timer.sleep_until(timer.now() + delay);
        Self::spawn::<R, _, _>(move |token| async move {
            if token.run_until_cancelled(sleep).await.is_some() && !token.is_cancelled() {
                fire();
            }
        })
    }

    /// Signal the task to stop. Idempotent.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for TimerTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
