// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime-agnostic cancellation token used to disarm pending gate timers.

use core::future::Future;
use core::pin::{pin, Pin};
use core::sync::atomic::{AtomicBool, Ordering};
use core::task::{Context, Poll};
use event_listener::{Event, EventListener};
use futures::future::{select, Either};
use std::sync::Arc;

/// Shared cancellation flag with async notification.
///
/// Clones share state: cancelling any clone cancels them all and wakes every
/// task waiting on [`cancelled`](Self::cancelled).
///
/// ```
/// use cadence_core::CancellationToken;
///
/// let token = CancellationToken::new();
/// let observer = token.clone();
///
/// token.cancel();
/// token.cancel();
/// assert!(observer.is_cancelled());
/// ```
#[derive(Clone, Debug)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    cancelled: AtomicBool,
    event: Event,
}

impl CancellationToken {
    /// Create a token that is not cancelled yet.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                cancelled: AtomicBool::new(false),
                event: Event::new(),
            }),
        }
    }

    /// Cancel the token and wake all waiters. Idempotent.
    pub fn cancel(&self) {
        if !self.inner.cancelled.swap(true, Ordering::AcqRel) {
            self.inner.event.notify(usize::MAX);
        }
    }

    /// Check the flag without waiting.
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Wait until the token is cancelled. Resolves immediately if it already is.
    pub fn cancelled(&self) -> Cancelled<'_> {
        Cancelled {
            token: self,
            listener: None,
        }
    }

    /// Drive `future` to completion unless the token is cancelled first.
    ///
    /// Returns `None` when cancellation won the race.
    pub async fn run_until_cancelled<F>(&self, future: F) -> Option<F::Output>
    where
        F: Future,
    {
        if self.is_cancelled() {
            return None;
        }

        let future = pin!(future);
        let cancelled = pin!(self.cancelled());
        match select(future, cancelled).await {
            Either::Left((output, _)) => Some(output),
            Either::Right(((), _)) => None,
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Future returned by [`CancellationToken::cancelled`].
#[derive(Debug)]
pub struct Cancelled<'a> {
    token: &'a CancellationToken,
    listener: Option<EventListener>,
}

impl Future for Cancelled<'_> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        loop {
            if self.token.is_cancelled() {
                return Poll::Ready(());
            }

            match self.listener.as_mut() {
                Some(listener) => match Pin::new(listener).poll(cx) {
                    Poll::Ready(()) => {
                        // Notified; loop to confirm the flag and re-listen if needed.
                        self.listener = None;
                    }
                    Poll::Pending => return Poll::Pending,
                },
                None => {
                    // Registered before the re-check at the top of the loop, so a
                    // cancel landing in between is not missed.
                    self.listener = Some(self.token.inner.event.listen());
                }
            }
        }
    }
}
