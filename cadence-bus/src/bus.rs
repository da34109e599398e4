// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::listener::{Listener, ListenerOutcome, ListenerPanic};
use crate::subscription::{Subscription, SubscriptionHandle, SubscriptionId};
use cadence_error::{BoxError, CadenceError, ListenerFailure, Result};
use core::fmt;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_BUS_ID: AtomicU64 = AtomicU64::new(1);

struct Entry<P: ?Sized + 'static> {
    id: SubscriptionId,
    listener: Arc<dyn Listener<P>>,
}

pub(crate) struct BusInner<P: ?Sized + 'static> {
    bus_id: u64,
    next_id: AtomicU64,
    topics: Mutex<HashMap<String, Vec<Entry<P>>>>,
}

impl<P: ?Sized + 'static> BusInner<P> {
    pub(crate) fn remove(&self, topic: &str, id: SubscriptionId) -> bool {
        let removed = {
            let mut topics = self.topics.lock();
            let Some(entries) = topics.get_mut(topic) else {
                return false;
            };
            let Some(position) = entries.iter().position(|entry| entry.id == id) else {
                return false;
            };
            let removed = entries.remove(position);
            if entries.is_empty() {
                topics.remove(topic);
            }
            removed
        };
        // The listener may own arbitrary state; release it outside the lock.
        drop(removed);
        trace!("removed listener {id} from '{topic}'");
        true
    }
}

/// Synchronous publish/subscribe registry keyed by topic.
///
/// Listeners registered on a topic run in registration order, on the thread
/// that calls [`emit`](Self::emit). Topics are matched exactly, so
/// `"userLogin"` and `"userlogin"` are unrelated.
///
/// Clones share one registry. Wrap a bus in a `static` `LazyLock` for a
/// process-wide instance, or hand clones to the components that need it.
///
/// Use `EventBus<dyn Any + Send + Sync>` when one bus carries payloads of
/// different types; listeners then downcast.
pub struct EventBus<P: ?Sized + 'static> {
    inner: Arc<BusInner<P>>,
}

impl<P: ?Sized + 'static> EventBus<P> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(BusInner {
                bus_id: NEXT_BUS_ID.fetch_add(1, Ordering::Relaxed),
                next_id: AtomicU64::new(1),
                topics: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Register `listener` at the end of `topic`'s listener list.
    ///
    /// The same closure may be registered more than once; each registration
    /// runs on every emission and has its own handle.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if `topic` is empty.
    pub fn subscribe<F, O>(&self, topic: &str, listener: F) -> Result<SubscriptionHandle>
    where
        F: Fn(&P) -> O + Send + Sync + 'static,
        O: ListenerOutcome,
    {
        self.subscribe_listener(topic, listener)
    }

    /// Register a listener type implementing [`Listener`] directly.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if `topic` is empty.
    pub fn subscribe_listener<L>(&self, topic: &str, listener: L) -> Result<SubscriptionHandle>
    where
        L: Listener<P>,
    {
        validate_topic(topic)?;

        let id = SubscriptionId::new(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.inner
            .topics
            .lock()
            .entry(topic.to_string())
            .or_default()
            .push(Entry {
                id,
                listener: Arc::new(listener),
            });
        trace!("subscribed listener {id} to '{topic}'");

        Ok(SubscriptionHandle {
            bus_id: self.inner.bus_id,
            id,
        })
    }

    /// Like [`subscribe`](Self::subscribe), but the registration lives as long
    /// as the returned guard.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if `topic` is empty.
    pub fn subscribe_scoped<F, O>(&self, topic: &str, listener: F) -> Result<Subscription<P>>
    where
        F: Fn(&P) -> O + Send + Sync + 'static,
        O: ListenerOutcome,
    {
        let handle = self.subscribe(topic, listener)?;
        Ok(Subscription::new(
            Arc::downgrade(&self.inner),
            topic.to_string(),
            handle,
        ))
    }

    /// Remove the registration identified by `handle` from `topic`.
    ///
    /// Returns `Ok(false)` if it was not registered there, for example because
    /// it was already removed. Other registrations are untouched.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if `topic` is empty or `handle` was
    /// minted by a different bus.
    pub fn unsubscribe(&self, topic: &str, handle: SubscriptionHandle) -> Result<bool> {
        validate_topic(topic)?;
        if handle.bus_id != self.inner.bus_id {
            return Err(CadenceError::invalid_configuration(format!(
                "subscription handle {} belongs to a different bus",
                handle.id
            )));
        }

        Ok(self.inner.remove(topic, handle.id))
    }

    /// Run every listener registered on `topic` with `payload` and return how
    /// many ran.
    ///
    /// The listener list is snapshotted first, so listeners that subscribe or
    /// unsubscribe during the emission affect only later emissions. No lock is
    /// held while a listener runs. A topic without listeners yields `Ok(0)`.
    ///
    /// # Errors
    /// Returns `ListenerFailures` if any listener returned an error or
    /// panicked. Every listener still ran; the failures keep invocation order.
    pub fn emit(&self, topic: &str, payload: &P) -> Result<usize> {
        let snapshot: Vec<(SubscriptionId, Arc<dyn Listener<P>>)> = self
            .inner
            .topics
            .lock()
            .get(topic)
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| (entry.id, Arc::clone(&entry.listener)))
                    .collect()
            })
            .unwrap_or_default();

        trace!("emitting '{topic}' to {} listener(s)", snapshot.len());

        let mut failures = Vec::new();
        for (id, listener) in &snapshot {
            let error: BoxError = match catch_unwind(AssertUnwindSafe(|| listener.on_event(payload))) {
                Ok(Ok(())) => continue,
                Ok(Err(error)) => error,
                Err(panic) => Box::new(ListenerPanic::from_payload(panic.as_ref())),
            };
            warn!("listener {id} failed on '{topic}': {error}");
            failures.push(ListenerFailure::new(id.get(), error));
        }

        if failures.is_empty() {
            Ok(snapshot.len())
        } else {
            Err(CadenceError::listener_failures(topic, failures))
        }
    }

    #[must_use]
    pub fn listener_count(&self, topic: &str) -> usize {
        self.inner.topics.lock().get(topic).map_or(0, Vec::len)
    }

    #[must_use]
    pub fn has_listeners(&self, topic: &str) -> bool {
        self.listener_count(topic) > 0
    }

    /// Topics with at least one listener, sorted.
    #[must_use]
    pub fn topics(&self) -> Vec<String> {
        let mut topics: Vec<String> = self.inner.topics.lock().keys().cloned().collect();
        topics.sort_unstable();
        topics
    }

    /// Remove every listener on `topic`; returns how many were removed.
    pub fn clear(&self, topic: &str) -> usize {
        let removed = self.inner.topics.lock().remove(topic);
        removed.map_or(0, |entries| entries.len())
    }

    /// Remove every listener on every topic.
    pub fn clear_all(&self) {
        let removed = core::mem::take(&mut *self.inner.topics.lock());
        drop(removed);
    }
}

fn validate_topic(topic: &str) -> Result<()> {
    if topic.is_empty() {
        return Err(CadenceError::invalid_configuration("event topic must not be empty"));
    }
    Ok(())
}

impl<P: ?Sized + 'static> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ?Sized + 'static> Clone for EventBus<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: ?Sized + 'static> fmt::Debug for EventBus<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("id", &self.inner.bus_id)
            .field("topics", &self.inner.topics.lock().len())
            .finish()
    }
}
