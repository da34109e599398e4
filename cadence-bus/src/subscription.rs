// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::bus::BusInner;
use core::fmt;
use std::sync::Weak;

/// Identifier of one registration, unique within its bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw value, as reported by [`ListenerFailure::subscription`](cadence_error::ListenerFailure::subscription).
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Proof of a registration, needed to remove it again.
///
/// Registering the same listener twice yields two distinct handles. A handle
/// only means something to the bus that minted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    pub(crate) bus_id: u64,
    pub(crate) id: SubscriptionId,
}

impl SubscriptionHandle {
    #[must_use]
    pub const fn id(&self) -> SubscriptionId {
        self.id
    }
}

/// Registration that is removed when dropped.
///
/// Returned by [`EventBus::subscribe_scoped`](crate::EventBus::subscribe_scoped)
/// so a listener's lifetime can be tied to the component that owns it. The
/// guard does not keep the bus alive.
#[must_use = "dropping a Subscription unsubscribes its listener immediately"]
pub struct Subscription<P: ?Sized + 'static> {
    bus: Option<Weak<BusInner<P>>>,
    topic: String,
    handle: SubscriptionHandle,
}

impl<P: ?Sized + 'static> Subscription<P> {
    pub(crate) fn new(bus: Weak<BusInner<P>>, topic: String, handle: SubscriptionHandle) -> Self {
        Self {
            bus: Some(bus),
            topic,
            handle,
        }
    }

    pub fn handle(&self) -> SubscriptionHandle {
        self.handle
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Remove the listener now. Returns whether it was still registered.
    pub fn unsubscribe(mut self) -> bool {
        self.release()
    }

    /// Keep the listener registered past the guard and hand back its handle.
    pub fn detach(mut self) -> SubscriptionHandle {
        self.bus = None;
        self.handle
    }

    fn release(&mut self) -> bool {
        self.bus
            .take()
            .and_then(|bus| bus.upgrade())
            .is_some_and(|bus| bus.remove(&self.topic, self.handle.id))
    }
}

impl<P: ?Sized + 'static> Drop for Subscription<P> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<P: ?Sized + 'static> fmt::Debug for Subscription<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("topic", &self.topic)
            .field("id", &self.handle.id)
            .field("attached", &self.bus.is_some())
            .finish()
    }
}
