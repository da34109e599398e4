// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A synchronous, in-process event bus.
//!
//! [`EventBus`] maps topic strings to ordered lists of listeners. Emitting a
//! topic calls each listener in registration order before `emit` returns.
//!
//! # Isolation
//!
//! A listener that returns an error or panics does not stop the fan-out. All
//! failures of one emission are reported together as
//! `CadenceError::ListenerFailures` once every listener has run.
//!
//! # Re-entrancy
//!
//! The registry lock is never held while a listener runs, so listeners may
//! subscribe, unsubscribe or emit on the same bus. `emit` works on a snapshot:
//! changes made during an emission apply from the next one.
//!
//! # Example
//!
//! ```rust
//! use cadence_bus::EventBus;
//! use std::sync::{Arc, Mutex};
//!
//! # fn main() -> cadence_error::Result<()> {
//! let bus: EventBus<String> = EventBus::new();
//! let greeted = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = greeted.clone();
//! let welcome = bus.subscribe("userLogin", move |user: &String| {
//!     sink.lock().unwrap().push(format!("Welcome, {user}"));
//! })?;
//!
//! assert_eq!(bus.emit("userLogin", &"Alice".to_string())?, 1);
//! bus.unsubscribe("userLogin", welcome)?;
//! assert_eq!(bus.emit("userLogin", &"Bob".to_string())?, 0);
//!
//! assert_eq!(*greeted.lock().unwrap(), vec!["Welcome, Alice".to_string()]);
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod logging;
mod bus;
mod listener;
mod subscription;

pub use bus::EventBus;
pub use listener::{Listener, ListenerOutcome, ListenerPanic};
pub use subscription::{Subscription, SubscriptionHandle, SubscriptionId};
