// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Cadence
//!
//! Rate-limiting gates and a synchronous event bus for event-driven front ends
//! and services.
//!
//! ## Overview
//!
//! - [`TimerGate`] limits how often an action runs. Debounce collapses a burst
//!   of calls into one trailing call; throttle runs the first call and drops
//!   the rest for a cooldown window. Every gate can be cancelled.
//! - [`EventBus`] decouples producers from consumers with named topics.
//!   Listeners run synchronously, in registration order, isolated from each
//!   other's failures.
//!
//! Both share one error type, [`CadenceError`].
//!
//! ## Quick Start
//!
//! ```rust
//! use cadence::prelude::*;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> cadence::Result<()> {
//! let bus: EventBus<String> = EventBus::new();
//! let search = TimerGate::debounce(
//!     |query: String| println!("searching for {query}"),
//!     Duration::from_millis(300),
//! )?;
//!
//! let _sidebar = bus.subscribe_scoped("userLogin", |user: &String| {
//!     println!("sidebar: logged in as {user}");
//! })?;
//!
//! bus.emit("userLogin", &"Alice".to_string())?;
//! search.invoke("rust".to_string())?;
//! # Ok(())
//! # }
//! ```

pub use cadence_bus::{
    EventBus, Listener, ListenerOutcome, ListenerPanic, Subscription, SubscriptionHandle,
    SubscriptionId,
};
pub use cadence_core::CancellationToken;
pub use cadence_error::{BoxError, CadenceError, ListenerFailure, Result, ResultExt};
pub use cadence_gate::{
    Action, ActionOutcome, CancelHandle, FailureHandler, GateBuilder, GateConfig, GateMode,
    Invocation, TimerGate,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use cadence_bus::{EventBus, Subscription, SubscriptionHandle};
    pub use cadence_error::{CadenceError, ResultExt};
    pub use cadence_gate::{CancelHandle, GateConfig, GateMode, Invocation, TimerGate};
}
