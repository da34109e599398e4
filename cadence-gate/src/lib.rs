// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Debounce and throttle gates for arbitrary actions.
//!
//! A [`TimerGate`] wraps an action and decides, call by call, whether and when the
//! action runs:
//!
//! - **Debounce** (trailing edge): every call replaces the pending arguments and
//!   re-arms the timer. The action runs once, `window` after the last call.
//! - **Throttle** (leading edge): the first call runs the action immediately and
//!   opens a cooldown of length `window`. Calls during the cooldown are dropped.
//!
//! Every gate can be cancelled through [`TimerGate::cancel`] or a detached
//! [`CancelHandle`], and cancels itself on drop.
//!
//! # Failures
//!
//! A throttled action runs inside `invoke`, so its failure comes back from
//! `invoke` as `ActionFailure`. A debounced action runs on the gate's timer
//! task; its failure goes to the handler registered with
//! [`GateBuilder::on_failure`], or is logged when no handler is set. In both
//! cases the gate keeps accepting calls.
//!
//! # Example
//!
//! ```rust
//! use cadence_gate::{GateMode, Invocation, TimerGate};
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> cadence_error::Result<()> {
//! let scroll = TimerGate::wrap(
//!     |offset: u32| println!("scrolled to {offset}"),
//!     Duration::from_millis(200),
//!     GateMode::Throttle,
//! )?;
//!
//! assert_eq!(scroll.invoke(10)?, Invocation::Fired);
//! assert_eq!(scroll.invoke(20)?, Invocation::Dropped);
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod logging;
mod action;
mod config;
mod gate;

pub use action::{Action, ActionOutcome};
pub use config::{GateConfig, GateMode};
pub use gate::{CancelHandle, FailureHandler, GateBuilder, Invocation, TimerGate};
