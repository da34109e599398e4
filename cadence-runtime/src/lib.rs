// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime abstraction for Cadence.
//!
//! Gates never call a concrete executor directly. They go through [`runtime::Runtime`],
//! which bundles the lock, timer and spawn primitives of one async runtime.

pub mod impls;
pub mod lock;
pub mod runtime;
pub mod timer;

#[cfg(feature = "runtime-tokio")]
pub use impls::tokio::{TokioRuntime, TokioTimer};

/// Runtime selected by the enabled feature set.
#[cfg(feature = "runtime-tokio")]
pub type DefaultRuntime = TokioRuntime;
