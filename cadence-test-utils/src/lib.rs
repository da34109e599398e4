// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the Cadence workspace.
//!
//! Intended for development and testing only.
//!
//! - [`CallRecorder`] captures the arguments an action or listener was called with.
//! - [`FailureLog`] captures failures delivered to a gate's failure handler.
//! - [`helpers::settle`] and [`helpers::advance_and_settle`] drive a paused Tokio
//!   clock and give spawned timer tasks the chance to run.
//! - [`test_data`] holds the shared fixtures.

pub mod helpers;
pub mod recorder;
pub mod test_data;

pub use helpers::{advance_and_settle, settle};
pub use recorder::{CallRecorder, FailureLog};
pub use test_data::TestFailure;
