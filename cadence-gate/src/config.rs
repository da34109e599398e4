// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Serializable gate configuration.

use cadence_error::{CadenceError, Result};
use core::fmt;
use core::time::Duration;
use serde::{Deserialize, Serialize};

/// How a gate treats a burst of calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateMode {
    /// Fire once, after a quiet period, with the last call's arguments.
    Debounce,
    /// Fire on the leading edge, then drop calls until the window closes.
    Throttle,
}

impl fmt::Display for GateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debounce => write!(f, "debounce"),
            Self::Throttle => write!(f, "throttle"),
        }
    }
}

/// Gate settings as they appear in an application's config file.
///
/// `window_ms` is signed so that a negative value in the source document is
/// reported as a configuration error rather than a parse failure.
///
/// ```
/// use cadence_gate::{GateConfig, GateMode};
///
/// let config: GateConfig = serde_json::from_str(r#"{ "window_ms": 300, "mode": "debounce" }"#).unwrap();
/// assert_eq!(config.mode, GateMode::Debounce);
/// assert_eq!(config.window().unwrap().as_millis(), 300);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Delay (debounce) or cooldown (throttle) length in milliseconds
    pub window_ms: i64,
    /// Gate behaviour
    pub mode: GateMode,
}

impl GateConfig {
    pub fn new(window_ms: i64, mode: GateMode) -> Self {
        Self { window_ms, mode }
    }

    pub fn debounce(window_ms: i64) -> Self {
        Self::new(window_ms, GateMode::Debounce)
    }

    pub fn throttle(window_ms: i64) -> Self {
        Self::new(window_ms, GateMode::Throttle)
    }

    /// Checked window length.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if `window_ms <= 0`.
    pub fn window(&self) -> Result<Duration> {
        match u64::try_from(self.window_ms) {
            Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
            _ => Err(CadenceError::invalid_configuration(format!(
                "{} window must be positive, got {}ms",
                self.mode, self.window_ms
            ))),
        }
    }
}

/// Reject a zero-length window.
pub(crate) fn validate_window(window: Duration, mode: GateMode) -> Result<Duration> {
    if window.is_zero() {
        return Err(CadenceError::invalid_configuration(format!(
            "{mode} window must be positive, got {window:?}"
        )));
    }
    Ok(window)
}
