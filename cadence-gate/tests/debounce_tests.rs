// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cadence_gate::{GateMode, Invocation, TimerGate};
use cadence_test_utils::{advance_and_settle, settle, CallRecorder};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_debounce_fires_once_with_last_arguments() -> anyhow::Result<()> {
    // Arrange
    let recorder = CallRecorder::new();
    let gate = TimerGate::debounce(recorder.action(), Duration::from_millis(100))?;

    // Act
    assert_eq!(gate.invoke("r")?, Invocation::Scheduled);
    advance_and_settle(30).await;
    assert_eq!(gate.invoke("ru")?, Invocation::Scheduled);
    advance_and_settle(30).await;
    assert_eq!(gate.invoke("rust")?, Invocation::Scheduled);

    // Assert
    advance_and_settle(99).await;
    assert!(recorder.is_empty());

    advance_and_settle(1).await;
    assert_eq!(recorder.calls(), vec!["rust"]);

    advance_and_settle(1_000).await;
    assert_eq!(recorder.count(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_debounce_single_call_fires_after_window() -> anyhow::Result<()> {
    // Arrange
    let recorder = CallRecorder::new();
    let gate = TimerGate::debounce(recorder.action(), Duration::from_millis(250))?;

    // Act
    gate.invoke(7_u32)?;
    advance_and_settle(251).await;

    // Assert
    assert_eq!(recorder.calls(), vec![7]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_debounce_burst_of_n_calls_fires_once_with_nth() -> anyhow::Result<()> {
    for window_ms in [1_u64, 50, 250] {
        for n in 1..=5_usize {
            // Arrange
            let recorder = CallRecorder::new();
            let gate = TimerGate::debounce(recorder.action(), Duration::from_millis(window_ms))?;

            // Act
            for call in 0..n {
                gate.invoke(call)?;
            }
            advance_and_settle(window_ms + 1).await;

            // Assert
            assert_eq!(recorder.calls(), vec![n - 1], "window {window_ms}ms, {n} calls");
        }
    }
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_debounce_rearms_after_firing() -> anyhow::Result<()> {
    // Arrange
    let recorder = CallRecorder::new();
    let gate = TimerGate::debounce(recorder.action(), Duration::from_millis(100))?;

    // Act & Assert
    gate.invoke(1)?;
    advance_and_settle(100).await;
    assert_eq!(recorder.calls(), vec![1]);

    gate.invoke(2)?;
    advance_and_settle(50).await;
    assert_eq!(recorder.calls(), vec![1]);

    advance_and_settle(50).await;
    assert_eq!(recorder.calls(), vec![1, 2]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_debounce_is_pending_tracks_armed_timer() -> anyhow::Result<()> {
    // Arrange
    let recorder = CallRecorder::new();
    let gate = TimerGate::debounce(recorder.action(), Duration::from_millis(100))?;
    assert!(!gate.is_pending());

    // Act & Assert
    gate.invoke(1)?;
    assert!(gate.is_pending());

    advance_and_settle(100).await;
    assert!(!gate.is_pending());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_debounce_flush_fires_pending_call_immediately() -> anyhow::Result<()> {
    // Arrange
    let recorder = CallRecorder::new();
    let gate = TimerGate::debounce(recorder.action(), Duration::from_millis(100))?;
    gate.invoke("draft")?;

    // Act
    let flushed = gate.flush()?;

    // Assert
    assert!(flushed);
    assert_eq!(recorder.calls(), vec!["draft"]);
    assert!(!gate.is_pending());

    advance_and_settle(200).await;
    assert_eq!(recorder.count(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_debounce_flush_without_pending_call_is_noop() -> anyhow::Result<()> {
    let recorder = CallRecorder::<u8>::new();
    let gate = TimerGate::debounce(recorder.action(), Duration::from_millis(100))?;

    assert!(!gate.flush()?);
    assert!(recorder.is_empty());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_dropping_gate_discards_pending_call() -> anyhow::Result<()> {
    // Arrange
    let recorder = CallRecorder::new();
    let gate = TimerGate::debounce(recorder.action(), Duration::from_millis(100))?;
    gate.invoke(1)?;
    settle().await;

    // Act
    drop(gate);
    advance_and_settle(500).await;

    // Assert
    assert!(recorder.is_empty());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_gates_time_independently() -> anyhow::Result<()> {
    // Arrange
    let fast = CallRecorder::new();
    let slow = CallRecorder::new();
    let fast_gate = TimerGate::debounce(fast.action(), Duration::from_millis(50))?;
    let slow_gate = TimerGate::debounce(slow.action(), Duration::from_millis(200))?;

    // Act
    fast_gate.invoke("fast")?;
    slow_gate.invoke("slow")?;
    advance_and_settle(50).await;

    // Assert
    assert_eq!(fast.calls(), vec!["fast"]);
    assert!(slow.is_empty());

    advance_and_settle(150).await;
    assert_eq!(slow.calls(), vec!["slow"]);
    Ok(())
}

#[test]
fn test_zero_window_is_rejected() {
    let recorder = CallRecorder::<u8>::new();

    let err = TimerGate::wrap(recorder.action(), Duration::ZERO, GateMode::Debounce).unwrap_err();

    assert!(err.is_configuration());
    assert!(err.to_string().contains("debounce window must be positive"));
}
