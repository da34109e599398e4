// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cadence_gate::{GateMode, Invocation, TimerGate};
use cadence_test_utils::{advance_and_settle, CallRecorder};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_throttle_fires_leading_call_and_drops_burst() -> anyhow::Result<()> {
    // Arrange
    let recorder = CallRecorder::new();
    let gate = TimerGate::throttle(recorder.action(), Duration::from_millis(100))?;

    // Act
    let outcomes = (1..=5)
        .map(|offset| gate.invoke(offset))
        .collect::<Result<Vec<_>, _>>()?;

    // Assert
    assert_eq!(
        outcomes,
        vec![
            Invocation::Fired,
            Invocation::Dropped,
            Invocation::Dropped,
            Invocation::Dropped,
            Invocation::Dropped,
        ]
    );
    assert_eq!(recorder.calls(), vec![1]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_throttle_fires_again_after_cooldown() -> anyhow::Result<()> {
    // Arrange
    let recorder = CallRecorder::new();
    let gate = TimerGate::throttle(recorder.action(), Duration::from_millis(100))?;
    for offset in 0..5 {
        gate.invoke(offset)?;
    }

    // Act
    advance_and_settle(150).await;
    let outcome = gate.invoke(150)?;

    // Assert
    assert_eq!(outcome, Invocation::Fired);
    assert_eq!(recorder.calls(), vec![0, 150]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_throttle_dropped_calls_are_not_replayed() -> anyhow::Result<()> {
    // Arrange
    let recorder = CallRecorder::new();
    let gate = TimerGate::throttle(recorder.action(), Duration::from_millis(100))?;

    // Act
    gate.invoke("leading")?;
    advance_and_settle(50).await;
    assert_eq!(gate.invoke("trailing")?, Invocation::Dropped);
    advance_and_settle(500).await;

    // Assert
    assert_eq!(recorder.calls(), vec!["leading"]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_throttle_cooldown_ends_exactly_at_window() -> anyhow::Result<()> {
    // Arrange
    let recorder = CallRecorder::new();
    let gate = TimerGate::throttle(recorder.action(), Duration::from_millis(100))?;
    gate.invoke(0)?;

    // Act & Assert
    advance_and_settle(99).await;
    assert!(gate.is_pending());
    assert_eq!(gate.invoke(99)?, Invocation::Dropped);

    advance_and_settle(1).await;
    assert!(!gate.is_pending());
    assert_eq!(gate.invoke(100)?, Invocation::Fired);

    assert_eq!(recorder.calls(), vec![0, 100]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_throttle_cancel_ends_cooldown_early() -> anyhow::Result<()> {
    // Arrange
    let recorder = CallRecorder::new();
    let gate = TimerGate::throttle(recorder.action(), Duration::from_millis(1_000))?;
    gate.invoke(1)?;

    // Act
    assert!(gate.cancel());

    // Assert
    assert_eq!(gate.invoke(2)?, Invocation::Fired);
    assert_eq!(recorder.calls(), vec![1, 2]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_throttle_flush_is_noop() -> anyhow::Result<()> {
    let recorder = CallRecorder::new();
    let gate = TimerGate::throttle(recorder.action(), Duration::from_millis(100))?;
    gate.invoke(1)?;

    assert!(!gate.flush()?);
    assert_eq!(recorder.calls(), vec![1]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_throttle_accessors_report_configuration() -> anyhow::Result<()> {
    let recorder = CallRecorder::<u8>::new();
    let gate = TimerGate::wrap(recorder.action(), Duration::from_millis(200), GateMode::Throttle)?;

    assert_eq!(gate.mode(), GateMode::Throttle);
    assert_eq!(gate.window(), Duration::from_millis(200));
    assert!(format!("{gate:?}").contains("Throttle"));
    Ok(())
}
