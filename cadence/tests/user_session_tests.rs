// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cadence::prelude::*;
use cadence_test_utils::test_data::{user_alice, user_bob, USER_LOGIN, USER_LOGOUT};
use cadence_test_utils::{advance_and_settle, CallRecorder};
use std::time::Duration;

/// Header and sidebar both react to session events without knowing the
/// component that raised them.
struct Session {
    bus: EventBus<String>,
    header: CallRecorder<String>,
    sidebar: CallRecorder<String>,
    _subscriptions: Vec<Subscription<String>>,
}

impl Session {
    fn mount() -> anyhow::Result<Self> {
        let bus = EventBus::new();
        let header = CallRecorder::new();
        let sidebar = CallRecorder::new();

        let welcome = header.clone();
        let goodbye = header.clone();
        let activity = sidebar.clone();
        let subscriptions = vec![
            bus.subscribe_scoped(USER_LOGIN, move |user: &String| {
                welcome.record(format!("Welcome, {user}"));
            })?,
            bus.subscribe_scoped(USER_LOGOUT, move |_: &String| {
                goodbye.record("Signed out".to_string());
            })?,
            bus.subscribe_scoped(USER_LOGIN, move |user: &String| {
                activity.record(format!("{user} logged in"));
            })?,
        ];

        Ok(Self {
            bus,
            header,
            sidebar,
            _subscriptions: subscriptions,
        })
    }
}

#[test]
fn test_login_reaches_every_component_in_order() -> anyhow::Result<()> {
    // Arrange
    let session = Session::mount()?;

    // Act
    session.bus.emit(USER_LOGIN, &user_alice())?;
    session.bus.emit(USER_LOGOUT, &user_alice())?;

    // Assert
    assert_eq!(
        session.header.calls(),
        vec!["Welcome, Alice".to_string(), "Signed out".to_string()]
    );
    assert_eq!(session.sidebar.calls(), vec!["Alice logged in".to_string()]);
    Ok(())
}

#[test]
fn test_unmounted_components_stop_listening() -> anyhow::Result<()> {
    // Arrange
    let Session {
        bus,
        header,
        sidebar,
        _subscriptions,
    } = Session::mount()?;

    // Act
    drop(_subscriptions);
    let invoked = bus.emit(USER_LOGIN, &user_bob())?;

    // Assert
    assert_eq!(invoked, 0);
    assert!(header.is_empty());
    assert!(sidebar.is_empty());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_debounced_search_publishes_last_query_on_bus() -> anyhow::Result<()> {
    // Arrange
    let bus = EventBus::<String>::new();
    let results = CallRecorder::new();
    bus.subscribe("searchResults", results.listener())?;

    let publisher = bus.clone();
    let search = TimerGate::debounce(
        move |query: String| {
            publisher
                .emit("searchResults", &format!("results for {query}"))
                .map(|_| ())
        },
        Duration::from_millis(300),
    )?;

    // Act
    for prefix in ["r", "ru", "rus", "rust"] {
        search.invoke(prefix.to_string())?;
        advance_and_settle(100).await;
    }
    advance_and_settle(300).await;

    // Assert
    assert_eq!(results.calls(), vec!["results for rust".to_string()]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_logout_cancels_pending_autosave() -> anyhow::Result<()> {
    // Arrange
    let bus = EventBus::<String>::new();
    let saved = CallRecorder::new();
    let autosave = TimerGate::debounce(saved.action(), Duration::from_millis(500))?;
    let handle = autosave.cancel_handle();
    bus.subscribe(USER_LOGOUT, move |_: &String| {
        handle.cancel();
    })?;

    // Act
    autosave.invoke("draft".to_string())?;
    advance_and_settle(200).await;
    bus.emit(USER_LOGOUT, &user_alice())?;
    advance_and_settle(500).await;

    // Assert
    assert!(saved.is_empty());
    assert!(!autosave.is_pending());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_throttled_scroll_emits_at_most_once_per_window() -> anyhow::Result<()> {
    // Arrange
    let bus = EventBus::<u32>::new();
    let positions = CallRecorder::new();
    bus.subscribe("scroll", positions.listener())?;
    let publisher = bus.clone();
    let config = GateConfig::throttle(100);
    let scroll = TimerGate::from_config(
        move |offset: u32| publisher.emit("scroll", &offset).map(|_| ()),
        &config,
    )?;

    // Act
    let mut outcomes = Vec::new();
    for offset in 0..10_u32 {
        outcomes.push(scroll.invoke(offset * 10)?);
        advance_and_settle(25).await;
    }

    // Assert
    assert_eq!(positions.calls(), vec![0, 40, 80]);
    assert_eq!(
        outcomes.iter().filter(|outcome| **outcome == Invocation::Fired).count(),
        3
    );
    Ok(())
}
