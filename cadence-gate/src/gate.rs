// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::action::{Action, ActionOutcome};
use crate::config::{validate_window, GateConfig, GateMode};
use cadence_core::TimerTask;
use cadence_error::{panic_message, CadenceError, Result};
use cadence_runtime::lock::SharedLock;
use cadence_runtime::runtime::Runtime;
use cadence_runtime::DefaultRuntime;
use core::fmt;
use core::marker::PhantomData;
use core::time::Duration;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Weak};

/// Receives failures of actions fired from a timer task.
pub type FailureHandler = Arc<dyn Fn(CadenceError) + Send + Sync>;

/// What a single [`TimerGate::invoke`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// Debounce: the call's arguments replaced any pending ones and the timer was re-armed.
    Scheduled,
    /// Throttle: the action ran inside this call and a cooldown opened.
    Fired,
    /// Throttle: the gate was cooling down and the call was discarded.
    Dropped,
}

struct GateState<A> {
    // Bumped whenever a timer is armed or disarmed; a timer only acts if its
    // generation is still current.
    generation: u64,
    pending_args: Option<A>,
    timer: Option<TimerTask>,
}

struct Shared<A: Send, R: Runtime> {
    mode: GateMode,
    window: Duration,
    action: R::Lock<Box<dyn Action<A>>>,
    state: R::Lock<GateState<A>>,
    on_failure: FailureHandler,
}

impl<A, R> Shared<A, R>
where
    A: Send + 'static,
    R: Runtime,
{
    fn invoke(self: &Arc<Self>, args: A) -> Result<Invocation> {
        if !R::has_context() {
            return Err(CadenceError::invalid_configuration(format!(
                "{} gate invoked outside of its async runtime",
                self.mode
            )));
        }

        match self.mode {
            GateMode::Debounce => {
                self.arm_debounce(args);
                Ok(Invocation::Scheduled)
            }
            GateMode::Throttle => self.throttle(args),
        }
    }

    fn arm_debounce(self: &Arc<Self>, args: A) {
        let mut state = self.state.lock();
        if let Some(previous) = state.timer.take() {
            previous.cancel();
        }
        state.generation += 1;
        state.pending_args = Some(args);

        let generation = state.generation;
        let weak = Arc::downgrade(self);
        state.timer = Some(TimerTask::after::<R, _>(self.window, move || {
            if let Some(shared) = weak.upgrade() {
                shared.fire_pending(generation);
            }
        }));
        trace!("debounce armed (generation {generation}, window {:?})", self.window);
    }

    fn fire_pending(&self, generation: u64) {
        let (args, timer) = {
            let mut state = self.state.lock();
            if state.generation != generation {
                return;
            }
            (state.pending_args.take(), state.timer.take())
        };
        drop(timer);

        if let Some(args) = args {
            trace!("debounce firing (generation {generation})");
            let outcome = catch_unwind(AssertUnwindSafe(|| self.run_action(args)))
                .unwrap_or_else(|panic| {
                    Err(CadenceError::action_failure(format!(
                        "action panicked: {}",
                        panic_message(panic.as_ref())
                    )))
                });
            if let Err(err) = outcome {
                (self.on_failure)(err);
            }
        }
    }

    fn throttle(self: &Arc<Self>, args: A) -> Result<Invocation> {
        {
            let mut state = self.state.lock();
            if state.timer.is_some() {
                trace!("throttle dropped call during cooldown");
                return Ok(Invocation::Dropped);
            }
            state.generation += 1;

            let generation = state.generation;
            let weak = Arc::downgrade(self);
            state.timer = Some(TimerTask::after::<R, _>(self.window, move || {
                if let Some(shared) = weak.upgrade() {
                    shared.end_cooldown(generation);
                }
            }));
        }

        // The cooldown is open before the action runs, so a re-entrant call
        // from inside the action is dropped rather than fired recursively.
        trace!("throttle firing, cooldown {:?}", self.window);
        self.run_action(args).map(|()| Invocation::Fired)
    }

    fn end_cooldown(&self, generation: u64) {
        let timer = {
            let mut state = self.state.lock();
            if state.generation != generation {
                return;
            }
            state.timer.take()
        };
        drop(timer);
        trace!("throttle cooldown ended (generation {generation})");
    }

    fn run_action(&self, args: A) -> Result<()> {
        self.action
            .lock()
            .call(args)
            .map_err(CadenceError::ActionFailure)
    }

    fn cancel(&self) -> bool {
        let (timer, had_args) = {
            let mut state = self.state.lock();
            state.generation += 1;
            (state.timer.take(), state.pending_args.take().is_some())
        };

        match timer {
            Some(timer) => {
                timer.cancel();
                trace!("{} gate cancelled", self.mode);
                true
            }
            None => had_args,
        }
    }

    fn flush(&self) -> Result<bool> {
        if self.mode == GateMode::Throttle {
            return Ok(false);
        }

        let (args, timer) = {
            let mut state = self.state.lock();
            state.generation += 1;
            (state.pending_args.take(), state.timer.take())
        };
        drop(timer);

        match args {
            Some(args) => {
                trace!("debounce flushed");
                self.run_action(args).map(|()| true)
            }
            None => Ok(false),
        }
    }

    fn is_pending(&self) -> bool {
        self.state.with(|state| match self.mode {
            GateMode::Debounce => state.pending_args.is_some(),
            GateMode::Throttle => state.timer.is_some(),
        })
    }
}

/// Wraps an action with debounce or throttle semantics.
///
/// A gate owns at most one live timer. Dropping the gate cancels it, so an
/// action is never fired on behalf of an owner that no longer exists.
///
/// # Example
///
/// ```rust
/// use cadence_gate::{Invocation, TimerGate};
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() -> cadence_error::Result<()> {
/// let search = TimerGate::debounce(
///     |query: String| println!("searching for {query}"),
///     Duration::from_millis(300),
/// )?;
///
/// assert_eq!(search.invoke("ru".to_string())?, Invocation::Scheduled);
/// assert_eq!(search.invoke("rust".to_string())?, Invocation::Scheduled);
/// // Only "rust" is searched, 300ms after the last keystroke.
/// # Ok(())
/// # }
/// ```
pub struct TimerGate<A: Send, R: Runtime = DefaultRuntime> {
    shared: Arc<Shared<A, R>>,
}

impl<A> TimerGate<A, DefaultRuntime>
where
    A: Send + 'static,
{
    /// Wrap `action` on the default runtime.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if `window` is zero.
    pub fn wrap<F, O>(action: F, window: Duration, mode: GateMode) -> Result<Self>
    where
        F: FnMut(A) -> O + Send + 'static,
        O: ActionOutcome,
    {
        GateBuilder::new(action, window, mode).build()
    }

    /// Trailing-edge debounce of `action`.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if `window` is zero.
    pub fn debounce<F, O>(action: F, window: Duration) -> Result<Self>
    where
        F: FnMut(A) -> O + Send + 'static,
        O: ActionOutcome,
    {
        Self::wrap(action, window, GateMode::Debounce)
    }

    /// Leading-edge throttle of `action`.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if `window` is zero.
    pub fn throttle<F, O>(action: F, window: Duration) -> Result<Self>
    where
        F: FnMut(A) -> O + Send + 'static,
        O: ActionOutcome,
    {
        Self::wrap(action, window, GateMode::Throttle)
    }

    /// Wrap `action` as described by `config`.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if `config.window_ms <= 0`.
    pub fn from_config<F, O>(action: F, config: &GateConfig) -> Result<Self>
    where
        F: FnMut(A) -> O + Send + 'static,
        O: ActionOutcome,
    {
        Self::wrap(action, config.window()?, config.mode)
    }

    /// Start building a gate with non-default options.
    pub fn builder<F, O>(action: F, window: Duration, mode: GateMode) -> GateBuilder<A, DefaultRuntime>
    where
        F: FnMut(A) -> O + Send + 'static,
        O: ActionOutcome,
    {
        GateBuilder::new(action, window, mode)
    }
}

impl<A, R> TimerGate<A, R>
where
    A: Send + 'static,
    R: Runtime,
{
    /// Call the gate.
    ///
    /// Debounce gates store `args` and (re)arm their timer. Throttle gates
    /// either run the action now or drop the call.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if called outside the gate's runtime,
    /// which is needed to arm the timer; the call has no effect then.
    /// Returns `ActionFailure` if a throttled action fired and failed. The
    /// cooldown is open regardless.
    pub fn invoke(&self, args: A) -> Result<Invocation> {
        self.shared.invoke(args)
    }

    /// Disarm the gate. Idempotent and safe after the timer fired.
    ///
    /// A pending debounced call is discarded without firing; a throttle
    /// cooldown ends early. Returns whether anything was disarmed.
    pub fn cancel(&self) -> bool {
        self.shared.cancel()
    }

    /// Fire a pending debounced call right now, on the calling context.
    ///
    /// Returns `Ok(false)` when nothing was pending and always for throttle
    /// gates. Must not be called from inside the wrapped action.
    ///
    /// # Errors
    /// Returns `ActionFailure` if the flushed action failed.
    pub fn flush(&self) -> Result<bool> {
        self.shared.flush()
    }

    /// Whether a debounced call is waiting or a throttle cooldown is open.
    pub fn is_pending(&self) -> bool {
        self.shared.is_pending()
    }

    pub fn mode(&self) -> GateMode {
        self.shared.mode
    }

    pub fn window(&self) -> Duration {
        self.shared.window
    }

    /// A detached handle that can cancel this gate from elsewhere.
    ///
    /// The handle does not keep the gate alive.
    pub fn cancel_handle(&self) -> CancelHandle<A, R> {
        CancelHandle {
            shared: Arc::downgrade(&self.shared),
        }
    }
}

impl<A: Send, R: Runtime> Drop for TimerGate<A, R> {
    fn drop(&mut self) {
        let timer = {
            let mut state = self.shared.state.lock();
            state.generation += 1;
            state.pending_args = None;
            state.timer.take()
        };
        drop(timer);
    }
}

impl<A, R> fmt::Debug for TimerGate<A, R>
where
    A: Send + 'static,
    R: Runtime,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerGate")
            .field("mode", &self.shared.mode)
            .field("window", &self.shared.window)
            .field("pending", &self.is_pending())
            .finish()
    }
}

/// Cloneable disposer for a [`TimerGate`].
///
/// Intended for owners that tear down separately from where the gate lives.
/// Once the gate is dropped every call is a no-op.
pub struct CancelHandle<A: Send, R: Runtime = DefaultRuntime> {
    shared: Weak<Shared<A, R>>,
}

impl<A, R> CancelHandle<A, R>
where
    A: Send + 'static,
    R: Runtime,
{
    /// Same as [`TimerGate::cancel`]; returns `false` once the gate is gone.
    pub fn cancel(&self) -> bool {
        self.shared.upgrade().is_some_and(|shared| shared.cancel())
    }

    /// Whether the gate this handle belongs to still exists.
    pub fn is_alive(&self) -> bool {
        self.shared.strong_count() > 0
    }
}

impl<A: Send, R: Runtime> Clone for CancelHandle<A, R> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<A: Send, R: Runtime> fmt::Debug for CancelHandle<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelHandle")
            .field("alive", &(self.shared.strong_count() > 0))
            .finish()
    }
}

/// Builder for gates with a custom failure handler or runtime.
pub struct GateBuilder<A, R: Runtime = DefaultRuntime> {
    action: Box<dyn Action<A>>,
    window: Duration,
    mode: GateMode,
    on_failure: Option<FailureHandler>,
    _runtime: PhantomData<fn() -> R>,
}

impl<A, R> GateBuilder<A, R>
where
    A: Send + 'static,
    R: Runtime,
{
    pub fn new<F, O>(action: F, window: Duration, mode: GateMode) -> Self
    where
        F: FnMut(A) -> O + Send + 'static,
        O: ActionOutcome,
    {
        Self {
            action: Box::new(action),
            window,
            mode,
            on_failure: None,
            _runtime: PhantomData,
        }
    }

    /// Receive failures of actions fired by the gate's timer.
    ///
    /// Without a handler they are logged at `error` level.
    #[must_use]
    pub fn on_failure<H>(mut self, handler: H) -> Self
    where
        H: Fn(CadenceError) + Send + Sync + 'static,
    {
        self.on_failure = Some(Arc::new(handler));
        self
    }

    /// # Errors
    /// Returns `InvalidConfiguration` if the window is zero.
    pub fn build(self) -> Result<TimerGate<A, R>> {
        let window = validate_window(self.window, self.mode)?;
        let mode = self.mode;
        let on_failure: FailureHandler = match self.on_failure {
            Some(handler) => handler,
            None => Arc::new(move |err: CadenceError| error!("{mode} action failed: {err}")),
        };

        Ok(TimerGate {
            shared: Arc::new(Shared {
                mode,
                window,
                action: <R::Lock<Box<dyn Action<A>>> as SharedLock<_>>::new(self.action),
                state: <R::Lock<GateState<A>> as SharedLock<_>>::new(GateState {
                    generation: 0,
                    pending_args: None,
                    timer: None,
                }),
                on_failure,
            }),
        })
    }
}
