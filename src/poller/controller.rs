//! Poll-session state machine for a single async task.
//!
//! ```text
//!              start_task                done, no exception
//! WaitInput ─────────────► Running ───────────────────────► Success
//!     ▲                      │  │
//!     │      reset()         │  └─ fetch failed / exception ─► Error
//!     └──────────────────────┴───────────── (from any state)
//! ```
//!
//! A poller owns at most one timer task. Every tick spawns a single status
//! fetch; fetches may overlap when the backend is slower than the interval.
//! Each `start_task` / `reset` bumps a session generation, and a fetch only
//! applies its result when its generation is still current and the session is
//! still running, so late responses after a reset, a restart or a drop are
//! discarded. The success callback is additionally guarded so it fires at most
//! once per session.

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::source::{AsyncTaskStatus, TaskStatusSource};
use crate::errors::PollError;
use crate::events::{EventBus, Subscription};

/// Default delay between status fetches.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Shortest accepted poll interval; shorter values are raised to it.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Observable state of a poll session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    /// Idle; no task has been started since creation or the last reset
    #[default]
    WaitInput,
    /// Polling is active
    Running,
    /// The task finished without an exception
    Success,
    /// The task reported an exception or a status fetch failed
    Error,
}

impl TaskState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WaitInput => "WAIT_INPUT",
            Self::Running => "RUNNING",
            Self::Success => "SUCCESS",
            Self::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Terminal result of a poll session, delivered to listeners exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Succeeded { task_id: i64 },
    Failed { task_id: i64, error: PollError },
}

struct Session {
    state: TaskState,
    error: Option<String>,
    task_id: Option<i64>,
    generation: u64,
    succeeded: bool,
    timer: Option<JoinHandle<()>>,
}

impl Session {
    fn stop_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

struct Shared {
    source: Arc<dyn TaskStatusSource>,
    interval: Duration,
    session: Mutex<Session>,
    outcomes: EventBus<PollOutcome>,
    state_tx: watch::Sender<TaskState>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Session> {
        // No code panics while holding the session lock; recover the data regardless.
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn is_current(&self, generation: u64) -> bool {
        let session = self.lock();
        session.generation == generation && session.state == TaskState::Running
    }

    /// Apply one fetch result to the session it was issued for.
    fn apply(&self, generation: u64, task_id: i64, result: Result<AsyncTaskStatus, PollError>) {
        let outcome = {
            let mut session = self.lock();
            if session.generation != generation || session.state != TaskState::Running {
                debug!(task_id, generation, "discarding stale task status");
                return;
            }

            let outcome = match result {
                Err(error) => {
                    warn!(task_id, error = %error, "task status fetch failed");
                    PollOutcome::Failed { task_id, error }
                }
                Ok(status) if !status.runtime.done => {
                    debug!(task_id, state = ?status.runtime.state, "task still running");
                    return;
                }
                Ok(status) => match status.runtime.exception_message() {
                    Some(exception) => {
                        warn!(task_id, exception, "task finished with an exception");
                        PollOutcome::Failed {
                            task_id,
                            error: PollError::Task(exception.to_string()),
                        }
                    }
                    None => {
                        if session.succeeded {
                            return;
                        }
                        session.succeeded = true;
                        info!(task_id, "task finished");
                        PollOutcome::Succeeded { task_id }
                    }
                },
            };

            session.stop_timer();
            match &outcome {
                PollOutcome::Succeeded { .. } => {
                    session.state = TaskState::Success;
                }
                PollOutcome::Failed { error, .. } => {
                    session.state = TaskState::Error;
                    session.error = Some(error.message().to_string());
                }
            }
            outcome
        };

        // A reset or restart that won the lock since the commit silences the outcome.
        if self.lock().generation != generation {
            debug!(task_id, generation, "dropping outcome of a superseded session");
            return;
        }
        // Listeners run before watchers wake, so a waiter sees their side effects.
        self.outcomes.emit(&outcome);

        let session = self.lock();
        if session.generation == generation {
            self.state_tx.send_replace(session.state);
        }
    }
}

/// Timer loop: one fetch per tick until the session changes or the poller is dropped.
async fn run_timer(shared: Weak<Shared>, task_id: i64, generation: u64, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; the first fetch happens one interval in.
    ticker.tick().await;

    loop {
        ticker.tick().await;

        let Some(shared) = shared.upgrade() else {
            return;
        };
        if !shared.is_current(generation) {
            return;
        }

        debug!(task_id, generation, "fetching task status");
        tokio::spawn(async move {
            let result = shared.source.get_async_task_status(task_id).await;
            shared.apply(generation, task_id, result);
        });
    }
}

/// Observes one server-side async task at a time until it finishes.
///
/// Dropping the poller cancels its timer; fetches still in flight complete but
/// their results are discarded.
pub struct AsyncTaskPoller {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for AsyncTaskPoller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.shared.lock();
        f.debug_struct("AsyncTaskPoller")
            .field("state", &session.state)
            .field("task_id", &session.task_id)
            .field("interval", &self.shared.interval)
            .finish()
    }
}

impl AsyncTaskPoller {
    pub fn new(source: Arc<dyn TaskStatusSource>) -> Self {
        Self::with_interval(source, DEFAULT_POLL_INTERVAL)
    }

    /// Poller fetching every `interval`, never faster than [`MIN_POLL_INTERVAL`].
    pub fn with_interval(source: Arc<dyn TaskStatusSource>, interval: Duration) -> Self {
        let (state_tx, _) = watch::channel(TaskState::WaitInput);
        Self {
            shared: Arc::new(Shared {
                source,
                interval: interval.max(MIN_POLL_INTERVAL),
                session: Mutex::new(Session {
                    state: TaskState::WaitInput,
                    error: None,
                    task_id: None,
                    generation: 0,
                    succeeded: false,
                    timer: None,
                }),
                outcomes: EventBus::new(),
                state_tx,
            }),
        }
    }

    /// Begin polling `task_id`, replacing any session already running.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start_task(&self, task_id: i64) {
        let mut session = self.shared.lock();
        session.stop_timer();
        session.generation += 1;
        session.state = TaskState::Running;
        session.error = None;
        session.succeeded = false;
        session.task_id = Some(task_id);

        let generation = session.generation;
        session.timer = Some(tokio::spawn(run_timer(
            Arc::downgrade(&self.shared),
            task_id,
            generation,
            self.shared.interval,
        )));
        self.shared.state_tx.send_replace(TaskState::Running);

        info!(task_id, interval_ms = self.shared.interval.as_millis() as u64, "polling task");
    }

    /// Stop polling and return to `WaitInput`, clearing the error and success guard.
    ///
    /// Fetches still in flight are discarded. On a multi-threaded runtime an
    /// outcome committed just before the reset may still reach listeners that
    /// were already being called when `reset` returned.
    pub fn reset(&self) {
        let mut session = self.shared.lock();
        session.stop_timer();
        session.generation += 1;
        session.state = TaskState::WaitInput;
        session.error = None;
        session.succeeded = false;
        session.task_id = None;
        self.shared.state_tx.send_replace(TaskState::WaitInput);
        debug!("poller reset");
    }

    pub fn state(&self) -> TaskState {
        self.shared.lock().state
    }

    /// Message of the last failure, if the session is in `Error`.
    pub fn error(&self) -> Option<String> {
        self.shared.lock().error.clone()
    }

    pub fn task_id(&self) -> Option<i64> {
        self.shared.lock().task_id
    }

    pub fn interval(&self) -> Duration {
        self.shared.interval
    }

    /// Listen for every terminal outcome.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&PollOutcome) + Send + Sync + 'static,
    {
        self.shared.outcomes.subscribe(listener)
    }

    /// Called once when a session finishes without an exception.
    pub fn on_success<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.subscribe(move |outcome| {
            if let PollOutcome::Succeeded { .. } = outcome {
                callback();
            }
        })
    }

    /// Called with the error message when a session fails.
    pub fn on_error<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.subscribe(move |outcome| {
            if let PollOutcome::Failed { error, .. } = outcome {
                callback(error.message());
            }
        })
    }

    /// Receiver that observes every state transition.
    pub fn watch_state(&self) -> watch::Receiver<TaskState> {
        self.shared.state_tx.subscribe()
    }

    /// Wait until the session leaves `Running` and return the state it moved to.
    ///
    /// Returns immediately when no session is running.
    pub async fn wait_for_terminal(&self) -> TaskState {
        let mut rx = self.watch_state();
        loop {
            let state = *rx.borrow_and_update();
            if state != TaskState::Running {
                return state;
            }
            if rx.changed().await.is_err() {
                return self.state();
            }
        }
    }
}

impl Drop for AsyncTaskPoller {
    fn drop(&mut self) {
        let mut session = self.shared.lock();
        session.stop_timer();
        session.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poller::source::TaskRuntime;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Semaphore;
    use tokio::time::sleep;

    /// Replays scripted responses, then repeats `fallback` forever.
    struct ScriptedSource {
        responses: Mutex<VecDeque<Result<TaskRuntime, PollError>>>,
        fallback: Result<TaskRuntime, PollError>,
        delay: Duration,
        gate: Option<Arc<Semaphore>>,
        requested: Mutex<Vec<i64>>,
    }

    impl ScriptedSource {
        fn repeating(fallback: Result<TaskRuntime, PollError>) -> Self {
            Self {
                responses: Mutex::new(VecDeque::new()),
                fallback,
                delay: Duration::ZERO,
                gate: None,
                requested: Mutex::new(Vec::new()),
            }
        }

        fn script(mut self, responses: Vec<Result<TaskRuntime, PollError>>) -> Self {
            self.responses = Mutex::new(responses.into());
            self
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        fn with_gate(mut self, gate: Arc<Semaphore>) -> Self {
            self.gate = Some(gate);
            self
        }

        fn calls(&self) -> usize {
            self.requested.lock().unwrap().len()
        }

        fn calls_for(&self, task_id: i64) -> usize {
            self.requested
                .lock()
                .unwrap()
                .iter()
                .filter(|&&id| id == task_id)
                .count()
        }
    }

    #[async_trait]
    impl TaskStatusSource for ScriptedSource {
        async fn get_async_task_status(&self, task_id: i64) -> Result<AsyncTaskStatus, PollError> {
            self.requested.lock().unwrap().push(task_id);
            let response = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| self.fallback.clone());

            if !self.delay.is_zero() {
                sleep(self.delay).await;
            }
            if let Some(gate) = &self.gate {
                gate.acquire().await.unwrap().forget();
            }

            response.map(|runtime| AsyncTaskStatus {
                id: Some(task_id),
                name: None,
                runtime,
            })
        }
    }

    struct Counters {
        successes: Arc<AtomicUsize>,
        errors: Arc<Mutex<Vec<String>>>,
        _subs: Vec<Subscription>,
    }

    fn count_callbacks(poller: &AsyncTaskPoller) -> Counters {
        let successes = Arc::new(AtomicUsize::new(0));
        let errors = Arc::new(Mutex::new(Vec::new()));
        let s = Arc::clone(&successes);
        let e = Arc::clone(&errors);
        let subs = vec![
            poller.on_success(move || {
                s.fetch_add(1, Ordering::SeqCst);
            }),
            poller.on_error(move |msg| {
                e.lock().unwrap().push(msg.to_string());
            }),
        ];
        Counters {
            successes,
            errors,
            _subs: subs,
        }
    }

    impl Counters {
        fn successes(&self) -> usize {
            self.successes.load(Ordering::SeqCst)
        }

        fn errors(&self) -> Vec<String> {
            self.errors.lock().unwrap().clone()
        }
    }

    #[test]
    fn test_initial_state_is_wait_input() {
        let source = Arc::new(ScriptedSource::repeating(Ok(TaskRuntime::pending())));
        let poller = AsyncTaskPoller::new(source);
        assert_eq!(poller.state(), TaskState::WaitInput);
        assert_eq!(poller.error(), None);
        assert_eq!(poller.task_id(), None);
        assert_eq!(poller.interval(), DEFAULT_POLL_INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_responses_keep_running() {
        let source = Arc::new(ScriptedSource::repeating(Ok(TaskRuntime::pending())));
        let poller = AsyncTaskPoller::new(source.clone());
        let counters = count_callbacks(&poller);

        poller.start_task(7);
        sleep(Duration::from_millis(5500)).await;

        assert_eq!(poller.state(), TaskState::Running);
        assert_eq!(poller.task_id(), Some(7));
        assert!(source.calls() >= 4, "expected repeated polling, got {}", source.calls());
        assert_eq!(counters.successes(), 0);
        assert!(counters.errors().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_fetch_waits_one_interval() {
        let source = Arc::new(ScriptedSource::repeating(Ok(TaskRuntime::pending())));
        let poller = AsyncTaskPoller::new(source.clone());

        poller.start_task(1);
        sleep(Duration::from_millis(500)).await;
        assert_eq!(source.calls(), 0);

        sleep(Duration::from_millis(1000)).await;
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_fires_once_with_overlapping_done_responses() {
        // Each fetch takes 2.5 intervals, so several fetches are in flight
        // when the first one reports done.
        let source = Arc::new(
            ScriptedSource::repeating(Ok(TaskRuntime::succeeded()))
                .with_delay(Duration::from_millis(2500)),
        );
        let poller = AsyncTaskPoller::new(source.clone());
        let counters = count_callbacks(&poller);

        poller.start_task(3);
        assert_eq!(poller.wait_for_terminal().await, TaskState::Success);
        sleep(Duration::from_secs(10)).await;

        assert!(source.calls() >= 2, "fetches should overlap, got {}", source.calls());
        assert_eq!(poller.state(), TaskState::Success);
        assert_eq!(counters.successes(), 1);
        assert!(counters.errors().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_exception_transitions_to_error() {
        let source = Arc::new(
            ScriptedSource::repeating(Ok(TaskRuntime::pending()))
                .script(vec![Ok(TaskRuntime::pending()), Ok(TaskRuntime::failed("boom"))]),
        );
        let poller = AsyncTaskPoller::new(source.clone());
        let counters = count_callbacks(&poller);

        poller.start_task(9);
        assert_eq!(poller.wait_for_terminal().await, TaskState::Error);

        assert_eq!(poller.error().as_deref(), Some("boom"));
        assert_eq!(counters.errors(), vec!["boom".to_string()]);
        assert_eq!(counters.successes(), 0);

        // Polling stopped with the terminal response.
        sleep(Duration::from_secs(5)).await;
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_failure_is_terminal() {
        let source = Arc::new(ScriptedSource::repeating(Err(PollError::transport(
            "connection reset",
        ))));
        let poller = AsyncTaskPoller::new(source.clone());
        let counters = count_callbacks(&poller);

        poller.start_task(2);
        assert_eq!(poller.wait_for_terminal().await, TaskState::Error);
        sleep(Duration::from_secs(5)).await;

        assert_eq!(poller.error().as_deref(), Some("connection reset"));
        assert_eq!(counters.errors(), vec!["connection reset".to_string()]);
        assert_eq!(source.calls(), 1, "no retry after a transport failure");
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_failure_without_message_uses_fallback() {
        let source = Arc::new(ScriptedSource::repeating(Err(PollError::transport(""))));
        let poller = AsyncTaskPoller::new(source);

        poller.start_task(2);
        poller.wait_for_terminal().await;

        assert_eq!(poller.error().as_deref(), Some("Unknown error"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_discards_in_flight_fetch() {
        let gate = Arc::new(Semaphore::new(0));
        let source = Arc::new(
            ScriptedSource::repeating(Ok(TaskRuntime::succeeded())).with_gate(Arc::clone(&gate)),
        );
        let poller = AsyncTaskPoller::new(source.clone());
        let counters = count_callbacks(&poller);

        poller.start_task(5);
        sleep(Duration::from_millis(1500)).await;
        assert_eq!(source.calls(), 1, "one fetch should be in flight");

        poller.reset();
        gate.add_permits(16);
        sleep(Duration::from_secs(5)).await;

        assert_eq!(poller.state(), TaskState::WaitInput);
        assert_eq!(poller.task_id(), None);
        assert_eq!(counters.successes(), 0);
        assert!(counters.errors().is_empty());
        assert_eq!(source.calls(), 1, "timer must stop on reset");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_clears_error_and_allows_restart() {
        let source = Arc::new(
            ScriptedSource::repeating(Ok(TaskRuntime::succeeded()))
                .script(vec![Ok(TaskRuntime::failed("first run failed"))]),
        );
        let poller = AsyncTaskPoller::new(source);
        let counters = count_callbacks(&poller);

        poller.start_task(1);
        assert_eq!(poller.wait_for_terminal().await, TaskState::Error);
        assert!(poller.error().is_some());

        poller.reset();
        assert_eq!(poller.state(), TaskState::WaitInput);
        assert_eq!(poller.error(), None);

        poller.start_task(1);
        assert_eq!(poller.wait_for_terminal().await, TaskState::Success);
        assert_eq!(counters.successes(), 1);
        assert_eq!(counters.errors().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_running_timer() {
        let source = Arc::new(ScriptedSource::repeating(Ok(TaskRuntime::pending())));
        let poller = AsyncTaskPoller::with_interval(source.clone(), Duration::from_millis(1000));

        poller.start_task(1);
        sleep(Duration::from_millis(1500)).await;
        poller.start_task(2);
        sleep(Duration::from_millis(3200)).await;

        assert_eq!(source.calls_for(1), 1, "old timer must not keep polling");
        assert!(source.calls_for(2) >= 2);
        assert_eq!(poller.task_id(), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_ignores_late_result_from_previous_session() {
        let gate = Arc::new(Semaphore::new(0));
        let source = Arc::new(
            ScriptedSource::repeating(Ok(TaskRuntime::pending()))
                .script(vec![Ok(TaskRuntime::failed("stale failure"))])
                .with_gate(Arc::clone(&gate)),
        );
        let poller = AsyncTaskPoller::new(source);
        let counters = count_callbacks(&poller);

        poller.start_task(1);
        sleep(Duration::from_millis(1500)).await;
        poller.start_task(2);
        gate.add_permits(1);
        sleep(Duration::from_millis(100)).await;

        assert_eq!(poller.state(), TaskState::Running);
        assert_eq!(poller.error(), None);
        assert!(counters.errors().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_timer() {
        let source = Arc::new(ScriptedSource::repeating(Ok(TaskRuntime::pending())));
        let poller = AsyncTaskPoller::new(source.clone());

        poller.start_task(4);
        drop(poller);
        sleep(Duration::from_secs(5)).await;

        assert_eq!(source.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unsubscribed_callback_is_not_invoked() {
        let source = Arc::new(ScriptedSource::repeating(Ok(TaskRuntime::succeeded())));
        let poller = AsyncTaskPoller::new(source);
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let sub = poller.on_success(move || {
            h.fetch_add(1, Ordering::SeqCst);
        });
        sub.unsubscribe();

        poller.start_task(1);
        poller.wait_for_terminal().await;

        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_state_sees_transitions() {
        let source = Arc::new(ScriptedSource::repeating(Ok(TaskRuntime::succeeded())));
        let poller = AsyncTaskPoller::new(source);
        let mut rx = poller.watch_state();
        assert_eq!(*rx.borrow_and_update(), TaskState::WaitInput);

        poller.start_task(1);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), TaskState::Running);

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), TaskState::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_is_clamped() {
        let source = Arc::new(ScriptedSource::repeating(Ok(TaskRuntime::succeeded())));
        let poller = AsyncTaskPoller::with_interval(source, Duration::ZERO);
        assert_eq!(poller.interval(), MIN_POLL_INTERVAL);

        poller.start_task(1);
        let state = tokio::time::timeout(Duration::from_secs(2), poller.wait_for_terminal())
            .await
            .expect("session must reach a terminal state");
        assert_eq!(state, TaskState::Success);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_reset_on_worker_threads_silences_in_flight_outcome() {
        let gate = Arc::new(Semaphore::new(0));
        let source = Arc::new(
            ScriptedSource::repeating(Ok(TaskRuntime::succeeded())).with_gate(Arc::clone(&gate)),
        );
        let poller = AsyncTaskPoller::with_interval(source.clone(), Duration::from_millis(10));
        let counters = count_callbacks(&poller);

        poller.start_task(5);
        while source.calls() == 0 {
            sleep(Duration::from_millis(5)).await;
        }
        poller.reset();
        gate.add_permits(64);
        sleep(Duration::from_millis(100)).await;

        assert_eq!(counters.successes(), 0);
        assert_eq!(poller.state(), TaskState::WaitInput);
        assert_eq!(*poller.watch_state().borrow(), TaskState::WaitInput);
    }

    #[test]
    fn test_task_state_display() {
        assert_eq!(TaskState::WaitInput.to_string(), "WAIT_INPUT");
        assert_eq!(TaskState::Error.to_string(), "ERROR");
        assert!(TaskState::Success.is_terminal());
        assert!(!TaskState::Running.is_terminal());
        assert_eq!(
            serde_json::to_string(&TaskState::WaitInput).unwrap(),
            "\"WAIT_INPUT\""
        );
    }
}
