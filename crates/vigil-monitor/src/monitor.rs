//! Content monitor
//!
//! An arena of cancellable poll tasks indexed by `SessionId`. Arming,
//! re-arming and teardown only ever touch one session's timer; the other
//! sessions' schedules are unaffected.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use vigil_rules::RuleSet;
use vigil_sessions::SessionId;

use crate::source::TextSource;

/// Upper bound on one sampling call before the tick is skipped.
pub const DEFAULT_SAMPLE_TIMEOUT_MS: u64 = 5_000;

/// A rule match raised by one session's poll tick.
#[derive(Debug, Clone)]
pub struct AlertEvent {
    pub session_id: SessionId,
    pub message: String,
}

struct MonitorTask {
    handle: JoinHandle<()>,
    /// Kept so a re-arm can respawn the loop without asking for the
    /// renderer handle again.
    source: Arc<dyn TextSource>,
}

pub struct ContentMonitor {
    tasks: Mutex<HashMap<SessionId, MonitorTask>>,
    alerts: mpsc::Sender<AlertEvent>,
    sample_timeout: Duration,
}

impl ContentMonitor {
    /// Create the monitor and the channel its alert events arrive on.
    pub fn new(sample_timeout: Duration) -> (Self, mpsc::Receiver<AlertEvent>) {
        // Small buffer: the supervisor drains promptly and the cooldown
        // drops bursts anyway.
        let (tx, rx) = mpsc::channel(16);

        let monitor = Self {
            tasks: Mutex::new(HashMap::new()),
            alerts: tx,
            sample_timeout,
        };

        (monitor, rx)
    }

    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.lock().is_empty()
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.tasks.lock().contains_key(id)
    }

    /// Arm a poll task for `id`. Re-registering an id cancels its previous
    /// task first.
    pub fn register(
        &self,
        id: SessionId,
        rules: RuleSet,
        interval_ms: u64,
        source: Arc<dyn TextSource>,
    ) {
        let handle = self.spawn_task(id.clone(), rules, interval_ms, Arc::clone(&source));

        let mut tasks = self.tasks.lock();
        if let Some(previous) = tasks.insert(id.clone(), MonitorTask { handle, source }) {
            previous.handle.abort();
        }

        tracing::debug!(session_id = %id, interval_ms, "Armed monitor");
    }

    /// Cancel the pending timer for `id` and schedule a fresh one with the
    /// new rules and interval. Changes take effect on the next tick, never
    /// retroactively. Returns `false` when the id is not registered.
    pub fn rearm(&self, id: &SessionId, rules: RuleSet, interval_ms: u64) -> bool {
        let mut tasks = self.tasks.lock();
        let Some(task) = tasks.get_mut(id) else {
            return false;
        };

        task.handle.abort();
        let source = Arc::clone(&task.source);
        task.handle = self.spawn_task(id.clone(), rules, interval_ms, source);

        tracing::debug!(session_id = %id, interval_ms, "Re-armed monitor");

        true
    }

    /// Cancel the task for `id` immediately and discard its state. Once
    /// removed, the task can raise no further alerts for that id.
    pub fn remove(&self, id: &SessionId) -> bool {
        let Some(task) = self.tasks.lock().remove(id) else {
            return false;
        };

        task.handle.abort();
        tracing::debug!(session_id = %id, "Disarmed monitor");

        true
    }

    fn spawn_task(
        &self,
        id: SessionId,
        rules: RuleSet,
        interval_ms: u64,
        source: Arc<dyn TextSource>,
    ) -> JoinHandle<()> {
        let alerts = self.alerts.clone();
        let sample_timeout = self.sample_timeout;

        tokio::spawn(async move {
            let mut ticker = time::interval(Duration::from_millis(interval_ms.max(1)));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // An interval's first tick completes immediately; consume it so
            // the first sample happens one full period after arming.
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let sample = match time::timeout(sample_timeout, source.current_text()).await {
                    Ok(Ok(text)) => text,
                    Ok(Err(e)) => {
                        tracing::warn!(session_id = %id, error = %e, "sample failed; skipping tick");
                        continue;
                    }
                    Err(_) => {
                        tracing::warn!(session_id = %id, "sample timed out; skipping tick");
                        continue;
                    }
                };

                if let Some(rule) = rules.evaluate(&sample) {
                    let event = AlertEvent {
                        session_id: id.clone(),
                        message: rule.message.clone(),
                    };

                    if alerts.send(event).await.is_err() {
                        tracing::debug!(session_id = %id, "alert channel closed; stopping monitor task");
                        break;
                    }
                }
            }
        })
    }
}

impl Drop for ContentMonitor {
    fn drop(&mut self) {
        for (_, task) in self.tasks.lock().drain() {
            task.handle.abort();
        }
    }
}
