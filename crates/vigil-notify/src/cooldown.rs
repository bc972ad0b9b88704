//! Global notification cooldown

use chrono::{DateTime, Duration, Utc};

/// Default minimum spacing between two delivered notifications.
pub const DEFAULT_COOLDOWN_MS: u64 = 60_000;

/// Process-wide rate limiter for user-visible notifications.
///
/// The gate is deliberately global rather than per-session: a burst of
/// alerts from different sessions inside one cooldown window collapses to a
/// single delivered notification. Suppressed alerts are dropped, not queued.
pub struct NotificationCooldown {
    cooldown: Duration,
    last_fired: Option<DateTime<Utc>>,
}

impl NotificationCooldown {
    pub fn new(cooldown_ms: u64) -> Self {
        Self {
            cooldown: Duration::milliseconds(cooldown_ms as i64),
            last_fired: None,
        }
    }

    /// Ask the gate for permission to deliver, using the wall clock.
    pub fn try_fire(&mut self) -> bool {
        self.try_fire_at(Utc::now())
    }

    /// Ask the gate for permission to deliver at instant `now`.
    ///
    /// Returns `true` and records `now` only when strictly more than the
    /// cooldown has elapsed since the last delivery (or none has happened
    /// yet); otherwise returns `false` and records nothing.
    pub fn try_fire_at(&mut self, now: DateTime<Utc>) -> bool {
        let allowed = match self.last_fired {
            None => true,
            Some(last) => now - last > self.cooldown,
        };

        if allowed {
            self.last_fired = Some(now);
        } else {
            tracing::debug!("notification suppressed by cooldown");
        }

        allowed
    }

    pub fn last_fired(&self) -> Option<DateTime<Utc>> {
        self.last_fired
    }
}

impl Default for NotificationCooldown {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN_MS)
    }
}
