//! Notification sink collaborator contract

use crate::aggregator::Summary;

/// The outward-facing notification surface (OS tray, test double, ...).
///
/// `deliver` is called only for alerts that passed the cooldown gate.
/// `update_ongoing_summary` is called on every aggregator change and must
/// update the persistent summary silently: no sound, no vibration, no
/// re-alerting for content-only updates.
pub trait NotificationSink: Send + Sync {
    fn deliver(&self, title: &str, body: &str);

    fn update_ongoing_summary(&self, summary: &Summary);
}
