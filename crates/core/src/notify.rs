//! The notification gate and the bounded dismissed set.
//!
//! A notification is surfaced to a visitor only while it is active, inside
//! its optional `[start_at, end_at]` window, and not previously dismissed
//! by that visitor. The dismissed set is stored in the visitor's session
//! and bounded: a fixed cap with oldest-first eviction, plus pruning of
//! entries that can never suppress anything again.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::Notification;
use crate::types::NotificationId;

/// Maximum number of dismissals remembered per visitor.
pub const DISMISSED_CAP: usize = 64;

/// Why a notification is or is not shown right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Surface the notification.
    Show,
    /// The notification is not flagged active.
    Inactive,
    /// The visitor already dismissed it.
    Dismissed,
    /// `start_at` lies in the future.
    NotYetStarted,
    /// `end_at` has passed.
    Expired,
}

impl Decision {
    /// Whether this decision surfaces the notification.
    #[must_use]
    pub const fn is_show(self) -> bool {
        matches!(self, Self::Show)
    }
}

/// Evaluate the gate for one notification at one instant.
#[must_use]
pub fn evaluate(
    notification: &Notification,
    now: DateTime<Utc>,
    dismissed: &DismissedSet,
) -> Decision {
    if !notification.active {
        return Decision::Inactive;
    }
    if dismissed.contains(notification.id) {
        return Decision::Dismissed;
    }
    if notification.start_at.is_some_and(|start_at| now < start_at) {
        return Decision::NotYetStarted;
    }
    if notification.end_at.is_some_and(|end_at| now > end_at) {
        return Decision::Expired;
    }
    Decision::Show
}

/// The first notification in `notifications` the gate passes.
///
/// Callers pass the snapshot's list, which is already newest-first, so
/// the single popup surface always shows the newest eligible
/// notification.
#[must_use]
pub fn first_eligible<'a>(
    notifications: &'a [Notification],
    now: DateTime<Utc>,
    dismissed: &DismissedSet,
) -> Option<&'a Notification> {
    notifications
        .iter()
        .find(|notification| evaluate(notification, now, dismissed).is_show())
}

/// Retain active notifications and sort newest-first by creation time.
#[must_use]
pub fn active_sorted(mut notifications: Vec<Notification>) -> Vec<Notification> {
    notifications.retain(|notification| notification.active);
    notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    notifications
}

/// Per-visitor set of dismissed notification IDs.
///
/// Insertion-ordered so eviction drops the oldest dismissal first.
/// Serialized into the visitor's session under a single key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DismissedSet {
    ids: Vec<NotificationId>,
}

impl DismissedSet {
    /// An empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Whether `id` has been dismissed.
    #[must_use]
    pub fn contains(&self, id: NotificationId) -> bool {
        self.ids.contains(&id)
    }

    /// Record a dismissal. Returns `false` if `id` was already present.
    ///
    /// At [`DISMISSED_CAP`] entries the oldest dismissal is evicted to
    /// make room.
    pub fn insert(&mut self, id: NotificationId) -> bool {
        if self.contains(id) {
            return false;
        }
        if self.ids.len() >= DISMISSED_CAP {
            self.ids.remove(0);
        }
        self.ids.push(id);
        true
    }

    /// Drop entries that can never suppress anything again: IDs no longer
    /// present in `live`, and IDs whose notification has expired.
    ///
    /// Dismissals for still-live, unexpired notifications are kept so the
    /// suppression survives reloads.
    pub fn prune(&mut self, live: &[Notification], now: DateTime<Utc>) {
        self.ids.retain(|id| {
            live.iter().any(|notification| {
                notification.id == *id
                    && notification.end_at.is_none_or(|end_at| now <= end_at)
            })
        });
    }

    /// Number of remembered dismissals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn instant(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 6, hour, 0, 0).single().expect("valid instant")
    }

    fn notification(id: i32, active: bool) -> Notification {
        Notification {
            id: NotificationId::new(id),
            message: "Summer prints are 20% off".to_string(),
            cta_label: "Shop now".to_string(),
            cta_url: Some("https://example.com/shop".to_string()),
            active,
            created_at: instant(0),
            start_at: None,
            end_at: None,
        }
    }

    #[test]
    fn test_gate_shows_inside_window() {
        let mut n = notification(1, true);
        n.start_at = Some(instant(9));
        n.end_at = Some(instant(17));
        let dismissed = DismissedSet::new();

        assert_eq!(evaluate(&n, instant(8), &dismissed), Decision::NotYetStarted);
        assert_eq!(evaluate(&n, instant(9), &dismissed), Decision::Show);
        assert_eq!(evaluate(&n, instant(12), &dismissed), Decision::Show);
        assert_eq!(evaluate(&n, instant(17), &dismissed), Decision::Show);
        assert_eq!(evaluate(&n, instant(18), &dismissed), Decision::Expired);
    }

    #[test]
    fn test_gate_without_window_shows_while_active() {
        let n = notification(1, true);
        let dismissed = DismissedSet::new();
        assert_eq!(evaluate(&n, instant(3), &dismissed), Decision::Show);
    }

    #[test]
    fn test_gate_inactive_suppresses() {
        let n = notification(1, false);
        let dismissed = DismissedSet::new();
        assert_eq!(evaluate(&n, instant(3), &dismissed), Decision::Inactive);
    }

    #[test]
    fn test_dismissal_always_suppresses() {
        // Even when the active/window conditions would pass.
        let mut n = notification(1, true);
        n.start_at = Some(instant(1));
        n.end_at = Some(instant(23));

        let mut dismissed = DismissedSet::new();
        dismissed.insert(n.id);

        assert_eq!(evaluate(&n, instant(12), &dismissed), Decision::Dismissed);
    }

    #[test]
    fn test_dismissal_survives_serialization() {
        // The set round-trips through session storage as plain JSON.
        let mut dismissed = DismissedSet::new();
        dismissed.insert(NotificationId::new(5));

        let json = serde_json::to_string(&dismissed).expect("serialize");
        let restored: DismissedSet = serde_json::from_str(&json).expect("deserialize");

        assert!(restored.contains(NotificationId::new(5)));
        assert_eq!(
            evaluate(&notification(5, true), instant(4), &restored),
            Decision::Dismissed
        );
    }

    #[test]
    fn test_not_shown_until_start_then_shown() {
        let now = instant(10);
        let mut n = notification(1, true);
        n.start_at = Some(now + Duration::hours(1));
        let dismissed = DismissedSet::new();

        assert_eq!(evaluate(&n, now, &dismissed), Decision::NotYetStarted);
        assert_eq!(
            evaluate(&n, now + Duration::hours(2), &dismissed),
            Decision::Show
        );
    }

    #[test]
    fn test_first_eligible_prefers_newest() {
        let mut older = notification(1, true);
        older.created_at = instant(1);
        let mut newer = notification(2, true);
        newer.created_at = instant(2);

        // Snapshot order is newest-first.
        let list = active_sorted(vec![older, newer]);
        let dismissed = DismissedSet::new();

        let eligible = first_eligible(&list, instant(12), &dismissed).expect("one eligible");
        assert_eq!(eligible.id, NotificationId::new(2));
    }

    #[test]
    fn test_first_eligible_skips_dismissed() {
        let mut newer = notification(2, true);
        newer.created_at = instant(2);
        let mut older = notification(1, true);
        older.created_at = instant(1);

        let list = active_sorted(vec![older, newer]);
        let mut dismissed = DismissedSet::new();
        dismissed.insert(NotificationId::new(2));

        let eligible = first_eligible(&list, instant(12), &dismissed).expect("one eligible");
        assert_eq!(eligible.id, NotificationId::new(1));
    }

    #[test]
    fn test_active_sorted_filters_and_orders_desc() {
        let mut a = notification(1, true);
        a.created_at = instant(3);
        let mut b = notification(2, true);
        b.created_at = instant(5);
        let c = notification(3, false);

        let sorted = active_sorted(vec![a, b, c]);
        let ids: Vec<i32> = sorted.iter().map(|n| n.id.as_i32()).collect();
        assert_eq!(ids, [2, 1]);
    }

    #[test]
    fn test_insert_dedupes() {
        let mut dismissed = DismissedSet::new();
        assert!(dismissed.insert(NotificationId::new(1)));
        assert!(!dismissed.insert(NotificationId::new(1)));
        assert_eq!(dismissed.len(), 1);
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut dismissed = DismissedSet::new();
        for i in 0..DISMISSED_CAP as i32 {
            dismissed.insert(NotificationId::new(i));
        }
        assert_eq!(dismissed.len(), DISMISSED_CAP);

        dismissed.insert(NotificationId::new(999));
        assert_eq!(dismissed.len(), DISMISSED_CAP);
        assert!(!dismissed.contains(NotificationId::new(0)));
        assert!(dismissed.contains(NotificationId::new(999)));
    }

    #[test]
    fn test_prune_drops_deleted_and_expired() {
        let now = instant(12);

        let live = notification(1, true);
        let mut ended = notification(2, true);
        ended.end_at = Some(instant(10));

        let mut dismissed = DismissedSet::new();
        dismissed.insert(NotificationId::new(1));
        dismissed.insert(NotificationId::new(2));
        dismissed.insert(NotificationId::new(3)); // no longer exists

        dismissed.prune(&[live, ended], now);

        assert!(dismissed.contains(NotificationId::new(1)));
        assert!(!dismissed.contains(NotificationId::new(2)));
        assert!(!dismissed.contains(NotificationId::new(3)));
    }
}
