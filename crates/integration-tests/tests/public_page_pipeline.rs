//! The public-page pipeline: raw rows through the core transforms to
//! what the renderer would show.

use chrono::{DateTime, Duration, TimeZone, Utc};

use atelier_core::gallery::{self, Category};
use atelier_core::notify::{self, DismissedSet};
use atelier_core::{Notification, NotificationId, Work, WorkId};

fn instant(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 6, hour, 0, 0)
        .single()
        .expect("valid instant")
}

fn work(id: i32, title: &str, category: &str, visible: bool, order: i32) -> Work {
    Work {
        id: WorkId::new(id),
        title: title.to_string(),
        category: category.to_string(),
        description: String::new(),
        project_url: None,
        visible,
        display_order: Some(order),
        image_url: None,
    }
}

fn notification(id: i32, created_hour: u32) -> Notification {
    Notification {
        id: NotificationId::new(id),
        message: format!("notice {id}"),
        cta_label: String::new(),
        cta_url: None,
        active: true,
        created_at: instant(created_hour),
        start_at: None,
        end_at: None,
    }
}

#[test]
fn branding_gallery_renders_poster_then_logo_set() {
    // Three works, one hidden; the Branding gallery shows exactly
    // ["Poster", "Logo Set"] in that order.
    let raw = vec![
        work(1, "Logo Set", "Branding", true, 2),
        work(2, "Poster", "Branding", true, 1),
        work(3, "Draft", "Branding", false, 0),
    ];

    let visible = gallery::visible_sorted(raw);
    let rendered = gallery::filter_by_category(&visible, &Category::parse("Branding"));

    let titles: Vec<&str> = rendered.iter().map(|w| w.title.as_str()).collect();
    assert_eq!(titles, ["Poster", "Logo Set"]);
}

#[test]
fn all_category_is_the_identity_filter() {
    let visible = gallery::visible_sorted(vec![
        work(1, "A", "Web", true, 1),
        work(2, "B", "Print", true, 2),
    ]);

    assert_eq!(gallery::filter_by_category(&visible, &Category::All), visible);
}

#[test]
fn future_notification_appears_once_the_window_opens() {
    let now = instant(10);
    let mut pending = notification(1, 1);
    pending.start_at = Some(now + Duration::hours(1));

    let list = notify::active_sorted(vec![pending]);
    let dismissed = DismissedSet::new();

    assert!(notify::first_eligible(&list, now, &dismissed).is_none());
    assert!(notify::first_eligible(&list, now + Duration::hours(2), &dismissed).is_some());
}

#[test]
fn dismissal_survives_a_session_roundtrip() {
    // Dismiss, serialize the set as the session store would, restore,
    // and the gate still suppresses the notification.
    let list = notify::active_sorted(vec![notification(7, 2)]);

    let mut dismissed = DismissedSet::new();
    dismissed.insert(NotificationId::new(7));
    dismissed.prune(&list, instant(3));

    let stored = serde_json::to_string(&dismissed).expect("serialize");
    let restored: DismissedSet = serde_json::from_str(&stored).expect("deserialize");

    assert!(notify::first_eligible(&list, instant(4), &restored).is_none());
}

#[test]
fn newest_eligible_notification_wins_the_single_popup() {
    let list = notify::active_sorted(vec![
        notification(1, 1),
        notification(2, 5),
        notification(3, 3),
    ]);

    let shown = notify::first_eligible(&list, instant(12), &DismissedSet::new())
        .expect("one eligible");
    assert_eq!(shown.id, NotificationId::new(2));

    // Dismissing the newest falls back to the next-newest.
    let mut dismissed = DismissedSet::new();
    dismissed.insert(NotificationId::new(2));
    let shown = notify::first_eligible(&list, instant(12), &dismissed).expect("one eligible");
    assert_eq!(shown.id, NotificationId::new(3));
}
