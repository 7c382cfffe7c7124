//! The live content feed.
//!
//! The site never queries the database from a request handler. Instead
//! it holds one immutable [`ContentSnapshot`] behind a watch channel. A
//! background task listens on the console's `pg_notify` channel; each
//! notice names a collection, the task reloads that collection, applies
//! the core transforms, and swaps in a new snapshot. Handlers render
//! from whatever snapshot is current.
//!
//! Reload failures are logged and leave the previous snapshot in place;
//! a visitor sees stale content, never an error page.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgListener;
use tokio::sync::{broadcast, watch};

use atelier_core::{
    CONTENT_CHANNEL, Collection, Notification, SiteSettings, Skill, Work, gallery, notify,
};

use crate::db::content;

/// Delay before reconnecting a failed listener.
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Capacity of the browser-facing change broadcast.
const CHANGE_BUFFER: usize = 16;

/// Immutable view of everything the public page renders.
///
/// The collections are already transformed: works are visible-only and
/// order-sorted, skills are order-sorted, notifications are active-only
/// and newest-first.
#[derive(Debug, Clone, Default)]
pub struct ContentSnapshot {
    pub settings: SiteSettings,
    pub works: Vec<Work>,
    pub skills: Vec<Skill>,
    pub notifications: Vec<Notification>,
}

impl ContentSnapshot {
    /// Build a snapshot from raw collection rows.
    #[must_use]
    pub fn from_raw(
        settings: SiteSettings,
        works: Vec<Work>,
        skills: Vec<Skill>,
        notifications: Vec<Notification>,
    ) -> Self {
        Self {
            settings,
            works: gallery::visible_sorted(works),
            skills: gallery::sorted_skills(skills),
            notifications: notify::active_sorted(notifications),
        }
    }
}

/// Handle to the current snapshot and the change broadcast.
#[derive(Clone)]
pub struct ContentFeed {
    snapshot_rx: watch::Receiver<Arc<ContentSnapshot>>,
    changes_tx: broadcast::Sender<Collection>,
}

impl ContentFeed {
    /// Load the initial snapshot and spawn the listener task.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the initial load fails; after startup,
    /// failures only ever produce stale data.
    pub async fn start(pool: PgPool) -> Result<Self, sqlx::Error> {
        let snapshot = Arc::new(load_snapshot(&pool).await?);
        tracing::info!(
            works = snapshot.works.len(),
            skills = snapshot.skills.len(),
            notifications = snapshot.notifications.len(),
            "initial content snapshot loaded"
        );

        let (snapshot_tx, snapshot_rx) = watch::channel(snapshot);
        let (changes_tx, _) = broadcast::channel(CHANGE_BUFFER);

        tokio::spawn(listen_loop(pool, snapshot_tx, changes_tx.clone()));

        Ok(Self {
            snapshot_rx,
            changes_tx,
        })
    }

    /// The current snapshot (cheap `Arc` clone).
    #[must_use]
    pub fn snapshot(&self) -> Arc<ContentSnapshot> {
        self.snapshot_rx.borrow().clone()
    }

    /// Subscribe to change notices for the SSE endpoint.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Collection> {
        self.changes_tx.subscribe()
    }
}

/// Load all four collections and build a fresh snapshot.
async fn load_snapshot(pool: &PgPool) -> Result<ContentSnapshot, sqlx::Error> {
    let settings = content::fetch_settings(pool).await?;
    let works = content::fetch_works(pool).await?;
    let skills = content::fetch_skills(pool).await?;
    let notifications = content::fetch_notifications(pool).await?;

    Ok(ContentSnapshot::from_raw(
        settings,
        works,
        skills,
        notifications,
    ))
}

/// Reload one collection into a new snapshot.
///
/// Returns `false` (keeping the previous snapshot current) if the
/// reload fails.
async fn reload_collection(
    pool: &PgPool,
    snapshot_tx: &watch::Sender<Arc<ContentSnapshot>>,
    collection: Collection,
) -> bool {
    let current = snapshot_tx.borrow().clone();
    let mut next = (*current).clone();

    let result = match collection {
        Collection::Settings => content::fetch_settings(pool)
            .await
            .map(|settings| next.settings = settings),
        Collection::Works => content::fetch_works(pool)
            .await
            .map(|works| next.works = gallery::visible_sorted(works)),
        Collection::Skills => content::fetch_skills(pool)
            .await
            .map(|skills| next.skills = gallery::sorted_skills(skills)),
        Collection::Notifications => content::fetch_notifications(pool)
            .await
            .map(|notifications| next.notifications = notify::active_sorted(notifications)),
    };

    match result {
        Ok(()) => {
            snapshot_tx.send_replace(Arc::new(next));
            true
        }
        Err(error) => {
            tracing::error!(%collection, %error, "reload failed, serving stale snapshot");
            false
        }
    }
}

/// Listen for change notices and keep the snapshot current.
///
/// The outer loop reconnects after connection loss; each (re)connect
/// does a full reload to cover notices missed while disconnected.
async fn listen_loop(
    pool: PgPool,
    snapshot_tx: watch::Sender<Arc<ContentSnapshot>>,
    changes_tx: broadcast::Sender<Collection>,
) {
    loop {
        match PgListener::connect_with(&pool).await {
            Ok(mut listener) => {
                if let Err(error) = listener.listen(CONTENT_CHANNEL).await {
                    tracing::error!(%error, "failed to LISTEN on content channel");
                } else {
                    tracing::info!(channel = CONTENT_CHANNEL, "content listener connected");

                    // Catch up on anything missed while disconnected.
                    match load_snapshot(&pool).await {
                        Ok(snapshot) => {
                            snapshot_tx.send_replace(Arc::new(snapshot));
                        }
                        Err(error) => {
                            tracing::error!(%error, "catch-up reload failed");
                        }
                    }

                    receive_notices(&pool, &mut listener, &snapshot_tx, &changes_tx).await;
                }
            }
            Err(error) => {
                tracing::error!(%error, "content listener connection failed");
            }
        }

        tokio::time::sleep(RECONNECT_DELAY).await;
    }
}

/// Inner receive loop; returns when the connection drops.
async fn receive_notices(
    pool: &PgPool,
    listener: &mut PgListener,
    snapshot_tx: &watch::Sender<Arc<ContentSnapshot>>,
    changes_tx: &broadcast::Sender<Collection>,
) {
    loop {
        match listener.recv().await {
            Ok(notice) => {
                let Some(collection) = Collection::parse(notice.payload()) else {
                    tracing::warn!(payload = notice.payload(), "unknown content notice");
                    continue;
                };

                if reload_collection(pool, snapshot_tx, collection).await {
                    tracing::debug!(%collection, "snapshot updated");
                    // No receivers connected is fine.
                    let _ = changes_tx.send(collection);
                }
            }
            Err(error) => {
                tracing::error!(%error, "content listener dropped, reconnecting");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::{NotificationId, SkillId, WorkId};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_snapshot_from_raw_applies_transforms() {
        let works = vec![
            Work {
                id: WorkId::new(1),
                title: "Hidden".to_string(),
                category: "Web".to_string(),
                description: String::new(),
                project_url: None,
                visible: false,
                display_order: Some(0),
                image_url: None,
            },
            Work {
                id: WorkId::new(2),
                title: "Second".to_string(),
                category: "Web".to_string(),
                description: String::new(),
                project_url: None,
                visible: true,
                display_order: Some(2),
                image_url: None,
            },
            Work {
                id: WorkId::new(3),
                title: "First".to_string(),
                category: "Web".to_string(),
                description: String::new(),
                project_url: None,
                visible: true,
                display_order: Some(1),
                image_url: None,
            },
        ];

        let skills = vec![
            Skill {
                id: SkillId::new(1),
                name: "Later".to_string(),
                percent: 50,
                display_order: Some(5),
            },
            Skill {
                id: SkillId::new(2),
                name: "Earlier".to_string(),
                percent: 50,
                display_order: Some(1),
            },
        ];

        let instant = |h| Utc.with_ymd_and_hms(2026, 8, 6, h, 0, 0).single().expect("instant");
        let notifications = vec![
            Notification {
                id: NotificationId::new(1),
                message: "older".to_string(),
                cta_label: String::new(),
                cta_url: None,
                active: true,
                created_at: instant(1),
                start_at: None,
                end_at: None,
            },
            Notification {
                id: NotificationId::new(2),
                message: "inactive".to_string(),
                cta_label: String::new(),
                cta_url: None,
                active: false,
                created_at: instant(2),
                start_at: None,
                end_at: None,
            },
            Notification {
                id: NotificationId::new(3),
                message: "newer".to_string(),
                cta_label: String::new(),
                cta_url: None,
                active: true,
                created_at: instant(3),
                start_at: None,
                end_at: None,
            },
        ];

        let snapshot =
            ContentSnapshot::from_raw(SiteSettings::default(), works, skills, notifications);

        let titles: Vec<&str> = snapshot.works.iter().map(|w| w.title.as_str()).collect();
        assert_eq!(titles, ["First", "Second"]);

        let names: Vec<&str> = snapshot.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Earlier", "Later"]);

        let messages: Vec<&str> = snapshot
            .notifications
            .iter()
            .map(|n| n.message.as_str())
            .collect();
        assert_eq!(messages, ["newer", "older"]);
    }
}
