//! Notification dismissal route.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use tower_sessions::Session;
use tracing::instrument;

use atelier_core::NotificationId;
use atelier_core::notify::DismissedSet;

use crate::error::Result;
use crate::state::AppState;

/// Session key holding the visitor's dismissed set.
pub const DISMISSED_KEY: &str = "dismissed_notifications";

/// Load the visitor's dismissed set, defaulting to empty.
pub async fn load_dismissed(session: &Session) -> DismissedSet {
    session
        .get::<DismissedSet>(DISMISSED_KEY)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Record a dismissal in the visitor's session.
///
/// POST /notifications/{id}/dismiss
///
/// The set is pruned against the current snapshot on every write, so it
/// stays bounded even before the cap kicks in.
#[instrument(skip(state, session))]
pub async fn dismiss(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    let snapshot = state.feed().snapshot();

    let mut dismissed = load_dismissed(&session).await;
    dismissed.insert(NotificationId::new(id));
    dismissed.prune(&snapshot.notifications, Utc::now());

    session.insert(DISMISSED_KEY, &dismissed).await?;

    Ok(StatusCode::NO_CONTENT)
}
