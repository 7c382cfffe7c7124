//! HTTP route handlers for the public site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                             - Full page (?category= filters the gallery)
//! GET  /health                       - Liveness check
//! GET  /health/ready                 - Readiness check (database)
//!
//! # Fragments (refetched by the browser on SSE change events)
//! GET  /fragments/works              - Gallery grid (?category=)
//! GET  /fragments/skills             - Skill list
//! GET  /fragments/notification      - Notification popup (gate applied)
//!
//! # Notifications
//! POST /notifications/{id}/dismiss   - Persist a dismissal in the session
//!
//! # Live updates
//! GET  /events                       - SSE stream of content change notices
//! ```

pub mod events;
pub mod fragments;
pub mod home;
pub mod notifications;
pub mod views;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/fragments/works", get(fragments::works))
        .route("/fragments/skills", get(fragments::skills))
        .route("/fragments/notification", get(fragments::notification))
        .route(
            "/notifications/{id}/dismiss",
            post(notifications::dismiss),
        )
        .route("/events", get(events::events))
}

/// Gallery filter query parameter.
#[derive(Debug, serde::Deserialize, Default)]
pub struct GalleryParams {
    pub category: Option<String>,
}
