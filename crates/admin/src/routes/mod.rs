//! HTTP route handlers for the content console.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Dashboard overview
//! GET  /health                  - Health check
//!
//! # Auth
//! GET  /auth/login              - Login page
//! POST /auth/login              - Login action
//! POST /auth/logout             - Logout action
//!
//! # Works
//! GET  /works                   - List
//! GET  /works/new               - Blank form
//! POST /works                   - Create
//! GET  /works/{id}/edit         - Populated form
//! POST /works/{id}              - Update (full field replacement)
//! POST /works/{id}/delete       - Delete
//!
//! # Skills, Notifications
//! Same shape under /skills and /notifications.
//!
//! # Settings
//! GET  /settings/site           - Identity form (name, role, bio, image)
//! POST /settings/site           - Save identity section
//! GET  /settings/footer         - Contact + footer/social link editor
//! POST /settings/footer         - Save contact section and link arrays
//! ```
//!
//! Every route below except `/auth/*` extracts [`RequireAdminAuth`]
//! first; nothing is listed or loaded for an unauthenticated session.

pub mod auth;
pub mod dashboard;
pub mod forms;
pub mod notifications;
pub mod settings;
pub mod skills;
pub mod works;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create all routes for the console.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .nest("/works", works::router())
        .nest("/skills", skills::router())
        .nest("/notifications", notifications::router())
        .merge(settings::router())
        .nest("/auth", auth::router())
}

/// Status banner query parameters, carried across the
/// redirect-after-write.
#[derive(Debug, serde::Deserialize, Default)]
pub struct StatusParams {
    pub success: Option<String>,
    pub error: Option<String>,
}
