//! Dashboard overview route.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::db::ContentRepository;
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Dashboard template: collection counts and quick links.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin_name: String,
    pub work_count: usize,
    pub visible_work_count: usize,
    pub skill_count: usize,
    pub notification_count: usize,
    pub active_notification_count: usize,
}

/// Render the dashboard overview.
///
/// GET /
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
) -> Result<DashboardTemplate> {
    let repo = ContentRepository::new(state.pool());

    let works = repo.list_works().await?;
    let skills = repo.list_skills().await?;
    let notifications = repo.list_notifications().await?;

    Ok(DashboardTemplate {
        admin_name: admin.name,
        work_count: works.len(),
        visible_work_count: works.iter().filter(|w| w.visible).count(),
        skill_count: skills.len(),
        notification_count: notifications.len(),
        active_notification_count: notifications.iter().filter(|n| n.active).count(),
    })
}
