//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use chrono::Utc;
use tower_sessions::Session;
use tracing::instrument;

use atelier_core::gallery::Category;

use crate::filters;
use crate::state::AppState;

use super::GalleryParams;
use super::notifications::load_dismissed;
use super::views::{
    self, CategoryButton, NotificationView, SiteView, SkillView, WorkView,
};

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Site identity and footer data.
    pub site: SiteView,
    /// Category filter row.
    pub categories: Vec<CategoryButton>,
    /// Selected category token, echoed into fragment URLs.
    pub selected_category: String,
    /// Gallery cards for the selected category.
    pub works: Vec<WorkView>,
    /// Skill bars.
    pub skills: Vec<SkillView>,
    /// The notification popup, when one passes the gate.
    pub notification: Option<NotificationView>,
}

/// Display the home page.
#[instrument(skip(state, session))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<GalleryParams>,
) -> HomeTemplate {
    let snapshot = state.feed().snapshot();
    let selected = params
        .category
        .as_deref()
        .map_or(Category::All, Category::parse);

    let dismissed = load_dismissed(&session).await;

    HomeTemplate {
        site: views::site_view(&snapshot.settings),
        categories: views::category_buttons(&snapshot.works, &selected),
        selected_category: selected.as_token().to_string(),
        works: views::work_views(&snapshot.works, &selected),
        skills: views::skill_views(&snapshot.skills),
        notification: views::notification_view(&snapshot.notifications, Utc::now(), &dismissed),
    }
}
