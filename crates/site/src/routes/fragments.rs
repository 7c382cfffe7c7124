//! Fragment routes.
//!
//! The browser refetches these when the SSE stream reports a change;
//! each returns a partial the page swaps in place.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use chrono::Utc;
use tower_sessions::Session;
use tracing::instrument;

use atelier_core::gallery::Category;

use crate::state::AppState;

use super::GalleryParams;
use super::notifications::load_dismissed;
use super::views::{self, CategoryButton, NotificationView, SkillView, WorkView};

/// Gallery grid fragment.
#[derive(Template, WebTemplate)]
#[template(path = "fragments/works.html")]
pub struct WorksFragment {
    pub categories: Vec<CategoryButton>,
    pub selected_category: String,
    pub works: Vec<WorkView>,
}

/// Skill list fragment.
#[derive(Template, WebTemplate)]
#[template(path = "fragments/skills.html")]
pub struct SkillsFragment {
    pub skills: Vec<SkillView>,
}

/// Notification popup fragment.
#[derive(Template, WebTemplate)]
#[template(path = "fragments/notification.html")]
pub struct NotificationFragment {
    pub notification: Option<NotificationView>,
}

/// Gallery grid for the selected category.
///
/// GET /fragments/works
#[instrument(skip(state))]
pub async fn works(
    State(state): State<AppState>,
    Query(params): Query<GalleryParams>,
) -> WorksFragment {
    let snapshot = state.feed().snapshot();
    let selected = params
        .category
        .as_deref()
        .map_or(Category::All, Category::parse);

    WorksFragment {
        categories: views::category_buttons(&snapshot.works, &selected),
        selected_category: selected.as_token().to_string(),
        works: views::work_views(&snapshot.works, &selected),
    }
}

/// Skill list.
///
/// GET /fragments/skills
#[instrument(skip(state))]
pub async fn skills(State(state): State<AppState>) -> SkillsFragment {
    let snapshot = state.feed().snapshot();

    SkillsFragment {
        skills: views::skill_views(&snapshot.skills),
    }
}

/// Notification popup with the gate re-applied.
///
/// GET /fragments/notification
#[instrument(skip(state, session))]
pub async fn notification(
    State(state): State<AppState>,
    session: Session,
) -> NotificationFragment {
    let snapshot = state.feed().snapshot();
    let dismissed = load_dismissed(&session).await;

    NotificationFragment {
        notification: views::notification_view(&snapshot.notifications, Utc::now(), &dismissed),
    }
}
