//! Works CRUD routes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use atelier_core::{Work, WorkId};

use crate::db::{ContentRepository, content::WorkDraft};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

use super::StatusParams;
use super::forms;

/// One row in the works list.
pub struct WorkListItem {
    pub id: i32,
    pub title: String,
    pub category: String,
    pub visible: bool,
    pub display_order: String,
}

impl From<&Work> for WorkListItem {
    fn from(work: &Work) -> Self {
        Self {
            id: work.id.as_i32(),
            title: work.title.clone(),
            category: work.category.clone(),
            visible: work.visible,
            display_order: work
                .display_order
                .map_or_else(String::new, |order| order.to_string()),
        }
    }
}

/// Works list template.
#[derive(Template, WebTemplate)]
#[template(path = "works/list.html")]
pub struct WorksListTemplate {
    pub admin_name: String,
    pub works: Vec<WorkListItem>,
    pub success: Option<String>,
    pub error: Option<String>,
}

/// String-typed form values, echoed back on a parse error so the
/// operator's input survives the round-trip.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkForm {
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub project_url: String,
    #[serde(default)]
    pub visible: Option<String>,
    #[serde(default)]
    pub display_order: String,
    #[serde(default)]
    pub image_url: String,
}

impl WorkForm {
    fn into_draft(self) -> std::result::Result<WorkDraft, (String, Self)> {
        let display_order = match forms::parse_optional_int("Order", &self.display_order) {
            Ok(order) => order,
            Err(message) => return Err((message, self)),
        };

        Ok(WorkDraft {
            title: self.title,
            category: self.category,
            description: self.description,
            project_url: forms::non_empty(self.project_url),
            visible: forms::checkbox_checked(&self.visible),
            display_order,
            image_url: forms::non_empty(self.image_url),
        })
    }
}

impl From<&Work> for WorkForm {
    fn from(work: &Work) -> Self {
        Self {
            title: work.title.clone(),
            category: work.category.clone(),
            description: work.description.clone(),
            project_url: work.project_url.clone().unwrap_or_default(),
            visible: work.visible.then(|| "on".to_string()),
            display_order: work
                .display_order
                .map_or_else(String::new, |order| order.to_string()),
            image_url: work.image_url.clone().unwrap_or_default(),
        }
    }
}

/// Work add/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "works/form.html")]
pub struct WorkFormTemplate {
    pub admin_name: String,
    pub heading: String,
    pub action: String,
    pub form: WorkForm,
    pub error: Option<String>,
}

/// Build the works router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/new", get(new_form))
        .route("/{id}", post(update))
        .route("/{id}/edit", get(edit_form))
        .route("/{id}/delete", post(delete))
}

/// List all works, visible or not.
///
/// GET /works
#[instrument(skip(state))]
async fn list(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Query(status): Query<StatusParams>,
) -> Result<WorksListTemplate> {
    let works = ContentRepository::new(state.pool()).list_works().await?;

    Ok(WorksListTemplate {
        admin_name: admin.name,
        works: works.iter().map(WorkListItem::from).collect(),
        success: status.success,
        error: status.error,
    })
}

/// Blank form.
///
/// GET /works/new
#[instrument(skip_all)]
async fn new_form(RequireAdminAuth(admin): RequireAdminAuth) -> WorkFormTemplate {
    WorkFormTemplate {
        admin_name: admin.name,
        heading: "Add Work".to_string(),
        action: "/works".to_string(),
        form: WorkForm::default(),
        error: None,
    }
}

/// Populated form for one work.
///
/// GET /works/{id}/edit
#[instrument(skip(state))]
async fn edit_form(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<i32>,
) -> Result<WorkFormTemplate> {
    let id = WorkId::new(id);
    let work = ContentRepository::new(state.pool())
        .get_work(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("work {id}")))?;

    Ok(WorkFormTemplate {
        admin_name: admin.name,
        heading: "Edit Work".to_string(),
        action: format!("/works/{id}"),
        form: WorkForm::from(&work),
        error: None,
    })
}

/// Create a new work.
///
/// POST /works
#[instrument(skip(state, form))]
async fn create(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Form(form): Form<WorkForm>,
) -> Response {
    let draft = match form.into_draft() {
        Ok(draft) => draft,
        Err((message, form)) => {
            return WorkFormTemplate {
                admin_name: admin.name,
                heading: "Add Work".to_string(),
                action: "/works".to_string(),
                form,
                error: Some(message),
            }
            .into_response();
        }
    };

    match ContentRepository::new(state.pool()).create_work(&draft).await {
        Ok(work) => {
            tracing::info!(id = %work.id, title = %work.title, "work created");
            Redirect::to("/works?success=Work+saved").into_response()
        }
        Err(error) => redirect_with_error("/works", &error.to_string()),
    }
}

/// Replace every bound field of a work.
///
/// POST /works/{id}
#[instrument(skip(state, form))]
async fn update(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<i32>,
    Form(form): Form<WorkForm>,
) -> Response {
    let id = WorkId::new(id);
    let draft = match form.into_draft() {
        Ok(draft) => draft,
        Err((message, form)) => {
            return WorkFormTemplate {
                admin_name: admin.name,
                heading: "Edit Work".to_string(),
                action: format!("/works/{id}"),
                form,
                error: Some(message),
            }
            .into_response();
        }
    };

    match ContentRepository::new(state.pool()).update_work(id, &draft).await {
        Ok(()) => {
            tracing::info!(%id, "work updated");
            Redirect::to("/works?success=Work+saved").into_response()
        }
        Err(error) => redirect_with_error("/works", &error.to_string()),
    }
}

/// Delete a work. The list view asks for confirmation before posting.
///
/// POST /works/{id}/delete
#[instrument(skip(state))]
async fn delete(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Path(id): Path<i32>,
) -> Response {
    let id = WorkId::new(id);
    match ContentRepository::new(state.pool()).delete_work(id).await {
        Ok(()) => {
            tracing::info!(%id, "work deleted");
            Redirect::to("/works?success=Work+deleted").into_response()
        }
        Err(error) => redirect_with_error("/works", &error.to_string()),
    }
}

/// Redirect back to a list page with the error banner set.
pub(super) fn redirect_with_error(base: &str, message: &str) -> Response {
    let encoded = urlencoding::encode(message);
    Redirect::to(&format!("{base}?error={encoded}")).into_response()
}
