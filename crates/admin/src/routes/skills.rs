//! Skills CRUD routes.

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

use atelier_core::{Skill, SkillId};

use crate::db::{ContentRepository, content::SkillDraft};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

use super::StatusParams;
use super::forms;
use super::works::redirect_with_error;

/// One row in the skills list.
pub struct SkillListItem {
    pub id: i32,
    pub name: String,
    pub percent: i32,
    pub display_order: String,
}

impl From<&Skill> for SkillListItem {
    fn from(skill: &Skill) -> Self {
        Self {
            id: skill.id.as_i32(),
            name: skill.name.clone(),
            percent: skill.percent,
            display_order: skill
                .display_order
                .map_or_else(String::new, |order| order.to_string()),
        }
    }
}

/// Skills list template.
#[derive(Template, WebTemplate)]
#[template(path = "skills/list.html")]
pub struct SkillsListTemplate {
    pub admin_name: String,
    pub skills: Vec<SkillListItem>,
    pub success: Option<String>,
    pub error: Option<String>,
}

/// String-typed form values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillForm {
    pub name: String,
    #[serde(default)]
    pub percent: String,
    #[serde(default)]
    pub display_order: String,
}

impl SkillForm {
    fn into_draft(self) -> std::result::Result<SkillDraft, (String, Self)> {
        let percent = match forms::parse_required_int("Percent", &self.percent) {
            Ok(percent) => percent,
            Err(message) => return Err((message, self)),
        };
        let display_order = match forms::parse_optional_int("Order", &self.display_order) {
            Ok(order) => order,
            Err(message) => return Err((message, self)),
        };

        Ok(SkillDraft {
            name: self.name,
            percent,
            display_order,
        })
    }
}

impl From<&Skill> for SkillForm {
    fn from(skill: &Skill) -> Self {
        Self {
            name: skill.name.clone(),
            percent: skill.percent.to_string(),
            display_order: skill
                .display_order
                .map_or_else(String::new, |order| order.to_string()),
        }
    }
}

/// Skill add/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "skills/form.html")]
pub struct SkillFormTemplate {
    pub admin_name: String,
    pub heading: String,
    pub action: String,
    pub form: SkillForm,
    pub error: Option<String>,
}

/// Build the skills router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/new", get(new_form))
        .route("/{id}", post(update))
        .route("/{id}/edit", get(edit_form))
        .route("/{id}/delete", post(delete))
}

/// List all skills.
///
/// GET /skills
#[instrument(skip(state))]
async fn list(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Query(status): Query<StatusParams>,
) -> Result<SkillsListTemplate> {
    let skills = ContentRepository::new(state.pool()).list_skills().await?;

    Ok(SkillsListTemplate {
        admin_name: admin.name,
        skills: skills.iter().map(SkillListItem::from).collect(),
        success: status.success,
        error: status.error,
    })
}

/// Blank form.
///
/// GET /skills/new
#[instrument(skip_all)]
async fn new_form(RequireAdminAuth(admin): RequireAdminAuth) -> SkillFormTemplate {
    SkillFormTemplate {
        admin_name: admin.name,
        heading: "Add Skill".to_string(),
        action: "/skills".to_string(),
        form: SkillForm::default(),
        error: None,
    }
}

/// Populated form for one skill.
///
/// GET /skills/{id}/edit
#[instrument(skip(state))]
async fn edit_form(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<i32>,
) -> Result<SkillFormTemplate> {
    let id = SkillId::new(id);
    let skill = ContentRepository::new(state.pool())
        .get_skill(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("skill {id}")))?;

    Ok(SkillFormTemplate {
        admin_name: admin.name,
        heading: "Edit Skill".to_string(),
        action: format!("/skills/{id}"),
        form: SkillForm::from(&skill),
        error: None,
    })
}

/// Create a new skill.
///
/// POST /skills
#[instrument(skip(state, form))]
async fn create(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Form(form): Form<SkillForm>,
) -> Response {
    let draft = match form.into_draft() {
        Ok(draft) => draft,
        Err((message, form)) => {
            return SkillFormTemplate {
                admin_name: admin.name,
                heading: "Add Skill".to_string(),
                action: "/skills".to_string(),
                form,
                error: Some(message),
            }
            .into_response();
        }
    };

    match ContentRepository::new(state.pool()).create_skill(&draft).await {
        Ok(skill) => {
            tracing::info!(id = %skill.id, name = %skill.name, "skill created");
            Redirect::to("/skills?success=Skill+saved").into_response()
        }
        Err(error) => redirect_with_error("/skills", &error.to_string()),
    }
}

/// Replace every bound field of a skill.
///
/// POST /skills/{id}
#[instrument(skip(state, form))]
async fn update(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<i32>,
    Form(form): Form<SkillForm>,
) -> Response {
    let id = SkillId::new(id);
    let draft = match form.into_draft() {
        Ok(draft) => draft,
        Err((message, form)) => {
            return SkillFormTemplate {
                admin_name: admin.name,
                heading: "Edit Skill".to_string(),
                action: format!("/skills/{id}"),
                form,
                error: Some(message),
            }
            .into_response();
        }
    };

    match ContentRepository::new(state.pool()).update_skill(id, &draft).await {
        Ok(()) => Redirect::to("/skills?success=Skill+saved").into_response(),
        Err(error) => redirect_with_error("/skills", &error.to_string()),
    }
}

/// Delete a skill.
///
/// POST /skills/{id}/delete
#[instrument(skip(state))]
async fn delete(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Path(id): Path<i32>,
) -> Response {
    let id = SkillId::new(id);
    match ContentRepository::new(state.pool()).delete_skill(id).await {
        Ok(()) => Redirect::to("/skills?success=Skill+deleted").into_response(),
        Err(error) => redirect_with_error("/skills", &error.to_string()),
    }
}
