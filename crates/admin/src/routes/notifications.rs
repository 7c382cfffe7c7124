//! Notifications CRUD routes.

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

use atelier_core::{Notification, NotificationId};

use crate::db::{ContentRepository, content::NotificationDraft};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

use super::StatusParams;
use super::forms;
use super::works::redirect_with_error;

/// Length at which list messages are cut off.
const MESSAGE_PREVIEW_CHARS: usize = 50;

/// One row in the notifications list.
pub struct NotificationListItem {
    pub id: i32,
    pub message_preview: String,
    pub cta_label: String,
    pub active: bool,
    pub created_at: String,
}

impl From<&Notification> for NotificationListItem {
    fn from(notification: &Notification) -> Self {
        let mut message_preview: String = notification
            .message
            .chars()
            .take(MESSAGE_PREVIEW_CHARS)
            .collect();
        if notification.message.chars().count() > MESSAGE_PREVIEW_CHARS {
            message_preview.push('…');
        }

        Self {
            id: notification.id.as_i32(),
            message_preview,
            cta_label: notification.cta_label.clone(),
            active: notification.active,
            created_at: notification.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        }
    }
}

/// Notifications list template.
#[derive(Template, WebTemplate)]
#[template(path = "notifications/list.html")]
pub struct NotificationsListTemplate {
    pub admin_name: String,
    pub notifications: Vec<NotificationListItem>,
    pub success: Option<String>,
    pub error: Option<String>,
}

/// String-typed form values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationForm {
    pub message: String,
    #[serde(default)]
    pub cta_label: String,
    #[serde(default)]
    pub cta_url: String,
    #[serde(default)]
    pub active: Option<String>,
    #[serde(default)]
    pub start_at: String,
    #[serde(default)]
    pub end_at: String,
}

impl NotificationForm {
    fn into_draft(self) -> std::result::Result<NotificationDraft, (String, Self)> {
        let start_at = match forms::parse_datetime_local("Start", &self.start_at) {
            Ok(start_at) => start_at,
            Err(message) => return Err((message, self)),
        };
        let end_at = match forms::parse_datetime_local("End", &self.end_at) {
            Ok(end_at) => end_at,
            Err(message) => return Err((message, self)),
        };

        Ok(NotificationDraft {
            message: self.message,
            cta_label: self.cta_label,
            cta_url: forms::non_empty(self.cta_url),
            active: forms::checkbox_checked(&self.active),
            start_at,
            end_at,
        })
    }
}

impl From<&Notification> for NotificationForm {
    fn from(notification: &Notification) -> Self {
        Self {
            message: notification.message.clone(),
            cta_label: notification.cta_label.clone(),
            cta_url: notification.cta_url.clone().unwrap_or_default(),
            active: notification.active.then(|| "on".to_string()),
            start_at: forms::format_datetime_local(notification.start_at),
            end_at: forms::format_datetime_local(notification.end_at),
        }
    }
}

/// Notification add/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "notifications/form.html")]
pub struct NotificationFormTemplate {
    pub admin_name: String,
    pub heading: String,
    pub action: String,
    pub form: NotificationForm,
    pub error: Option<String>,
}

/// Build the notifications router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/new", get(new_form))
        .route("/{id}", post(update))
        .route("/{id}/edit", get(edit_form))
        .route("/{id}/delete", post(delete))
}

/// List all notifications, newest first, active or not.
///
/// GET /notifications
#[instrument(skip(state))]
async fn list(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Query(status): Query<StatusParams>,
) -> Result<NotificationsListTemplate> {
    let notifications = ContentRepository::new(state.pool())
        .list_notifications()
        .await?;

    Ok(NotificationsListTemplate {
        admin_name: admin.name,
        notifications: notifications.iter().map(NotificationListItem::from).collect(),
        success: status.success,
        error: status.error,
    })
}

/// Blank form.
///
/// GET /notifications/new
#[instrument(skip_all)]
async fn new_form(RequireAdminAuth(admin): RequireAdminAuth) -> NotificationFormTemplate {
    NotificationFormTemplate {
        admin_name: admin.name,
        heading: "Add Notification".to_string(),
        action: "/notifications".to_string(),
        form: NotificationForm::default(),
        error: None,
    }
}

/// Populated form for one notification.
///
/// GET /notifications/{id}/edit
#[instrument(skip(state))]
async fn edit_form(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<i32>,
) -> Result<NotificationFormTemplate> {
    let id = NotificationId::new(id);
    let notification = ContentRepository::new(state.pool())
        .get_notification(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("notification {id}")))?;

    Ok(NotificationFormTemplate {
        admin_name: admin.name,
        heading: "Edit Notification".to_string(),
        action: format!("/notifications/{id}"),
        form: NotificationForm::from(&notification),
        error: None,
    })
}

/// Create a new notification; `created_at` is stamped by the database.
///
/// POST /notifications
#[instrument(skip(state, form))]
async fn create(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Form(form): Form<NotificationForm>,
) -> Response {
    let draft = match form.into_draft() {
        Ok(draft) => draft,
        Err((message, form)) => {
            return NotificationFormTemplate {
                admin_name: admin.name,
                heading: "Add Notification".to_string(),
                action: "/notifications".to_string(),
                form,
                error: Some(message),
            }
            .into_response();
        }
    };

    match ContentRepository::new(state.pool())
        .create_notification(&draft)
        .await
    {
        Ok(notification) => {
            tracing::info!(id = %notification.id, "notification created");
            Redirect::to("/notifications?success=Notification+saved").into_response()
        }
        Err(error) => redirect_with_error("/notifications", &error.to_string()),
    }
}

/// Replace every bound field of a notification except `created_at`.
///
/// POST /notifications/{id}
#[instrument(skip(state, form))]
async fn update(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<i32>,
    Form(form): Form<NotificationForm>,
) -> Response {
    let id = NotificationId::new(id);
    let draft = match form.into_draft() {
        Ok(draft) => draft,
        Err((message, form)) => {
            return NotificationFormTemplate {
                admin_name: admin.name,
                heading: "Edit Notification".to_string(),
                action: format!("/notifications/{id}"),
                form,
                error: Some(message),
            }
            .into_response();
        }
    };

    match ContentRepository::new(state.pool())
        .update_notification(id, &draft)
        .await
    {
        Ok(()) => Redirect::to("/notifications?success=Notification+saved").into_response(),
        Err(error) => redirect_with_error("/notifications", &error.to_string()),
    }
}

/// Delete a notification.
///
/// POST /notifications/{id}/delete
#[instrument(skip(state))]
async fn delete(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Path(id): Path<i32>,
) -> Response {
    let id = NotificationId::new(id);
    match ContentRepository::new(state.pool())
        .delete_notification(id)
        .await
    {
        Ok(()) => Redirect::to("/notifications?success=Notification+deleted").into_response(),
        Err(error) => redirect_with_error("/notifications", &error.to_string()),
    }
}
