//! Login and logout routes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::middleware::{clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::services::AdminAuthService;
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Login form fields.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", post(logout))
}

/// Render the login page.
///
/// GET /auth/login
#[instrument(skip_all)]
async fn login_page(session: Session) -> Response {
    // Already logged in: straight to the dashboard.
    let current: Option<CurrentAdmin> = session
        .get(crate::models::session_keys::CURRENT_ADMIN)
        .await
        .ok()
        .flatten();

    if current.is_some() {
        return Redirect::to("/").into_response();
    }

    LoginTemplate { error: None }.into_response()
}

/// Verify credentials and open a console session.
///
/// POST /auth/login
///
/// An unknown email, a wrong password, and a valid password on a
/// non-admin account all produce the same inline error; the session is
/// only written when the admin-role check passes.
#[instrument(skip_all, fields(email = %form.email))]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let service = AdminAuthService::new(state.pool());

    match service.login(&form.email, &form.password).await {
        Ok(user) => {
            let current = CurrentAdmin::from(&user);
            if let Err(error) = set_current_admin(&session, &current).await {
                tracing::error!(%error, "failed to write session");
                return LoginTemplate {
                    error: Some("Could not start a session, try again".to_string()),
                }
                .into_response();
            }
            tracing::info!(admin = %user.email, "admin logged in");
            Redirect::to("/").into_response()
        }
        Err(error) => {
            tracing::warn!(%error, "login rejected");
            LoginTemplate {
                error: Some("Invalid credentials".to_string()),
            }
            .into_response()
        }
    }
}

/// Close the console session.
///
/// POST /auth/logout
#[instrument(skip_all)]
async fn logout(session: Session) -> Response {
    if let Err(error) = clear_current_admin(&session).await {
        tracing::error!(%error, "failed to clear session");
    }
    Redirect::to("/auth/login").into_response()
}
