//! Site settings routes.
//!
//! Two forms write disjoint sections of the settings singleton. Each
//! save loads the stored document, overwrites its own section, and
//! writes the whole document back, so the other form's fields survive.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use atelier_core::{ContactInfo, FooterLink, SiteSettings, SocialLink};

use crate::db::ContentRepository;
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

use super::StatusParams;
use super::works::redirect_with_error;

/// Identity form template (name, role text, bio, profile image).
#[derive(Template, WebTemplate)]
#[template(path = "settings/site.html")]
pub struct SiteSettingsTemplate {
    pub admin_name: String,
    pub name: String,
    pub role_text: String,
    pub description: String,
    pub profile_image_url: String,
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Footer & contact form template.
///
/// The link arrays are edited as rows client-side and submitted as JSON
/// in hidden fields, one array replacement per save.
#[derive(Template, WebTemplate)]
#[template(path = "settings/footer.html")]
pub struct FooterSettingsTemplate {
    pub admin_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub contact_address: String,
    pub footer_links_json: String,
    pub social_links_json: String,
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Identity form fields.
#[derive(Debug, Deserialize)]
pub struct SiteIdentityForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role_text: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub profile_image_url: String,
}

/// Footer & contact form fields.
#[derive(Debug, Deserialize)]
pub struct FooterContactForm {
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: String,
    #[serde(default)]
    pub contact_address: String,
    #[serde(default)]
    pub footer_links_json: String,
    #[serde(default)]
    pub social_links_json: String,
}

/// Build the settings router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/settings/site", get(site_page).post(save_site))
        .route("/settings/footer", get(footer_page).post(save_footer))
}

/// Load the stored settings document, defaulting when absent.
async fn load_settings(repo: &ContentRepository<'_>) -> Result<SiteSettings> {
    Ok(repo.get_settings().await?.unwrap_or_default())
}

/// Render the identity form.
///
/// GET /settings/site
#[instrument(skip(state))]
async fn site_page(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Query(status): Query<StatusParams>,
) -> Result<SiteSettingsTemplate> {
    let repo = ContentRepository::new(state.pool());
    let settings = load_settings(&repo).await?;

    Ok(SiteSettingsTemplate {
        admin_name: admin.name,
        name: settings.name,
        role_text: settings.role_text,
        description: settings.description,
        profile_image_url: settings.profile_image_url,
        success: status.success,
        error: status.error,
    })
}

/// Save the identity section over the stored document.
///
/// POST /settings/site
#[instrument(skip(state, form))]
async fn save_site(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Form(form): Form<SiteIdentityForm>,
) -> Response {
    let repo = ContentRepository::new(state.pool());

    let mut settings = match load_settings(&repo).await {
        Ok(settings) => settings,
        Err(_) => return redirect_with_error("/settings/site", "Could not load settings"),
    };

    settings.name = form.name;
    settings.role_text = form.role_text;
    settings.description = form.description;
    settings.profile_image_url = form.profile_image_url;

    match repo.save_settings(&settings).await {
        Ok(()) => Redirect::to("/settings/site?success=Settings+saved").into_response(),
        Err(error) => redirect_with_error("/settings/site", &error.to_string()),
    }
}

/// Render the footer & contact form.
///
/// GET /settings/footer
#[instrument(skip(state))]
async fn footer_page(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Query(status): Query<StatusParams>,
) -> Result<FooterSettingsTemplate> {
    let repo = ContentRepository::new(state.pool());
    let settings = load_settings(&repo).await?;

    Ok(FooterSettingsTemplate {
        admin_name: admin.name,
        contact_email: settings.contact.email,
        contact_phone: settings.contact.phone,
        contact_address: settings.contact.address,
        footer_links_json: serde_json::to_string(&settings.footer_links).unwrap_or_else(|_| "[]".to_string()),
        social_links_json: serde_json::to_string(&settings.social_links).unwrap_or_else(|_| "[]".to_string()),
        success: status.success,
        error: status.error,
    })
}

/// Save the contact section and replace both link arrays.
///
/// Half-filled link rows are pruned before persisting.
///
/// POST /settings/footer
#[instrument(skip(state, form))]
async fn save_footer(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Form(form): Form<FooterContactForm>,
) -> Response {
    let footer_links: Vec<FooterLink> = match parse_links(&form.footer_links_json) {
        Ok(links) => links,
        Err(message) => return redirect_with_error("/settings/footer", &message),
    };
    let social_links: Vec<SocialLink> = match parse_links(&form.social_links_json) {
        Ok(links) => links,
        Err(message) => return redirect_with_error("/settings/footer", &message),
    };

    let repo = ContentRepository::new(state.pool());
    let mut settings = match load_settings(&repo).await {
        Ok(settings) => settings,
        Err(_) => return redirect_with_error("/settings/footer", "Could not load settings"),
    };

    settings.contact = ContactInfo {
        email: form.contact_email,
        phone: form.contact_phone,
        address: form.contact_address,
    };
    settings.footer_links = footer_links;
    settings.social_links = social_links;
    settings.prune_links();

    match repo.save_settings(&settings).await {
        Ok(()) => Redirect::to("/settings/footer?success=Footer+%26+contact+saved").into_response(),
        Err(error) => redirect_with_error("/settings/footer", &error.to_string()),
    }
}

/// Parse a link array submitted as JSON; empty input means no links.
fn parse_links<T: serde::de::DeserializeOwned>(input: &str) -> std::result::Result<Vec<T>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).map_err(|_| "Link rows could not be read".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_links_empty_is_no_links() {
        let links: Vec<FooterLink> = parse_links("").expect("empty ok");
        assert!(links.is_empty());
    }

    #[test]
    fn test_parse_links_json_array() {
        let links: Vec<FooterLink> =
            parse_links(r#"[{"label":"GitHub","url":"https://github.com/x"}]"#).expect("parses");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].label, "GitHub");
    }

    #[test]
    fn test_parse_links_rejects_garbage() {
        let result: std::result::Result<Vec<FooterLink>, String> = parse_links("not json");
        assert!(result.is_err());
    }
}
