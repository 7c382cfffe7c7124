//! Read-side content queries.
//!
//! Rows come back raw; the feed applies the core transforms (visibility,
//! ordering, active filtering) before anything reaches a template.

use sqlx::PgPool;

use atelier_core::{Notification, SiteSettings, Skill, Work};

/// Key of the site settings singleton document.
const SETTINGS_KEY: &str = "main";

/// Load the settings singleton; a missing or unreadable document yields
/// the placeholder defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the query fails. A document that fails to
/// deserialize is logged and treated as absent rather than failing the
/// whole snapshot.
pub async fn fetch_settings(pool: &PgPool) -> Result<SiteSettings, sqlx::Error> {
    let row: Option<(serde_json::Value,)> =
        sqlx::query_as("SELECT value FROM site_settings WHERE key = $1")
            .bind(SETTINGS_KEY)
            .fetch_optional(pool)
            .await?;

    Ok(row
        .and_then(|(value,)| {
            serde_json::from_value(value)
                .map_err(|error| {
                    tracing::error!(%error, "settings document does not deserialize");
                })
                .ok()
        })
        .unwrap_or_default())
}

/// Load every work row, visible or not.
///
/// # Errors
///
/// Returns `sqlx::Error` if the query fails.
pub async fn fetch_works(pool: &PgPool) -> Result<Vec<Work>, sqlx::Error> {
    sqlx::query_as::<_, Work>(
        r"
        SELECT id, title, category, description, project_url, visible,
               display_order, image_url
        FROM works
        ",
    )
    .fetch_all(pool)
    .await
}

/// Load every skill row.
///
/// # Errors
///
/// Returns `sqlx::Error` if the query fails.
pub async fn fetch_skills(pool: &PgPool) -> Result<Vec<Skill>, sqlx::Error> {
    sqlx::query_as::<_, Skill>("SELECT id, name, percent, display_order FROM skills")
        .fetch_all(pool)
        .await
}

/// Load every notification row, active or not.
///
/// # Errors
///
/// Returns `sqlx::Error` if the query fails.
pub async fn fetch_notifications(pool: &PgPool) -> Result<Vec<Notification>, sqlx::Error> {
    sqlx::query_as::<_, Notification>(
        r"
        SELECT id, message, cta_label, cta_url, active, created_at, start_at, end_at
        FROM notifications
        ",
    )
    .fetch_all(pool)
    .await
}
