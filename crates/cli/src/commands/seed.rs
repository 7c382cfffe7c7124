//! Demo content seeding.
//!
//! Fills an empty database with enough content to see the public page
//! working. Refuses to touch a database that already has works.

use atelier_admin::db::{
    ContentRepository, RepositoryError,
    content::{SkillDraft, WorkDraft},
};
use atelier_core::{ContactInfo, FooterLink, SiteSettings, SocialLink};

use super::ConnectError;

/// Errors that can occur while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Seed demo content.
///
/// # Errors
///
/// Returns `SeedError` if the database cannot be reached or a write
/// fails.
pub async fn run() -> Result<(), SeedError> {
    let pool = super::connect().await?;
    let repo = ContentRepository::new(&pool);

    if !repo.list_works().await?.is_empty() {
        tracing::info!("database already has works, leaving it alone");
        return Ok(());
    }

    repo.save_settings(&demo_settings()).await?;

    for draft in demo_works() {
        repo.create_work(&draft).await?;
    }
    for draft in demo_skills() {
        repo.create_skill(&draft).await?;
    }

    tracing::info!("demo content seeded");
    Ok(())
}

fn demo_settings() -> SiteSettings {
    SiteSettings {
        name: "Studio Atelier".to_string(),
        role_text: "Graphic Design & Branding".to_string(),
        description: "Independent design studio for print, identity, and digital work."
            .to_string(),
        profile_image_url: String::new(),
        contact: ContactInfo {
            email: "hello@atelier-studio.dev".to_string(),
            phone: String::new(),
            address: String::new(),
        },
        footer_links: vec![FooterLink {
            label: "Imprint".to_string(),
            url: "/imprint".to_string(),
        }],
        social_links: vec![SocialLink {
            platform: "Behance".to_string(),
            url: "https://behance.net/atelier-studio".to_string(),
        }],
    }
}

fn demo_works() -> Vec<WorkDraft> {
    vec![
        WorkDraft {
            title: "Poster".to_string(),
            category: "Branding".to_string(),
            description: "Launch poster series.".to_string(),
            project_url: None,
            visible: true,
            display_order: Some(1),
            image_url: None,
        },
        WorkDraft {
            title: "Logo Set".to_string(),
            category: "Branding".to_string(),
            description: "Identity refresh with full logo set.".to_string(),
            project_url: None,
            visible: true,
            display_order: Some(2),
            image_url: None,
        },
        WorkDraft {
            title: "Draft".to_string(),
            category: "Branding".to_string(),
            description: "Work in progress.".to_string(),
            project_url: None,
            visible: false,
            display_order: Some(0),
            image_url: None,
        },
    ]
}

fn demo_skills() -> Vec<SkillDraft> {
    vec![
        SkillDraft {
            name: "Typography".to_string(),
            percent: 90,
            display_order: Some(1),
        },
        SkillDraft {
            name: "Illustration".to_string(),
            percent: 75,
            display_order: Some(2),
        },
    ]
}
