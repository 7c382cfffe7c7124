//! Document types stored in the content database.
//!
//! The site settings singleton is persisted as one JSONB document keyed
//! `main`, serialized camelCase so the stored shape matches the field
//! names the admin forms and public templates were built around. Works,
//! skills, and notifications are ordinary rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{NotificationId, SkillId, WorkId};

/// Fallback shown wherever the site name is blank or the settings
/// document is missing.
pub const DEFAULT_SITE_NAME: &str = "Portfolio";

/// Postgres notification channel carrying content-change notices.
pub const CONTENT_CHANNEL: &str = "atelier_content";

/// Fallback label for a notification call-to-action.
pub const DEFAULT_CTA_LABEL: &str = "Learn More";

// =============================================================================
// Change feed vocabulary
// =============================================================================

/// The four watched content collections.
///
/// Used as the payload on [`CONTENT_CHANNEL`]: the writer names the
/// collection it touched, the reader reloads exactly that collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Settings,
    Works,
    Skills,
    Notifications,
}

impl Collection {
    /// Wire form used as the notification payload.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Settings => "settings",
            Self::Works => "works",
            Self::Skills => "skills",
            Self::Notifications => "notifications",
        }
    }

    /// Parse a notification payload. Unknown payloads return `None`; the
    /// reader ignores them rather than reloading blindly.
    #[must_use]
    pub fn parse(payload: &str) -> Option<Self> {
        match payload {
            "settings" => Some(Self::Settings),
            "works" => Some(Self::Works),
            "skills" => Some(Self::Skills),
            "notifications" => Some(Self::Notifications),
            _ => None,
        }
    }
}

impl core::fmt::Display for Collection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Site settings (singleton document)
// =============================================================================

/// Contact details shown in the public footer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// A labeled link in the public footer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterLink {
    pub label: String,
    pub url: String,
}

impl FooterLink {
    /// Whether both halves of the link are filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.label.trim().is_empty() && !self.url.trim().is_empty()
    }
}

/// A social profile link shown in the public footer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

impl SocialLink {
    /// Whether both halves of the link are filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.platform.trim().is_empty() && !self.url.trim().is_empty()
    }

    /// Two-letter icon text derived from the platform name.
    #[must_use]
    pub fn icon_text(&self) -> String {
        self.platform.chars().take(2).collect::<String>().to_uppercase()
    }
}

/// The site-wide settings singleton.
///
/// Mutated wholesale by the admin forms; read by the public renderer.
/// Every field defaults so a partially written or missing document still
/// deserializes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    pub name: String,
    pub role_text: String,
    pub description: String,
    pub profile_image_url: String,
    pub contact: ContactInfo,
    pub footer_links: Vec<FooterLink>,
    pub social_links: Vec<SocialLink>,
}

impl SiteSettings {
    /// Site name with the placeholder fallback applied.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            DEFAULT_SITE_NAME
        } else {
            &self.name
        }
    }

    /// Drop footer and social links with an empty label/platform or URL.
    ///
    /// Run before persisting: the inline link editors allow half-filled
    /// rows, which must not reach the stored document.
    pub fn prune_links(&mut self) {
        self.footer_links.retain(FooterLink::is_complete);
        self.social_links.retain(SocialLink::is_complete);
    }
}

// =============================================================================
// Collection documents
// =============================================================================

/// A portfolio work shown in the public gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Work {
    pub id: WorkId,
    pub title: String,
    pub category: String,
    pub description: String,
    pub project_url: Option<String>,
    pub visible: bool,
    /// User-assigned position; ties are unspecified, `None` sorts as 0.
    pub display_order: Option<i32>,
    pub image_url: Option<String>,
}

/// A skill with a proficiency bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    /// Expected 0-100 but persisted as given; clamp at render time.
    pub percent: i32,
    pub display_order: Option<i32>,
}

impl Skill {
    /// Percent clamped to the renderable 0-100 range.
    #[must_use]
    pub fn clamped_percent(&self) -> i32 {
        self.percent.clamp(0, 100)
    }
}

/// A promotional notification with an optional visibility window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub cta_label: String,
    pub cta_url: Option<String>,
    pub active: bool,
    /// Stamped by the database at insert, never touched on update.
    pub created_at: DateTime<Utc>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// CTA label with the fallback applied.
    #[must_use]
    pub fn cta_label_or_default(&self) -> &str {
        if self.cta_label.trim().is_empty() {
            DEFAULT_CTA_LABEL
        } else {
            &self.cta_label
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_payload_roundtrip() {
        for collection in [
            Collection::Settings,
            Collection::Works,
            Collection::Skills,
            Collection::Notifications,
        ] {
            assert_eq!(Collection::parse(collection.as_str()), Some(collection));
        }
        assert_eq!(Collection::parse("admins"), None);
    }

    #[test]
    fn test_settings_json_shape_is_camel_case() {
        let settings = SiteSettings {
            name: "Dagi Creative".to_string(),
            role_text: "Graphic Designer".to_string(),
            ..SiteSettings::default()
        };

        let json = serde_json::to_value(&settings).expect("serialize");
        assert_eq!(json["name"], "Dagi Creative");
        assert_eq!(json["roleText"], "Graphic Designer");
        assert!(json.get("role_text").is_none());
        assert!(json.get("profileImageUrl").is_some());
    }

    #[test]
    fn test_settings_deserializes_partial_document() {
        let settings: SiteSettings =
            serde_json::from_str(r#"{"name":"Studio"}"#).expect("deserialize");
        assert_eq!(settings.name, "Studio");
        assert!(settings.footer_links.is_empty());
        assert_eq!(settings.contact, ContactInfo::default());
    }

    #[test]
    fn test_display_name_fallback() {
        let mut settings = SiteSettings::default();
        assert_eq!(settings.display_name(), DEFAULT_SITE_NAME);
        settings.name = "  ".to_string();
        assert_eq!(settings.display_name(), DEFAULT_SITE_NAME);
        settings.name = "Studio".to_string();
        assert_eq!(settings.display_name(), "Studio");
    }

    #[test]
    fn test_prune_links_drops_incomplete_entries() {
        let mut settings = SiteSettings {
            footer_links: vec![
                FooterLink {
                    label: String::new(),
                    url: "x".to_string(),
                },
                FooterLink {
                    label: "GitHub".to_string(),
                    url: "https://github.com/atelier-studio".to_string(),
                },
            ],
            social_links: vec![
                SocialLink {
                    platform: "Instagram".to_string(),
                    url: String::new(),
                },
                SocialLink {
                    platform: "Behance".to_string(),
                    url: "https://behance.net/atelier".to_string(),
                },
            ],
            ..SiteSettings::default()
        };

        settings.prune_links();

        assert_eq!(settings.footer_links.len(), 1);
        assert_eq!(settings.footer_links[0].label, "GitHub");
        assert_eq!(settings.social_links.len(), 1);
        assert_eq!(settings.social_links[0].platform, "Behance");
    }

    #[test]
    fn test_social_icon_text() {
        let link = SocialLink {
            platform: "instagram".to_string(),
            url: "https://instagram.com/x".to_string(),
        };
        assert_eq!(link.icon_text(), "IN");

        let short = SocialLink {
            platform: "x".to_string(),
            url: "https://x.com/x".to_string(),
        };
        assert_eq!(short.icon_text(), "X");
    }

    #[test]
    fn test_skill_clamped_percent() {
        let mut skill = Skill {
            id: SkillId::new(1),
            name: "Typography".to_string(),
            percent: 130,
            display_order: None,
        };
        assert_eq!(skill.clamped_percent(), 100);
        skill.percent = -5;
        assert_eq!(skill.clamped_percent(), 0);
        skill.percent = 85;
        assert_eq!(skill.clamped_percent(), 85);
    }
}
