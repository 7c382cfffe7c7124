//! View models for the public templates.
//!
//! Pure builders from the content snapshot; everything here is testable
//! without a server. Templates never see domain types directly.

use chrono::{DateTime, Utc};

use atelier_core::{
    Notification, SiteSettings, Skill, Work,
    gallery::{self, Category},
    notify::{self, DismissedSet},
};

/// Site identity and footer data.
pub struct SiteView {
    pub name: String,
    pub role_text: String,
    pub description: String,
    pub profile_image_url: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub contact_address: String,
    pub footer_links: Vec<LinkView>,
    pub social_links: Vec<SocialView>,
}

/// A footer link.
pub struct LinkView {
    pub label: String,
    pub url: String,
}

/// A social link with its two-letter icon text.
pub struct SocialView {
    pub platform: String,
    pub url: String,
    pub icon_text: String,
}

/// One category filter button.
pub struct CategoryButton {
    pub token: String,
    pub label: String,
    pub active: bool,
}

/// One gallery card.
pub struct WorkView {
    pub title: String,
    pub category: String,
    pub description: String,
    pub project_url: Option<String>,
    pub image_url: Option<String>,
}

/// One skill bar.
pub struct SkillView {
    pub name: String,
    pub percent: i32,
}

/// The notification popup, when one is eligible.
pub struct NotificationView {
    pub id: i32,
    pub message: String,
    pub cta_label: String,
    pub cta_url: Option<String>,
    /// Milliseconds until `end_at`, for the client-side auto-hide timer.
    /// The gate re-suppresses server-side regardless.
    pub ends_in_ms: Option<i64>,
}

/// Build the site identity view with placeholder fallbacks applied.
#[must_use]
pub fn site_view(settings: &SiteSettings) -> SiteView {
    SiteView {
        name: settings.display_name().to_string(),
        role_text: settings.role_text.clone(),
        description: settings.description.clone(),
        profile_image_url: settings.profile_image_url.clone(),
        contact_email: settings.contact.email.clone(),
        contact_phone: settings.contact.phone.clone(),
        contact_address: settings.contact.address.clone(),
        footer_links: settings
            .footer_links
            .iter()
            .map(|link| LinkView {
                label: link.label.clone(),
                url: link.url.clone(),
            })
            .collect(),
        social_links: settings
            .social_links
            .iter()
            .map(|link| SocialView {
                platform: link.platform.clone(),
                url: link.url.clone(),
                icon_text: link.icon_text(),
            })
            .collect(),
    }
}

/// Build the category filter row: "all" first, then distinct categories
/// in first-seen order.
#[must_use]
pub fn category_buttons(works: &[Work], selected: &Category) -> Vec<CategoryButton> {
    let mut buttons = vec![CategoryButton {
        token: gallery::ALL_CATEGORIES.to_string(),
        label: "All".to_string(),
        active: *selected == Category::All,
    }];

    for category in gallery::categories(works) {
        buttons.push(CategoryButton {
            active: *selected == Category::Named(category.clone()),
            token: category.clone(),
            label: category,
        });
    }

    buttons
}

/// Build the gallery cards for the selected category.
#[must_use]
pub fn work_views(works: &[Work], selected: &Category) -> Vec<WorkView> {
    gallery::filter_by_category(works, selected)
        .into_iter()
        .map(|work| WorkView {
            title: work.title,
            category: work.category,
            description: work.description,
            project_url: work.project_url,
            image_url: work.image_url,
        })
        .collect()
}

/// Build the skill bars, percent clamped to 0-100.
#[must_use]
pub fn skill_views(skills: &[Skill]) -> Vec<SkillView> {
    skills
        .iter()
        .map(|skill| SkillView {
            name: skill.name.clone(),
            percent: skill.clamped_percent(),
        })
        .collect()
}

/// Run the gate and build the popup view for the first eligible
/// notification, if any.
#[must_use]
pub fn notification_view(
    notifications: &[Notification],
    now: DateTime<Utc>,
    dismissed: &DismissedSet,
) -> Option<NotificationView> {
    notify::first_eligible(notifications, now, dismissed).map(|notification| NotificationView {
        id: notification.id.as_i32(),
        message: notification.message.clone(),
        cta_label: notification.cta_label_or_default().to_string(),
        cta_url: notification.cta_url.clone(),
        ends_in_ms: notification
            .end_at
            .map(|end_at| (end_at - now).num_milliseconds()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::{FooterLink, NotificationId, SocialLink, WorkId};
    use chrono::TimeZone;

    fn work(id: i32, title: &str, category: &str) -> Work {
        Work {
            id: WorkId::new(id),
            title: title.to_string(),
            category: category.to_string(),
            description: String::new(),
            project_url: None,
            visible: true,
            display_order: Some(id),
            image_url: None,
        }
    }

    #[test]
    fn test_category_buttons_all_first_then_first_seen() {
        let works = vec![work(1, "A", "Web"), work(2, "B", "Print"), work(3, "C", "Web")];
        let buttons = category_buttons(&works, &Category::parse("Print"));

        let tokens: Vec<&str> = buttons.iter().map(|b| b.token.as_str()).collect();
        assert_eq!(tokens, ["all", "Web", "Print"]);

        let active: Vec<bool> = buttons.iter().map(|b| b.active).collect();
        assert_eq!(active, [false, false, true]);
    }

    #[test]
    fn test_work_views_respect_selected_category() {
        let works = vec![work(1, "A", "Web"), work(2, "B", "Print")];
        let views = work_views(&works, &Category::parse("Web"));
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].title, "A");

        let all = work_views(&works, &Category::All);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_site_view_fallback_name() {
        let view = site_view(&SiteSettings::default());
        assert_eq!(view.name, "Portfolio");
    }

    #[test]
    fn test_site_view_social_icon_text() {
        let settings = SiteSettings {
            social_links: vec![SocialLink {
                platform: "behance".to_string(),
                url: "https://behance.net/x".to_string(),
            }],
            footer_links: vec![FooterLink {
                label: "GitHub".to_string(),
                url: "https://github.com/x".to_string(),
            }],
            ..SiteSettings::default()
        };

        let view = site_view(&settings);
        assert_eq!(view.social_links[0].icon_text, "BE");
        assert_eq!(view.footer_links[0].label, "GitHub");
    }

    #[test]
    fn test_notification_view_reports_remaining_window() {
        let now = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).single().expect("instant");
        let notification = Notification {
            id: NotificationId::new(9),
            message: "Open studio this weekend".to_string(),
            cta_label: String::new(),
            cta_url: None,
            active: true,
            created_at: now,
            start_at: None,
            end_at: Some(now + chrono::Duration::minutes(30)),
        };

        let view = notification_view(&[notification], now, &DismissedSet::new())
            .expect("eligible notification");
        assert_eq!(view.id, 9);
        assert_eq!(view.cta_label, "Learn More");
        assert_eq!(view.ends_in_ms, Some(30 * 60 * 1000));
    }

    #[test]
    fn test_notification_view_none_when_dismissed() {
        let now = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).single().expect("instant");
        let notification = Notification {
            id: NotificationId::new(9),
            message: "x".to_string(),
            cta_label: "Go".to_string(),
            cta_url: None,
            active: true,
            created_at: now,
            start_at: None,
            end_at: None,
        };

        let mut dismissed = DismissedSet::new();
        dismissed.insert(NotificationId::new(9));

        assert!(notification_view(&[notification], now, &dismissed).is_none());
    }

    #[test]
    fn test_skill_views_clamp() {
        let skills = vec![Skill {
            id: atelier_core::SkillId::new(1),
            name: "Layout".to_string(),
            percent: 140,
            display_order: None,
        }];
        assert_eq!(skill_views(&skills)[0].percent, 100);
    }
}
