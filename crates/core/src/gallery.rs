//! Visibility, ordering, and category filtering for the public gallery.
//!
//! These are the pure transforms the site applies to raw collection rows
//! before rendering. The renderer never sorts or filters on its own; it
//! consumes the output of this module verbatim.

use crate::content::{Skill, Work};

/// Category selector token for the gallery filter buttons.
pub const ALL_CATEGORIES: &str = "all";

/// A parsed gallery category selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    /// Show every visible work.
    All,
    /// Show only works whose category matches exactly.
    Named(String),
}

impl Category {
    /// Parse a selector token. The literal `all` (any case) selects
    /// everything; any other string is an exact category match.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        if token.trim().eq_ignore_ascii_case(ALL_CATEGORIES) {
            Self::All
        } else {
            Self::Named(token.trim().to_string())
        }
    }

    /// The token form used in URLs and button labels.
    #[must_use]
    pub fn as_token(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Named(name) => name,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::All
    }
}

/// Retain visible works and sort ascending by display order.
///
/// Missing order sorts as 0. The sort is stable, so equal keys keep their
/// incoming relative order.
#[must_use]
pub fn visible_sorted(mut works: Vec<Work>) -> Vec<Work> {
    works.retain(|work| work.visible);
    works.sort_by_key(|work| work.display_order.unwrap_or(0));
    works
}

/// Sort skills ascending by display order (missing treated as 0, stable).
#[must_use]
pub fn sorted_skills(mut skills: Vec<Skill>) -> Vec<Skill> {
    skills.sort_by_key(|skill| skill.display_order.unwrap_or(0));
    skills
}

/// The subsequence of `works` matching `category`, order preserved.
///
/// `Category::All` returns the whole list. Callers pass the already
/// visible/sorted list; this function adds no ordering of its own.
#[must_use]
pub fn filter_by_category(works: &[Work], category: &Category) -> Vec<Work> {
    match category {
        Category::All => works.to_vec(),
        Category::Named(name) => works
            .iter()
            .filter(|work| work.category == *name)
            .cloned()
            .collect(),
    }
}

/// Distinct categories in first-seen order, for the filter buttons.
#[must_use]
pub fn categories(works: &[Work]) -> Vec<String> {
    let mut seen = Vec::new();
    for work in works {
        if !seen.contains(&work.category) {
            seen.push(work.category.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SkillId, WorkId};

    fn work(id: i32, title: &str, category: &str, visible: bool, order: Option<i32>) -> Work {
        Work {
            id: WorkId::new(id),
            title: title.to_string(),
            category: category.to_string(),
            description: String::new(),
            project_url: None,
            visible,
            display_order: order,
            image_url: None,
        }
    }

    #[test]
    fn test_visible_sorted_excludes_hidden_and_orders() {
        // The scenario from the public gallery: hidden works never render,
        // and display order wins over insertion order.
        let works = vec![
            work(1, "Logo Set", "Branding", true, Some(2)),
            work(2, "Poster", "Branding", true, Some(1)),
            work(3, "Draft", "Branding", false, Some(0)),
        ];

        let sorted = visible_sorted(works);
        let titles: Vec<&str> = sorted.iter().map(|w| w.title.as_str()).collect();
        assert_eq!(titles, ["Poster", "Logo Set"]);
    }

    #[test]
    fn test_missing_order_sorts_as_zero() {
        let works = vec![
            work(1, "B", "Print", true, Some(1)),
            work(2, "A", "Print", true, None),
        ];

        let sorted = visible_sorted(works);
        let titles: Vec<&str> = sorted.iter().map(|w| w.title.as_str()).collect();
        assert_eq!(titles, ["A", "B"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let works = vec![
            work(1, "First", "Print", true, Some(3)),
            work(2, "Second", "Print", true, Some(3)),
            work(3, "Third", "Print", true, Some(3)),
        ];

        let sorted = visible_sorted(works);
        let titles: Vec<&str> = sorted.iter().map(|w| w.title.as_str()).collect();
        assert_eq!(titles, ["First", "Second", "Third"]);
    }

    #[test]
    fn test_filter_by_category_named() {
        let works = vec![
            work(1, "Poster", "Branding", true, Some(1)),
            work(2, "Site", "Web", true, Some(2)),
            work(3, "Logo Set", "Branding", true, Some(3)),
        ];

        let filtered = filter_by_category(&works, &Category::parse("Branding"));
        let titles: Vec<&str> = filtered.iter().map(|w| w.title.as_str()).collect();
        assert_eq!(titles, ["Poster", "Logo Set"]);
    }

    #[test]
    fn test_filter_by_category_all_returns_everything() {
        let works = vec![
            work(1, "Poster", "Branding", true, Some(1)),
            work(2, "Site", "Web", true, Some(2)),
        ];

        let filtered = filter_by_category(&works, &Category::All);
        assert_eq!(filtered, works);
    }

    #[test]
    fn test_filter_is_exact_match() {
        let works = vec![work(1, "Poster", "Branding", true, Some(1))];
        assert!(filter_by_category(&works, &Category::parse("branding")).is_empty());
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("all"), Category::All);
        assert_eq!(Category::parse(" All "), Category::All);
        assert_eq!(
            Category::parse("Branding"),
            Category::Named("Branding".to_string())
        );
    }

    #[test]
    fn test_categories_first_seen_order() {
        let works = vec![
            work(1, "A", "Web", true, Some(1)),
            work(2, "B", "Branding", true, Some(2)),
            work(3, "C", "Web", true, Some(3)),
        ];
        assert_eq!(categories(&works), ["Web", "Branding"]);
    }

    #[test]
    fn test_sorted_skills() {
        let skills = vec![
            Skill {
                id: SkillId::new(1),
                name: "Illustration".to_string(),
                percent: 70,
                display_order: Some(2),
            },
            Skill {
                id: SkillId::new(2),
                name: "Typography".to_string(),
                percent: 90,
                display_order: None,
            },
        ];

        let sorted = sorted_skills(skills);
        let names: Vec<&str> = sorted.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Typography", "Illustration"]);
    }
}
