//! Content collection repository.
//!
//! Saves replace every bound field of a row (last writer wins; there is
//! no version token), and each mutation notifies the public site's
//! change feed before returning.

use sqlx::PgPool;

use atelier_core::{
    CONTENT_CHANNEL, Collection, Notification, NotificationId, SiteSettings, Skill, SkillId, Work,
    WorkId,
};

use super::RepositoryError;

/// Key of the site settings singleton document.
pub const SETTINGS_KEY: &str = "main";

/// Fields bound by the work form.
#[derive(Debug, Clone)]
pub struct WorkDraft {
    pub title: String,
    pub category: String,
    pub description: String,
    pub project_url: Option<String>,
    pub visible: bool,
    pub display_order: Option<i32>,
    pub image_url: Option<String>,
}

/// Fields bound by the skill form.
#[derive(Debug, Clone)]
pub struct SkillDraft {
    pub name: String,
    pub percent: i32,
    pub display_order: Option<i32>,
}

/// Fields bound by the notification form.
///
/// `created_at` is deliberately absent: the database stamps it at insert
/// and updates never touch it.
#[derive(Debug, Clone)]
pub struct NotificationDraft {
    pub message: String,
    pub cta_label: String,
    pub cta_url: Option<String>,
    pub active: bool,
    pub start_at: Option<chrono::DateTime<chrono::Utc>>,
    pub end_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Repository for the content collections.
pub struct ContentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContentRepository<'a> {
    /// Create a new content repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Tell the public site which collection changed.
    ///
    /// Failures here are logged and swallowed: the write itself
    /// succeeded, and the site falls back to its stale snapshot until
    /// the next change.
    async fn notify_changed(&self, collection: Collection) {
        let result = sqlx::query("SELECT pg_notify($1, $2)")
            .bind(CONTENT_CHANNEL)
            .bind(collection.as_str())
            .execute(self.pool)
            .await;

        if let Err(error) = result {
            tracing::error!(%collection, %error, "failed to publish content change");
        }
    }

    // =========================================================================
    // Site settings (singleton)
    // =========================================================================

    /// Load the settings singleton, if it has been written yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails and
    /// `DataCorruption` if the stored document does not deserialize.
    pub async fn get_settings(&self) -> Result<Option<SiteSettings>, RepositoryError> {
        let row: Option<(serde_json::Value,)> =
            sqlx::query_as("SELECT value FROM site_settings WHERE key = $1")
                .bind(SETTINGS_KEY)
                .fetch_optional(self.pool)
                .await?;

        row.map(|(value,)| {
            serde_json::from_value(value).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid settings document: {e}"))
            })
        })
        .transpose()
    }

    /// Replace the settings singleton with `settings`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn save_settings(&self, settings: &SiteSettings) -> Result<(), RepositoryError> {
        let value = serde_json::to_value(settings).map_err(|e| {
            RepositoryError::DataCorruption(format!("unserializable settings document: {e}"))
        })?;

        sqlx::query(
            r"
            INSERT INTO site_settings (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = $2, updated_at = NOW()
            ",
        )
        .bind(SETTINGS_KEY)
        .bind(value)
        .execute(self.pool)
        .await?;

        self.notify_changed(Collection::Settings).await;
        Ok(())
    }

    // =========================================================================
    // Works
    // =========================================================================

    /// All works ordered for the console list (same rule as the public
    /// side, but unfiltered by visibility).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_works(&self) -> Result<Vec<Work>, RepositoryError> {
        let works = sqlx::query_as::<_, Work>(
            r"
            SELECT id, title, category, description, project_url, visible,
                   display_order, image_url
            FROM works
            ORDER BY COALESCE(display_order, 0) ASC, id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(works)
    }

    /// Load one work by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_work(&self, id: WorkId) -> Result<Option<Work>, RepositoryError> {
        let work = sqlx::query_as::<_, Work>(
            r"
            SELECT id, title, category, description, project_url, visible,
                   display_order, image_url
            FROM works
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(work)
    }

    /// Insert a new work with a server-assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create_work(&self, draft: &WorkDraft) -> Result<Work, RepositoryError> {
        let work = sqlx::query_as::<_, Work>(
            r"
            INSERT INTO works (title, category, description, project_url, visible,
                               display_order, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, category, description, project_url, visible,
                      display_order, image_url
            ",
        )
        .bind(&draft.title)
        .bind(&draft.category)
        .bind(&draft.description)
        .bind(&draft.project_url)
        .bind(draft.visible)
        .bind(draft.display_order)
        .bind(&draft.image_url)
        .fetch_one(self.pool)
        .await?;

        self.notify_changed(Collection::Works).await;
        Ok(work)
    }

    /// Overwrite every bound field of an existing work.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has this ID and
    /// `Database` if the update fails.
    pub async fn update_work(&self, id: WorkId, draft: &WorkDraft) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE works
            SET title = $2, category = $3, description = $4, project_url = $5,
                visible = $6, display_order = $7, image_url = $8
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.category)
        .bind(&draft.description)
        .bind(&draft.project_url)
        .bind(draft.visible)
        .bind(draft.display_order)
        .bind(&draft.image_url)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.notify_changed(Collection::Works).await;
        Ok(())
    }

    /// Delete a work.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has this ID and
    /// `Database` if the delete fails.
    pub async fn delete_work(&self, id: WorkId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM works WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.notify_changed(Collection::Works).await;
        Ok(())
    }

    // =========================================================================
    // Skills
    // =========================================================================

    /// All skills ordered for the console list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_skills(&self) -> Result<Vec<Skill>, RepositoryError> {
        let skills = sqlx::query_as::<_, Skill>(
            r"
            SELECT id, name, percent, display_order
            FROM skills
            ORDER BY COALESCE(display_order, 0) ASC, id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(skills)
    }

    /// Load one skill by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_skill(&self, id: SkillId) -> Result<Option<Skill>, RepositoryError> {
        let skill = sqlx::query_as::<_, Skill>(
            "SELECT id, name, percent, display_order FROM skills WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(skill)
    }

    /// Insert a new skill with a server-assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create_skill(&self, draft: &SkillDraft) -> Result<Skill, RepositoryError> {
        let skill = sqlx::query_as::<_, Skill>(
            r"
            INSERT INTO skills (name, percent, display_order)
            VALUES ($1, $2, $3)
            RETURNING id, name, percent, display_order
            ",
        )
        .bind(&draft.name)
        .bind(draft.percent)
        .bind(draft.display_order)
        .fetch_one(self.pool)
        .await?;

        self.notify_changed(Collection::Skills).await;
        Ok(skill)
    }

    /// Overwrite every bound field of an existing skill.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has this ID and
    /// `Database` if the update fails.
    pub async fn update_skill(
        &self,
        id: SkillId,
        draft: &SkillDraft,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE skills SET name = $2, percent = $3, display_order = $4 WHERE id = $1",
        )
        .bind(id)
        .bind(&draft.name)
        .bind(draft.percent)
        .bind(draft.display_order)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.notify_changed(Collection::Skills).await;
        Ok(())
    }

    /// Delete a skill.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has this ID and
    /// `Database` if the delete fails.
    pub async fn delete_skill(&self, id: SkillId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.notify_changed(Collection::Skills).await;
        Ok(())
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// All notifications, newest first, unfiltered by active status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_notifications(&self) -> Result<Vec<Notification>, RepositoryError> {
        let notifications = sqlx::query_as::<_, Notification>(
            r"
            SELECT id, message, cta_label, cta_url, active, created_at, start_at, end_at
            FROM notifications
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(notifications)
    }

    /// Load one notification by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_notification(
        &self,
        id: NotificationId,
    ) -> Result<Option<Notification>, RepositoryError> {
        let notification = sqlx::query_as::<_, Notification>(
            r"
            SELECT id, message, cta_label, cta_url, active, created_at, start_at, end_at
            FROM notifications
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(notification)
    }

    /// Insert a new notification; the database stamps `created_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create_notification(
        &self,
        draft: &NotificationDraft,
    ) -> Result<Notification, RepositoryError> {
        let notification = sqlx::query_as::<_, Notification>(
            r"
            INSERT INTO notifications (message, cta_label, cta_url, active, start_at, end_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, message, cta_label, cta_url, active, created_at, start_at, end_at
            ",
        )
        .bind(&draft.message)
        .bind(&draft.cta_label)
        .bind(&draft.cta_url)
        .bind(draft.active)
        .bind(draft.start_at)
        .bind(draft.end_at)
        .fetch_one(self.pool)
        .await?;

        self.notify_changed(Collection::Notifications).await;
        Ok(notification)
    }

    /// Overwrite every bound field of an existing notification.
    /// `created_at` keeps its insert-time value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has this ID and
    /// `Database` if the update fails.
    pub async fn update_notification(
        &self,
        id: NotificationId,
        draft: &NotificationDraft,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE notifications
            SET message = $2, cta_label = $3, cta_url = $4, active = $5,
                start_at = $6, end_at = $7
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(&draft.message)
        .bind(&draft.cta_label)
        .bind(&draft.cta_url)
        .bind(draft.active)
        .bind(draft.start_at)
        .bind(draft.end_at)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.notify_changed(Collection::Notifications).await;
        Ok(())
    }

    /// Delete a notification.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has this ID and
    /// `Database` if the delete fails.
    pub async fn delete_notification(&self, id: NotificationId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.notify_changed(Collection::Notifications).await;
        Ok(())
    }
}
