use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::models::{CheckIn, Preferences, PublicUser, UpdateUserRequest, UserSummary};
use crate::services::postgres::{PostgresClient, StoreError};

/// Decode the preferences JSONB column; legacy documents with missing
/// fields fall back to all-false defaults.
fn parse_preferences(value: serde_json::Value) -> Preferences {
    serde_json::from_value(value).unwrap_or_default()
}

fn summary_from_row(row: &PgRow) -> UserSummary {
    UserSummary {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        role: row.get("role"),
        avatar: row.get("avatar"),
        joined_at: row.get("joined_at"),
    }
}

impl PostgresClient {
    /// Fetch a user's public view, including bookmarks and check-in history
    pub async fn get_user(&self, user_id: &str) -> Result<PublicUser, StoreError> {
        let query = r#"
            SELECT id, name, email, role, avatar, joined_at, preferences, bookmarks
            FROM users
            WHERE id = $1
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound("User not found".to_string()))?;

        let check_ins = self.get_check_ins(user_id).await?;

        Ok(PublicUser {
            id: row.get("id"),
            name: row.get("name"),
            email: row.get("email"),
            role: row.get("role"),
            avatar: row.get("avatar"),
            joined_at: row.get("joined_at"),
            preferences: parse_preferences(row.get("preferences")),
            bookmarks: row.get("bookmarks"),
            check_ins,
        })
    }

    async fn get_check_ins(&self, user_id: &str) -> Result<Vec<CheckIn>, StoreError> {
        let query = r#"
            SELECT shelter_id, date
            FROM check_ins
            WHERE user_id = $1
            ORDER BY date DESC
        "#;

        let rows = sqlx::query(query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(|row| CheckIn {
                shelter_id: row.get("shelter_id"),
                date: row.get("date"),
            })
            .collect())
    }

    /// List user summaries for the people directory, newest first
    pub async fn list_users(
        &self,
        exclude: Option<&str>,
    ) -> Result<Vec<UserSummary>, StoreError> {
        let query = r#"
            SELECT id, name, email, role, avatar, joined_at
            FROM users
            WHERE $1::text IS NULL OR id <> $1
            ORDER BY joined_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(exclude)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(summary_from_row).collect())
    }

    /// Whether a user record exists
    pub async fn user_exists(&self, user_id: &str) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT 1 FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// Fetch just the preferences for match scoring
    pub async fn get_preferences(&self, user_id: &str) -> Result<Preferences, StoreError> {
        let row = sqlx::query("SELECT preferences FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound("User not found".to_string()))?;

        Ok(parse_preferences(row.get("preferences")))
    }

    /// Whitelist patch of name/avatar/preferences. Preferences are
    /// replaced wholesale on save, never merged field by field.
    pub async fn update_user(
        &self,
        user_id: &str,
        updates: &UpdateUserRequest,
    ) -> Result<PublicUser, StoreError> {
        if updates.is_empty() {
            // Nothing to change; mirror the read path.
            return self.get_user(user_id).await;
        }

        let prefs_json = updates
            .preferences
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| StoreError::InvalidInput(format!("Invalid preferences: {}", e)))?;

        let query = r#"
            UPDATE users SET
                name = COALESCE($2, name),
                avatar = COALESCE($3, avatar),
                preferences = COALESCE($4, preferences)
            WHERE id = $1
        "#;

        let result = sqlx::query(query)
            .bind(user_id)
            .bind(updates.name.as_deref())
            .bind(updates.avatar.as_deref())
            .bind(prefs_json)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("User not found".to_string()));
        }

        self.get_user(user_id).await
    }

    /// Fetch a user's bookmarked shelter ids
    pub async fn get_bookmarks(&self, user_id: &str) -> Result<Vec<i64>, StoreError> {
        let row = sqlx::query("SELECT bookmarks FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound("User not found".to_string()))?;

        Ok(row.get("bookmarks"))
    }

    /// Add a bookmark; idempotent when the shelter is already saved
    pub async fn add_bookmark(
        &self,
        user_id: &str,
        shelter_id: i64,
    ) -> Result<Vec<i64>, StoreError> {
        let bookmarks = self.get_bookmarks(user_id).await?;
        if bookmarks.contains(&shelter_id) {
            return Ok(bookmarks);
        }

        let row = sqlx::query(
            "UPDATE users SET bookmarks = array_append(bookmarks, $2) WHERE id = $1 RETURNING bookmarks",
        )
        .bind(user_id)
        .bind(shelter_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("bookmarks"))
    }

    /// Remove a bookmark; absent ids are a no-op
    pub async fn remove_bookmark(
        &self,
        user_id: &str,
        shelter_id: i64,
    ) -> Result<Vec<i64>, StoreError> {
        let row = sqlx::query(
            "UPDATE users SET bookmarks = array_remove(bookmarks, $2) WHERE id = $1 RETURNING bookmarks",
        )
        .bind(user_id)
        .bind(shelter_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound("User not found".to_string()))?;

        Ok(row.get("bookmarks"))
    }
}
