use std::str::FromStr;

use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::debug;

use crate::error::AppError;
use crate::models::UserInfo;

pub const TOKEN_KEY: &str = "token";
pub const USER_INFO_KEY: &str = "userInfo";
pub const USER_EMAIL_KEY: &str = "userEmail";
pub const DARK_MODE_KEY: &str = "darkMode";

/// Persistent key/value session storage (token, cached profile, preferences).
#[derive(Clone, Debug)]
pub struct SessionStore {
    db: SqlitePool,
}

impl SessionStore {
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Every connection to an in-memory database sees its own copy.
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let store = Self { db: pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    pub fn from_pool(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS session_entries (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.db)
        .await?;
        Ok(())
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let value = sqlx::query_scalar::<_, String>(
            "SELECT value FROM session_entries WHERE key = ?1",
        )
        .bind(key)
        .fetch_optional(&self.db)
        .await?;
        Ok(value)
    }

    /// Single statement upsert, so concurrent writers never observe a half
    /// written entry. Last write wins.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r#"
            INSERT INTO session_entries (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.db)
        .await?;
        debug!("session key {} updated", key);
        Ok(())
    }

    pub async fn remove(&self, key: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM session_entries WHERE key = ?1")
            .bind(key)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn token(&self) -> Result<Option<String>, AppError> {
        self.get(TOKEN_KEY).await
    }

    pub async fn user_email(&self) -> Result<Option<String>, AppError> {
        self.get(USER_EMAIL_KEY).await
    }

    pub async fn user_info(&self) -> Result<Option<UserInfo>, AppError> {
        match self.get(USER_INFO_KEY).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Stores all login derived keys in one transaction.
    pub async fn save_login(&self, info: &UserInfo) -> Result<(), AppError> {
        let blob = serde_json::to_string(info)?;
        let now = Utc::now().to_rfc3339();
        let mut tx = self.db.begin().await?;
        for (key, value) in [
            (TOKEN_KEY, info.token.as_str()),
            (USER_INFO_KEY, blob.as_str()),
            (USER_EMAIL_KEY, info.profile.email.as_str()),
        ] {
            sqlx::query(
                r#"
                INSERT INTO session_entries (key, value, updated_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(key)
            .bind(value)
            .bind(&now)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    pub async fn clear_login(&self) -> Result<(), AppError> {
        sqlx::query("DELETE FROM session_entries WHERE key IN (?1, ?2, ?3)")
            .bind(TOKEN_KEY)
            .bind(USER_INFO_KEY)
            .bind(USER_EMAIL_KEY)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    pub async fn dark_mode(&self) -> Result<bool, AppError> {
        Ok(self.get(DARK_MODE_KEY).await?.as_deref() == Some("true"))
    }

    pub async fn set_dark_mode(&self, enabled: bool) -> Result<(), AppError> {
        self.set(DARK_MODE_KEY, if enabled { "true" } else { "false" })
            .await
    }
}
