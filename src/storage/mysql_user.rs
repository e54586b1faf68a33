use chrono::Utc;
use sqlx::mysql::MySqlRow;
use sqlx::Row;

use crate::models::User;
use crate::storage::mysql::MySqlStorage;
use crate::storage::Result;

/// MySQL user record queries
pub(crate) trait MySqlUserExt {
    async fn insert_user(&self, user: &User) -> Result<()>;
    async fn select_user_by_id(&self, id: &str) -> Result<Option<User>>;
    async fn select_user_by_email(&self, email: &str) -> Result<Option<User>>;
}

impl MySqlUserExt for MySqlStorage {
    async fn insert_user(&self, user: &User) -> Result<()> {
        sqlx::query(
            r"INSERT INTO users (id, username, email, password_hash, created_at)
              VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at.timestamp())
        .execute(self.pool())
        .await?;

        Ok(())
    }

    async fn select_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r"SELECT id, username, email, password_hash, created_at
              FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        row.map(user_from_row).transpose()
    }

    async fn select_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r"SELECT id, username, email, password_hash, created_at
              FROM users WHERE LOWER(email) = LOWER(?)",
        )
        .bind(email)
        .fetch_optional(self.pool())
        .await?;

        row.map(user_from_row).transpose()
    }
}

fn user_from_row(row: MySqlRow) -> Result<User> {
    let created_at: i64 = row.try_get("created_at")?;

    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        created_at: chrono::DateTime::from_timestamp(created_at, 0).unwrap_or_else(Utc::now),
    })
}
