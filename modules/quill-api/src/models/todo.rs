use anyhow::Result;
use chrono::{DateTime, Utc};
use quill_db::Database;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    pub id: Uuid,
    pub text: String,
    pub done: bool,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Todo {
    pub async fn create(text: &str, user_id: Uuid, db: &Database) -> Result<Self> {
        db.fetch_one(
            sqlx::query_as::<_, Self>(
                "INSERT INTO todos (id, text, user_id) VALUES ($1, $2, $3) RETURNING *",
            )
            .bind(Uuid::new_v4())
            .bind(text)
            .bind(user_id),
        )
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: Uuid, db: &Database) -> Result<Option<Self>> {
        db.fetch_optional(
            sqlx::query_as::<_, Self>("SELECT * FROM todos WHERE id = $1").bind(id),
        )
        .await
        .map_err(Into::into)
    }

    pub async fn find_all(db: &Database) -> Result<Vec<Self>> {
        db.fetch_all(sqlx::query_as::<_, Self>(
            "SELECT * FROM todos ORDER BY created_at, id",
        ))
        .await
        .map_err(Into::into)
    }

    /// Returns `None` when no todo has this id.
    pub async fn set_done(id: Uuid, done: bool, db: &Database) -> Result<Option<Self>> {
        db.fetch_optional(
            sqlx::query_as::<_, Self>("UPDATE todos SET done = $1 WHERE id = $2 RETURNING *")
                .bind(done)
                .bind(id),
        )
        .await
        .map_err(Into::into)
    }

    /// Returns whether a row was deleted.
    pub async fn delete(id: Uuid, db: &Database) -> Result<bool> {
        let result = db
            .execute(sqlx::query("DELETE FROM todos WHERE id = $1").bind(id))
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
