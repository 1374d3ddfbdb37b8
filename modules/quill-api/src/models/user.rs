use anyhow::Result;
use chrono::{DateTime, Utc};
use quill_db::Database;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub async fn create(name: &str, db: &Database) -> Result<Self> {
        db.fetch_one(
            sqlx::query_as::<_, Self>(
                "INSERT INTO users (id, name) VALUES ($1, $2) RETURNING *",
            )
            .bind(Uuid::new_v4())
            .bind(name),
        )
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: Uuid, db: &Database) -> Result<Option<Self>> {
        db.fetch_optional(
            sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1").bind(id),
        )
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_ids(ids: &[Uuid], db: &Database) -> Result<Vec<Self>> {
        db.fetch_all(
            sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = ANY($1)").bind(ids),
        )
        .await
        .map_err(Into::into)
    }

    pub async fn find_all(db: &Database) -> Result<Vec<Self>> {
        db.fetch_all(sqlx::query_as::<_, Self>(
            "SELECT * FROM users ORDER BY created_at, id",
        ))
        .await
        .map_err(Into::into)
    }
}
