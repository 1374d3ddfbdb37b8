use async_graphql::dataloader::Loader;
use quill_db::Database;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::users::types::GqlUser;
use crate::models::User;

// ─── User by ID ──────────────────────────────────────────────────────────────

/// Batches `Todo.user` lookups into one `SELECT ... WHERE id = ANY($1)`.
pub struct UserByIdLoader {
    pub db: Database,
}

impl Loader<Uuid> for UserByIdLoader {
    type Value = GqlUser;
    type Error = Arc<anyhow::Error>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        let users = User::find_by_ids(keys, &self.db).await.map_err(Arc::new)?;

        Ok(users
            .into_iter()
            .map(|u| (u.id, GqlUser::from(u)))
            .collect())
    }
}
