pub mod mutations;
pub mod types;

use async_graphql::*;
use quill_db::Database;
use uuid::Uuid;

use crate::graphql::error;
use crate::models::User;
use types::GqlUser;

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// All users, oldest first.
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<GqlUser>> {
        let db = ctx.data_unchecked::<Database>();
        let users = User::find_all(db).await.map_err(error::internal)?;
        Ok(users.into_iter().map(GqlUser::from).collect())
    }

    /// Fetch a single user by ID.
    async fn user(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<GqlUser>> {
        let db = ctx.data_unchecked::<Database>();
        let user = User::find_by_id(id, db).await.map_err(error::internal)?;
        Ok(user.map(GqlUser::from))
    }
}
