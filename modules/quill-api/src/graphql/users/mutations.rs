use async_graphql::*;
use quill_db::Database;

use super::types::GqlUser;
use crate::graphql::error;
use crate::models::User;

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    /// Create a user. Names are unique.
    async fn create_user(&self, ctx: &Context<'_>, name: String) -> Result<GqlUser> {
        let name = name.trim();
        if name.is_empty() {
            return Err(error::bad_request("name must not be empty"));
        }

        let db = ctx.data_unchecked::<Database>();
        let user = User::create(name, db).await.map_err(error::from_db)?;
        Ok(GqlUser::from(user))
    }
}
