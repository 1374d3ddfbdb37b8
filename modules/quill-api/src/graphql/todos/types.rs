use async_graphql::dataloader::DataLoader;
use async_graphql::*;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::graphql::error;
use crate::graphql::loaders::UserByIdLoader;
use crate::graphql::users::types::GqlUser;
use crate::models::Todo;

#[derive(SimpleObject, Clone)]
#[graphql(name = "Todo", complex)]
pub struct GqlTodo {
    pub id: Uuid,
    pub text: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
    #[graphql(skip)]
    pub user_id: Uuid,
}

#[ComplexObject]
impl GqlTodo {
    /// Owner of the todo.
    async fn user(&self, ctx: &Context<'_>) -> Result<GqlUser> {
        let loader = ctx.data_unchecked::<DataLoader<UserByIdLoader>>();
        loader
            .load_one(self.user_id)
            .await
            .map_err(error::internal)?
            .ok_or_else(|| error::not_found(format!("user {}", self.user_id)))
    }
}

impl From<Todo> for GqlTodo {
    fn from(t: Todo) -> Self {
        Self {
            id: t.id,
            text: t.text,
            done: t.done,
            created_at: t.created_at,
            user_id: t.user_id,
        }
    }
}
