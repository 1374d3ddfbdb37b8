use async_graphql::*;
use quill_db::Database;
use uuid::Uuid;

use super::types::GqlTodo;
use crate::graphql::error;
use crate::models::{Todo, User};

#[derive(InputObject)]
pub struct NewTodo {
    pub text: String,
    pub user_id: Uuid,
}

#[derive(Default)]
pub struct TodoMutation;

#[Object]
impl TodoMutation {
    async fn create_todo(&self, ctx: &Context<'_>, input: NewTodo) -> Result<GqlTodo> {
        let text = input.text.trim();
        if text.is_empty() {
            return Err(error::bad_request("text must not be empty"));
        }

        let db = ctx.data_unchecked::<Database>();
        if User::find_by_id(input.user_id, db)
            .await
            .map_err(error::internal)?
            .is_none()
        {
            return Err(error::not_found(format!("user {}", input.user_id)));
        }

        let todo = Todo::create(text, input.user_id, db)
            .await
            .map_err(error::from_db)?;
        Ok(GqlTodo::from(todo))
    }

    /// Mark a todo done or not done. Returns null for an unknown id.
    async fn set_todo_done(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        done: bool,
    ) -> Result<Option<GqlTodo>> {
        let db = ctx.data_unchecked::<Database>();
        let todo = Todo::set_done(id, done, db)
            .await
            .map_err(error::internal)?;
        Ok(todo.map(GqlTodo::from))
    }

    /// Returns whether a todo was deleted.
    async fn delete_todo(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        let db = ctx.data_unchecked::<Database>();
        Todo::delete(id, db).await.map_err(error::internal)
    }
}
