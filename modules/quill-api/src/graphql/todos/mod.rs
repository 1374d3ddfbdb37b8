pub mod mutations;
pub mod types;

use async_graphql::*;
use quill_db::Database;
use uuid::Uuid;

use crate::graphql::error;
use crate::models::Todo;
use types::GqlTodo;

#[derive(Default)]
pub struct TodoQuery;

#[Object]
impl TodoQuery {
    /// All todos, oldest first.
    async fn todos(&self, ctx: &Context<'_>) -> Result<Vec<GqlTodo>> {
        let db = ctx.data_unchecked::<Database>();
        let todos = Todo::find_all(db).await.map_err(error::internal)?;
        Ok(todos.into_iter().map(GqlTodo::from).collect())
    }

    /// Fetch a single todo by ID.
    async fn todo(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<GqlTodo>> {
        let db = ctx.data_unchecked::<Database>();
        let todo = Todo::find_by_id(id, db).await.map_err(error::internal)?;
        Ok(todo.map(GqlTodo::from))
    }
}
