pub mod error;
pub mod loaders;
pub mod todos;
pub mod users;

use async_graphql::dataloader::DataLoader;
use async_graphql::*;
use quill_db::Database;

use loaders::UserByIdLoader;

/// Merged query root composing all domain query modules.
#[derive(MergedObject, Default)]
pub struct QueryRoot(todos::TodoQuery, users::UserQuery);

/// Merged mutation root composing all domain mutation modules.
#[derive(MergedObject, Default)]
pub struct MutationRoot(
    todos::mutations::TodoMutation,
    users::mutations::UserMutation,
);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Schema builder with the query limits applied. No context data attached.
pub fn schema_builder() -> SchemaBuilder<QueryRoot, MutationRoot, EmptySubscription> {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .limit_depth(10)
    .limit_complexity(1000)
}

pub fn build_schema(db: Database) -> AppSchema {
    schema_builder()
        .data(DataLoader::new(
            UserByIdLoader { db: db.clone() },
            tokio::spawn,
        ))
        .data(db)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sdl_exposes_todo_schema() {
        let sdl = schema_builder().finish().sdl();
        for needle in [
            "type Todo",
            "type User",
            "input NewTodo",
            "todos: [Todo!]!",
            "users: [User!]!",
            "createTodo(input: NewTodo!): Todo!",
            "createUser(name: String!): User!",
            "setTodoDone(id: UUID!, done: Boolean!): Todo",
            "deleteTodo(id: UUID!): Boolean!",
        ] {
            assert!(sdl.contains(needle), "missing `{needle}` in:\n{sdl}");
        }
    }
}
