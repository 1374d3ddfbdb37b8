use async_graphql::ErrorExtensions;

fn coded(message: String, code: &'static str) -> async_graphql::Error {
    async_graphql::Error::new(message).extend_with(|_, e| e.set("code", code))
}

/// NOT_FOUND error for a missing todo or user.
pub fn not_found(what: impl std::fmt::Display) -> async_graphql::Error {
    coded(format!("not found: {what}"), "NOT_FOUND")
}

/// BAD_REQUEST error for input rejected before touching the database.
pub fn bad_request(msg: impl std::fmt::Display) -> async_graphql::Error {
    coded(format!("invalid input: {msg}"), "BAD_REQUEST")
}

/// INTERNAL error. The detail goes to the log, never to the client.
pub fn internal(msg: impl std::fmt::Display) -> async_graphql::Error {
    tracing::error!("internal error: {msg}");
    coded("internal error".to_string(), "INTERNAL")
}

/// Map a model error: unique violations become CONFLICT, anything else
/// INTERNAL.
pub fn from_db(err: anyhow::Error) -> async_graphql::Error {
    let unique = err
        .downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .is_some_and(|e| e.is_unique_violation());

    if unique {
        coded("already exists".to_string(), "CONFLICT")
    } else {
        internal(err)
    }
}
