use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{extract::State, response::Html, routing::get, Router};
use quill_db::Database;
use tower_http::trace::TraceLayer;

use crate::graphql::{self, AppSchema};

/// Path of the GraphQL endpoint; the explorer UI posts here.
pub const QUERY_PATH: &str = "/query";

pub fn build_router(db: Database) -> Router {
    let schema = graphql::build_schema(db);

    Router::new()
        .route("/", get(playground))
        .route(QUERY_PATH, get(graphql_handler).post(graphql_handler))
        .with_state(AppState { schema })
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
}

#[derive(Clone)]
pub struct AppState {
    schema: AppSchema,
}

async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    let response = state.schema.execute(req.into_inner()).await;
    if !response.errors.is_empty() {
        tracing::warn!(errors = ?response.errors, "GraphQL errors");
    }
    response.into()
}

async fn playground() -> Html<String> {
    Html(
        GraphiQLSource::build()
            .endpoint(QUERY_PATH)
            .title("GraphQL playground")
            .finish(),
    )
}
