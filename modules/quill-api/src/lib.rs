pub mod graphql;
pub mod models;
pub mod routes;
