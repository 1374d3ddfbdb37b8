use async_graphql::*;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::User;

#[derive(SimpleObject, Clone)]
#[graphql(name = "User")]
pub struct GqlUser {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for GqlUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            created_at: u.created_at,
        }
    }
}
