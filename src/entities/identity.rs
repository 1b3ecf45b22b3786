use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub id: Thing,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
