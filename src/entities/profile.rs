use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;
use surrealdb::sql::Thing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Thing,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub is_banned: bool,
    #[serde(default)]
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Key shared with the identity and balance records of this account.
    pub fn user_key(&self) -> String {
        self.id.id.to_raw()
    }

    pub fn role(&self) -> Role {
        if self.is_admin {
            Role::Admin
        } else {
            Role::User
        }
    }
}
