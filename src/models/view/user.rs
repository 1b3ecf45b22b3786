use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::profile::{Profile, Role};

/// Profile as returned to clients. `id` is the bare user key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub is_admin: bool,
    pub is_banned: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Profile> for UserView {
    fn from(profile: &Profile) -> Self {
        UserView {
            id: profile.user_key(),
            username: profile.username.clone(),
            email: profile.email.clone(),
            role: profile.role(),
            is_admin: profile.is_admin,
            is_banned: profile.is_banned,
            created_at: profile.created_at,
        }
    }
}

impl From<Profile> for UserView {
    fn from(profile: Profile) -> Self {
        UserView::from(&profile)
    }
}
