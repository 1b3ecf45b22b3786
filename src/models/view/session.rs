use serde::{Deserialize, Serialize};

use crate::entities::profile::{Profile, Role};
use crate::models::view::user::UserView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionRoute {
    #[serde(rename = "/login")]
    Login,
    #[serde(rename = "/dashboard")]
    Dashboard,
    #[serde(rename = "/admin")]
    Admin,
}

impl SessionRoute {
    pub fn as_path(&self) -> &'static str {
        match self {
            SessionRoute::Login => "/login",
            SessionRoute::Dashboard => "/dashboard",
            SessionRoute::Admin => "/admin",
        }
    }

    pub fn for_profile(profile: &Profile) -> Self {
        if profile.is_banned {
            return SessionRoute::Login;
        }
        match profile.role() {
            Role::Admin => SessionRoute::Admin,
            Role::User => SessionRoute::Dashboard,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionView {
    pub route: SessionRoute,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserView>,
}

/// Body of a successful login or registration.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthView {
    pub token: String,
    pub user: UserView,
    pub route: SessionRoute,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use surrealdb::sql::Thing;

    fn profile(is_admin: bool, is_banned: bool) -> Profile {
        Profile {
            id: Thing::from(("profile", "01JAYH4Q1C1Y2X3W4V5T6S7R8P")),
            username: "alice_01".to_string(),
            email: "alice@example.com".to_string(),
            is_banned,
            is_admin,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn routes_by_role() {
        assert_eq!(SessionRoute::for_profile(&profile(false, false)), SessionRoute::Dashboard);
        assert_eq!(SessionRoute::for_profile(&profile(true, false)), SessionRoute::Admin);
    }

    #[test]
    fn banned_goes_to_login_even_for_admins() {
        assert_eq!(SessionRoute::for_profile(&profile(true, true)), SessionRoute::Login);
        assert_eq!(SessionRoute::for_profile(&profile(false, true)), SessionRoute::Login);
    }

    #[test]
    fn serializes_as_path() {
        let json = serde_json::to_string(&SessionRoute::Admin).unwrap();
        assert_eq!(json, "\"/admin\"");
    }
}
