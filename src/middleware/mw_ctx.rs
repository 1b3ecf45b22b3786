use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use chrono::Duration;
use tower_cookies::{Cookie, Cookies};

use crate::config::AppConfig;
use crate::database::client::Database;
use crate::utils::jwt::JWT;

pub const JWT_KEY: &str = "jwt";

pub struct CtxState {
    pub db: Database,
    pub is_development: bool,
    pub jwt: JWT,
}

impl Debug for CtxState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CtxState")
            .field("is_development", &self.is_development)
            .finish_non_exhaustive()
    }
}

pub fn create_ctx_state(db: Database, config: &AppConfig) -> Arc<CtxState> {
    let ctx_state = CtxState {
        db,
        is_development: config.is_development,
        jwt: JWT::new(
            config.jwt_secret.clone(),
            Duration::hours(config.jwt_duration_hours),
        ),
    };
    Arc::new(ctx_state)
}

pub fn add_jwt_cookie(cookies: &Cookies, token: String) {
    cookies.add(
        Cookie::build((JWT_KEY, token))
            // cookie must reach every route, not only the one that issued it
            .path("/")
            .http_only(true)
            .into(),
    );
}

pub fn remove_jwt_cookie(cookies: &Cookies) {
    cookies.remove(Cookie::build((JWT_KEY, "")).path("/").into());
}
