use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, State},
    http::{request::Parts, StatusCode},
};
use axum_extra::extract::cookie::CookieJar;
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use uuid::Uuid;

use super::error::{AppError, AppResult, CtxError, CtxResult};
use crate::middleware::mw_ctx::{CtxState, JWT_KEY};

/// Per-request context. Never rejects: a missing or bad token is kept as the
/// error of `user_key()` so handlers decide whether it matters.
#[derive(Clone, Debug)]
pub struct Ctx {
    result_user_key: AppResult<String>,
    req_id: Uuid,
}

impl Ctx {
    pub fn new(result_user_key: AppResult<String>) -> Self {
        Self {
            result_user_key,
            req_id: Uuid::new_v4(),
        }
    }

    pub fn req_id(&self) -> Uuid {
        self.req_id
    }

    pub fn user_key(&self) -> CtxResult<String> {
        self.result_user_key
            .clone()
            .map_err(|error| self.to_ctx_error(error))
    }

    pub fn to_ctx_error(&self, error: AppError) -> CtxError {
        CtxError {
            req_id: self.req_id,
            error,
        }
    }
}

/// Bearer header first, then the `jwt` cookie.
pub fn read_token(parts: &Parts) -> Option<String> {
    if let Some(Authorization(bearer)) = parts.headers.typed_get::<Authorization<Bearer>>() {
        return Some(bearer.token().to_string());
    }
    CookieJar::from_headers(&parts.headers)
        .get(JWT_KEY)
        .map(|c| c.value().to_string())
}

#[async_trait]
impl FromRequestParts<Arc<CtxState>> for Ctx {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<CtxState>,
    ) -> Result<Self, Self::Rejection> {
        let State(app_state): State<Arc<CtxState>> = State::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        let user_key = match read_token(parts) {
            Some(token) => app_state
                .jwt
                .decode(&token)
                .map(|claims| claims.auth),
            None => Err(AppError::AuthFailNoJwtCookie),
        };

        Ok(Ctx::new(user_key))
    }
}
