use std::sync::Arc;

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

use crate::middleware::{
    ctx::Ctx,
    error::{AppError, CtxError},
    mw_ctx::CtxState,
};

/// Requires a valid login token from the bearer header or the `jwt` cookie.
#[derive(Debug)]
pub struct AuthWithLoginAccess {
    pub user_key: String,
    pub ctx: Ctx,
}

#[async_trait]
impl FromRequestParts<Arc<CtxState>> for AuthWithLoginAccess {
    type Rejection = CtxError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<CtxState>,
    ) -> Result<Self, Self::Rejection> {
        let ctx = Ctx::from_request_parts(parts, state)
            .await
            .map_err(|status| {
                CtxError::from(AppError::Generic {
                    description: status.to_string(),
                })
            })?;
        let user_key = ctx.user_key()?;
        Ok(AuthWithLoginAccess { user_key, ctx })
    }
}
