use std::sync::Arc;

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use tower_cookies::Cookies;
use tracing::warn;

use crate::{
    entities::profile::{Profile, Role},
    interfaces::repositories::profile_ifce::ProfileRepositoryInterface,
    middleware::{
        auth_with_login_access::AuthWithLoginAccess,
        ctx::Ctx,
        error::{AppError, CtxError},
        mw_ctx::{remove_jwt_cookie, CtxState},
    },
};

/// Immutable snapshot of the signed-in, non-banned profile for one request.
#[derive(Debug, Clone)]
pub struct Session {
    pub ctx: Ctx,
    pub profile: Profile,
}

impl Session {
    pub fn user_key(&self) -> String {
        self.profile.user_key()
    }
}

#[async_trait]
impl FromRequestParts<Arc<CtxState>> for Session {
    type Rejection = CtxError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<CtxState>,
    ) -> Result<Self, Self::Rejection> {
        let AuthWithLoginAccess { user_key, ctx } =
            AuthWithLoginAccess::from_request_parts(parts, state).await?;

        let profile = state
            .db
            .profiles
            .get_by_key(&user_key)
            .await
            .map_err(|e| ctx.to_ctx_error(e))?
            .ok_or_else(|| ctx.to_ctx_error(AppError::AuthFailNoJwtCookie))?;

        if profile.is_banned {
            warn!(%user_key, "banned account used a session");
            if let Ok(cookies) = Cookies::from_request_parts(parts, state).await {
                remove_jwt_cookie(&cookies);
            }
            return Err(ctx.to_ctx_error(AppError::AccountBanned));
        }

        Ok(Session { ctx, profile })
    }
}

/// Session of an administrator; anyone else gets `Forbidden`.
#[derive(Debug, Clone)]
pub struct AdminSession(pub Session);

#[async_trait]
impl FromRequestParts<Arc<CtxState>> for AdminSession {
    type Rejection = CtxError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<CtxState>,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;
        if session.profile.role() != Role::Admin {
            warn!(user_key = %session.user_key(), "non admin on admin route");
            return Err(session.ctx.to_ctx_error(AppError::Forbidden));
        }
        Ok(AdminSession(session))
    }
}
