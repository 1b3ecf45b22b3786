use crate::{
    entities::profile::Profile,
    interfaces::repositories::profile_ifce::ProfileRepositoryInterface,
    middleware::{ctx::Ctx, error::CtxResult},
    models::view::session::SessionRoute,
};

/// Outcome of resolving the request credentials to a profile.
#[derive(Debug, Clone)]
pub enum SessionState {
    /// No token, an invalid token or a token without a profile.
    Anonymous,
    /// The session must be cleared.
    Banned(Profile),
    Active(Profile),
}

impl SessionState {
    pub fn route(&self) -> SessionRoute {
        match self {
            SessionState::Anonymous | SessionState::Banned(_) => SessionRoute::Login,
            SessionState::Active(profile) => SessionRoute::for_profile(profile),
        }
    }
}

pub struct SessionService<'a, P>
where
    P: ProfileRepositoryInterface + Send + Sync,
{
    ctx: &'a Ctx,
    profile_repository: &'a P,
}

impl<'a, P> SessionService<'a, P>
where
    P: ProfileRepositoryInterface + Send + Sync,
{
    pub fn new(ctx: &'a Ctx, profile_repository: &'a P) -> Self {
        SessionService {
            ctx,
            profile_repository,
        }
    }

    /// Storage failures are returned as errors, never as `Anonymous`.
    pub async fn resolve(&self) -> CtxResult<SessionState> {
        let user_key = match self.ctx.user_key() {
            Ok(key) => key,
            Err(_) => return Ok(SessionState::Anonymous),
        };

        let profile = self
            .profile_repository
            .get_by_key(&user_key)
            .await
            .map_err(|e| self.ctx.to_ctx_error(e))?;

        Ok(match profile {
            None => SessionState::Anonymous,
            Some(profile) if profile.is_banned => SessionState::Banned(profile),
            Some(profile) => SessionState::Active(profile),
        })
    }
}
