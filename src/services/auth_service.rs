use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use validator::Validate;

use crate::{
    entities::profile::Profile,
    interfaces::{
        identity_provider::IdentityProviderInterface,
        repositories::profile_ifce::ProfileRepositoryInterface,
    },
    middleware::{
        ctx::Ctx,
        error::{AppError, CtxResult},
    },
    utils::{
        jwt::JWT,
        validate_utils::{is_email_identifier, trim_string, validate_username},
    },
};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct AuthLoginInput {
    /// Email or username.
    #[serde(deserialize_with = "trim_string")]
    #[validate(length(min = 1, message = "Email or username is required"))]
    pub identifier: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct AuthRegisterInput {
    #[serde(deserialize_with = "trim_string")]
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[serde(deserialize_with = "trim_string")]
    #[validate(custom(function = validate_username))]
    pub username: String,
    #[validate(length(min = 6, message = "Min 6 characters"))]
    pub password: String,
    pub confirm_password: String,
}

pub struct AuthService<'a, I, P>
where
    I: IdentityProviderInterface + Send + Sync,
    P: ProfileRepositoryInterface + Send + Sync,
{
    ctx: &'a Ctx,
    jwt: &'a JWT,
    identity_provider: &'a I,
    profile_repository: &'a P,
}

impl<'a, I, P> AuthService<'a, I, P>
where
    I: IdentityProviderInterface + Send + Sync,
    P: ProfileRepositoryInterface + Send + Sync,
{
    pub fn new(
        ctx: &'a Ctx,
        jwt: &'a JWT,
        identity_provider: &'a I,
        profile_repository: &'a P,
    ) -> AuthService<'a, I, P> {
        AuthService {
            ctx,
            jwt,
            identity_provider,
            profile_repository,
        }
    }

    /// Resolves the identifier to an email, verifies the password and refuses
    /// banned accounts. Returns the login token with the profile.
    pub async fn login_password(&self, input: AuthLoginInput) -> CtxResult<(String, Profile)> {
        input.validate().map_err(|e| self.ctx.to_ctx_error(e.into()))?;

        let email = if is_email_identifier(&input.identifier) {
            input.identifier.clone()
        } else {
            self.profile_repository
                .get_by_username(&input.identifier)
                .await
                .map_err(|e| self.ctx.to_ctx_error(e))?
                .map(|p| p.email)
                .ok_or_else(|| self.ctx.to_ctx_error(AppError::InvalidCredentials))?
        };

        let user_key = self
            .identity_provider
            .sign_in_password(&email, &input.password)
            .await
            .map_err(|e| {
                warn!(req_id = %self.ctx.req_id(), "password sign in failed");
                self.ctx.to_ctx_error(e)
            })?;

        let profile = self
            .profile_repository
            .get_by_key(&user_key)
            .await
            .map_err(|e| self.ctx.to_ctx_error(e))?
            .ok_or_else(|| self.ctx.to_ctx_error(AppError::InvalidCredentials))?;

        if profile.is_banned {
            warn!(%user_key, "banned account tried to log in");
            return Err(self.ctx.to_ctx_error(AppError::AccountBanned));
        }

        let token = self
            .jwt
            .create_by_login(&user_key)
            .map_err(|e| self.ctx.to_ctx_error(e))?;
        info!(%user_key, "logged in");
        Ok((token, profile))
    }

    /// Creates the identity, then the profile with its balance. A failed
    /// profile insert removes the identity again.
    pub async fn register_password(
        &self,
        input: AuthRegisterInput,
    ) -> CtxResult<(String, Profile)> {
        if input.password != input.confirm_password {
            return Err(self.ctx.to_ctx_error(AppError::PasswordsDoNotMatch));
        }

        input.validate().map_err(|e| self.ctx.to_ctx_error(e.into()))?;

        let taken = self
            .profile_repository
            .exists_by_username(&input.username)
            .await
            .map_err(|e| self.ctx.to_ctx_error(e))?;
        if taken {
            return Err(self.ctx.to_ctx_error(AppError::UsernameTaken));
        }

        let user_key = self
            .identity_provider
            .sign_up(&input.email, &input.password)
            .await
            .map_err(|e| self.ctx.to_ctx_error(e))?;

        let profile = match self
            .profile_repository
            .create_with_balance(&user_key, &input.username, &input.email)
            .await
        {
            Ok(profile) => profile,
            Err(err) => {
                if let Err(remove_err) = self.identity_provider.remove(&user_key).await {
                    error!(%user_key, error = %remove_err, "could not remove identity after failed signup");
                }
                return Err(self.ctx.to_ctx_error(err));
            }
        };

        let token = self
            .jwt
            .create_by_login(&user_key)
            .map_err(|e| self.ctx.to_ctx_error(e))?;
        info!(%user_key, username = %profile.username, "registered");
        Ok((token, profile))
    }
}
