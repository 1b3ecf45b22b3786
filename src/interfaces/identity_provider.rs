use async_trait::async_trait;

use crate::middleware::error::AppResult;

/// Credential store behind sign-up and password sign-in.
/// Sign-out and current-session lookup are token operations and live in the middleware.
#[async_trait]
pub trait IdentityProviderInterface {
    /// Creates an identity and returns its user key.
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<String>;
    /// Returns the user key when the credentials match.
    async fn sign_in_password(&self, email: &str, password: &str) -> AppResult<String>;
    async fn remove(&self, user_key: &str) -> AppResult<()>;
}
