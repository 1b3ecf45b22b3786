use async_trait::async_trait;

use crate::{entities::profile::Profile, middleware::error::AppResult};

#[async_trait]
pub trait ProfileRepositoryInterface {
    async fn get_by_key(&self, user_key: &str) -> AppResult<Option<Profile>>;
    async fn get_by_username(&self, username: &str) -> AppResult<Option<Profile>>;
    async fn exists_by_username(&self, username: &str) -> AppResult<bool>;
    /// Inserts the profile together with a zeroed balance in one transaction.
    async fn create_with_balance(
        &self,
        user_key: &str,
        username: &str,
        email: &str,
    ) -> AppResult<Profile>;
    async fn set_banned(&self, user_key: &str, banned: bool) -> AppResult<Profile>;
    async fn set_admin(&self, user_key: &str, admin: bool) -> AppResult<Profile>;
    async fn list(&self) -> AppResult<Vec<Profile>>;
}
