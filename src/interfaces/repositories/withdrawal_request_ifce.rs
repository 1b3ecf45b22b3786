use async_trait::async_trait;

use crate::{
    entities::withdrawal_request::{WithdrawalRequest, WithdrawalStatus},
    middleware::error::AppResult,
};

#[async_trait]
pub trait WithdrawalRequestRepositoryInterface {
    async fn create(&self, user_key: &str, amount: i64) -> AppResult<WithdrawalRequest>;
    async fn get(&self, withdrawal_key: &str) -> AppResult<Option<WithdrawalRequest>>;
    /// All requests newest first, with the requester's username and email embedded.
    async fn list_with_users(
        &self,
        status: Option<WithdrawalStatus>,
    ) -> AppResult<Vec<WithdrawalRequest>>;
    async fn list_by_user(&self, user_key: &str) -> AppResult<Vec<WithdrawalRequest>>;
    /// Moves a pending request to `status`. Returns `None` when the request
    /// does not exist or is no longer pending.
    async fn process(
        &self,
        withdrawal_key: &str,
        status: WithdrawalStatus,
        processed_by: &str,
    ) -> AppResult<Option<WithdrawalRequest>>;
}
