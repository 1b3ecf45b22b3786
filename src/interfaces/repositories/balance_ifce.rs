use async_trait::async_trait;

use crate::{
    entities::balance::{Balance, BalanceAmounts},
    middleware::error::AppResult,
};

#[async_trait]
pub trait BalanceRepositoryInterface {
    async fn get_by_user(&self, user_key: &str) -> AppResult<Option<Balance>>;
    async fn list(&self) -> AppResult<Vec<Balance>>;
    async fn set_amounts(&self, user_key: &str, amounts: BalanceAmounts) -> AppResult<Balance>;
}
