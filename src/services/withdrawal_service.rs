use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::{
    entities::{balance::BalanceAmounts, profile::Profile},
    interfaces::repositories::{
        balance_ifce::BalanceRepositoryInterface,
        withdrawal_request_ifce::WithdrawalRequestRepositoryInterface,
    },
    middleware::{
        ctx::Ctx,
        error::{AppError, CtxResult},
    },
    models::view::withdrawal::WithdrawalView,
};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct WithdrawInput {
    /// minor currency units
    #[validate(range(min = 1, message = "Amount must be positive"))]
    pub amount: i64,
}

pub struct WithdrawalService<'a, B, W>
where
    B: BalanceRepositoryInterface + Send + Sync,
    W: WithdrawalRequestRepositoryInterface + Send + Sync,
{
    ctx: &'a Ctx,
    balance_repository: &'a B,
    withdrawal_repository: &'a W,
}

impl<'a, B, W> WithdrawalService<'a, B, W>
where
    B: BalanceRepositoryInterface + Send + Sync,
    W: WithdrawalRequestRepositoryInterface + Send + Sync,
{
    pub fn new(ctx: &'a Ctx, balance_repository: &'a B, withdrawal_repository: &'a W) -> Self {
        WithdrawalService {
            ctx,
            balance_repository,
            withdrawal_repository,
        }
    }

    /// Files a pending request. The balance is owned elsewhere and is not debited.
    pub async fn request(&self, profile: &Profile, input: WithdrawInput) -> CtxResult<WithdrawalView> {
        input.validate().map_err(|e| self.ctx.to_ctx_error(e.into()))?;

        let user_key = profile.user_key();
        let balance = self
            .balance_repository
            .get_by_user(&user_key)
            .await
            .map_err(|e| self.ctx.to_ctx_error(e))?;
        let amounts = BalanceAmounts::of(balance.as_ref());
        if input.amount > amounts.earnings {
            return Err(self.ctx.to_ctx_error(AppError::BalanceTooLow));
        }

        let request = self
            .withdrawal_repository
            .create(&user_key, input.amount)
            .await
            .map_err(|e| self.ctx.to_ctx_error(e))?;
        info!(%user_key, amount = input.amount, "withdrawal requested");
        Ok(WithdrawalView::from(request))
    }

    pub async fn list_for(&self, profile: &Profile) -> CtxResult<Vec<WithdrawalView>> {
        let list = self
            .withdrawal_repository
            .list_by_user(&profile.user_key())
            .await
            .map_err(|e| self.ctx.to_ctx_error(e))?;
        Ok(list.into_iter().map(WithdrawalView::from).collect())
    }
}
