use std::collections::HashMap;

use tracing::{info, warn};

use crate::{
    entities::{
        balance::BalanceAmounts,
        profile::Profile,
        withdrawal_request::WithdrawalStatus,
    },
    interfaces::repositories::{
        balance_ifce::BalanceRepositoryInterface, profile_ifce::ProfileRepositoryInterface,
        withdrawal_request_ifce::WithdrawalRequestRepositoryInterface,
    },
    middleware::{
        ctx::Ctx,
        error::{AppError, CtxResult},
    },
    models::view::{
        dashboard::{AdminDashboardView, AdminStats, AdminUserRow},
        user::UserView,
        withdrawal::WithdrawalView,
    },
};

pub struct AdminService<'a, P, B, W>
where
    P: ProfileRepositoryInterface + Send + Sync,
    B: BalanceRepositoryInterface + Send + Sync,
    W: WithdrawalRequestRepositoryInterface + Send + Sync,
{
    ctx: &'a Ctx,
    profile_repository: &'a P,
    balance_repository: &'a B,
    withdrawal_repository: &'a W,
}

impl<'a, P, B, W> AdminService<'a, P, B, W>
where
    P: ProfileRepositoryInterface + Send + Sync,
    B: BalanceRepositoryInterface + Send + Sync,
    W: WithdrawalRequestRepositoryInterface + Send + Sync,
{
    pub fn new(
        ctx: &'a Ctx,
        profile_repository: &'a P,
        balance_repository: &'a B,
        withdrawal_repository: &'a W,
    ) -> Self {
        AdminService {
            ctx,
            profile_repository,
            balance_repository,
            withdrawal_repository,
        }
    }

    /// All profiles joined with their balances, oldest account first.
    pub async fn users(&self) -> CtxResult<Vec<AdminUserRow>> {
        let profiles = self
            .profile_repository
            .list()
            .await
            .map_err(|e| self.ctx.to_ctx_error(e))?;
        let balances: HashMap<String, BalanceAmounts> = self
            .balance_repository
            .list()
            .await
            .map_err(|e| self.ctx.to_ctx_error(e))?
            .iter()
            .map(|b| (b.user.id.to_raw(), BalanceAmounts::from(b)))
            .collect();

        Ok(profiles
            .into_iter()
            .map(|profile| {
                let amounts = balances
                    .get(&profile.user_key())
                    .copied()
                    .unwrap_or_default();
                AdminUserRow {
                    user: UserView::from(profile),
                    earnings: amounts.earnings,
                    completed_tasks: amounts.completed_tasks,
                }
            })
            .collect())
    }

    pub async fn withdrawals(
        &self,
        status: Option<WithdrawalStatus>,
    ) -> CtxResult<Vec<WithdrawalView>> {
        let list = self
            .withdrawal_repository
            .list_with_users(status)
            .await
            .map_err(|e| self.ctx.to_ctx_error(e))?;
        Ok(list.into_iter().map(WithdrawalView::from).collect())
    }

    pub async fn stats(&self) -> CtxResult<AdminStats> {
        let users = self.users().await?;
        let withdrawals = self.withdrawals(None).await?;
        Ok(AdminStats::compute(&users, &withdrawals))
    }

    /// Stats are computed over the same rows that are returned.
    pub async fn dataset(&self, admin: &Profile) -> CtxResult<AdminDashboardView> {
        let users = self.users().await?;
        let withdrawals = self.withdrawals(None).await?;
        Ok(AdminDashboardView {
            user: UserView::from(admin),
            stats: AdminStats::compute(&users, &withdrawals),
            users,
            withdrawals,
        })
    }

    pub async fn set_banned(&self, admin: &Profile, user_key: &str, banned: bool) -> CtxResult<()> {
        let profile = self
            .profile_repository
            .set_banned(user_key, banned)
            .await
            .map_err(|e| self.ctx.to_ctx_error(e))?;
        info!(
            admin = %admin.user_key(),
            user = %profile.user_key(),
            banned,
            "ban flag updated"
        );
        Ok(())
    }

    /// Moves a pending withdrawal to `status`; anything else is rejected untouched.
    pub async fn process_withdrawal(
        &self,
        admin: &Profile,
        withdrawal_key: &str,
        status: WithdrawalStatus,
    ) -> CtxResult<WithdrawalView> {
        if !status.is_terminal() {
            return Err(self.ctx.to_ctx_error(AppError::Generic {
                description: "Withdrawal can only be approved or denied".to_string(),
            }));
        }

        let updated = self
            .withdrawal_repository
            .process(withdrawal_key, status, &admin.user_key())
            .await
            .map_err(|e| self.ctx.to_ctx_error(e))?;

        match updated {
            Some(request) => {
                info!(
                    admin = %admin.user_key(),
                    withdrawal = withdrawal_key,
                    %status,
                    "withdrawal processed"
                );
                Ok(WithdrawalView::from(request))
            }
            None => {
                let existing = self
                    .withdrawal_repository
                    .get(withdrawal_key)
                    .await
                    .map_err(|e| self.ctx.to_ctx_error(e))?;
                let error = match existing {
                    None => AppError::EntityFailIdNotFound {
                        ident: withdrawal_key.to_string(),
                    },
                    Some(_) => AppError::WithdrawalAlreadyProcessed {
                        id: withdrawal_key.to_string(),
                    },
                };
                warn!(withdrawal = withdrawal_key, %status, "withdrawal not processed");
                Err(self.ctx.to_ctx_error(error))
            }
        }
    }
}
