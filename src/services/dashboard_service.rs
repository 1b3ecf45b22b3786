use crate::{
    entities::{
        balance::BalanceAmounts,
        profile::{Profile, Role},
    },
    interfaces::repositories::{
        balance_ifce::BalanceRepositoryInterface, profile_ifce::ProfileRepositoryInterface,
        withdrawal_request_ifce::WithdrawalRequestRepositoryInterface,
    },
    middleware::{ctx::Ctx, error::CtxResult},
    models::view::{
        dashboard::{DashboardView, UserDashboardView},
        user::UserView,
    },
    services::admin_service::AdminService,
};

pub struct DashboardService<'a, P, B, W>
where
    P: ProfileRepositoryInterface + Send + Sync,
    B: BalanceRepositoryInterface + Send + Sync,
    W: WithdrawalRequestRepositoryInterface + Send + Sync,
{
    ctx: &'a Ctx,
    balance_repository: &'a B,
    admin_service: AdminService<'a, P, B, W>,
}

impl<'a, P, B, W> DashboardService<'a, P, B, W>
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
        DashboardService {
            ctx,
            balance_repository,
            admin_service: AdminService::new(
                ctx,
                profile_repository,
                balance_repository,
                withdrawal_repository,
            ),
        }
    }

    pub async fn user_dashboard(&self, profile: &Profile) -> CtxResult<UserDashboardView> {
        let balance = self
            .balance_repository
            .get_by_user(&profile.user_key())
            .await
            .map_err(|e| self.ctx.to_ctx_error(e))?;
        Ok(UserDashboardView::new(
            UserView::from(profile),
            BalanceAmounts::of(balance.as_ref()),
        ))
    }

    /// Role is dispatched here once; handlers only see the tagged view.
    pub async fn for_profile(&self, profile: &Profile) -> CtxResult<DashboardView> {
        match profile.role() {
            Role::Admin => Ok(DashboardView::Admin(
                self.admin_service.dataset(profile).await?,
            )),
            Role::User => Ok(DashboardView::User(self.user_dashboard(profile).await?)),
        }
    }
}
