use serde::{Deserialize, Serialize};

use crate::entities::balance::BalanceAmounts;
use crate::entities::withdrawal_request::WithdrawalStatus;
use crate::models::view::{user::UserView, withdrawal::WithdrawalView};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDashboardView {
    pub user: UserView,
    pub earnings: i64,
    pub completed_tasks: i64,
    pub tokens: i64,
}

impl UserDashboardView {
    pub fn new(user: UserView, balance: BalanceAmounts) -> Self {
        UserDashboardView {
            user,
            earnings: balance.earnings,
            completed_tasks: balance.completed_tasks,
            tokens: balance.tokens,
        }
    }
}

/// Profile joined with its balance; a missing balance reads as zeros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUserRow {
    #[serde(flatten)]
    pub user: UserView,
    pub earnings: i64,
    pub completed_tasks: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_users: u64,
    pub total_earnings: i64,
    pub pending_withdrawals: u64,
}

impl AdminStats {
    /// Totals over exactly the rows passed in.
    pub fn compute(users: &[AdminUserRow], withdrawals: &[WithdrawalView]) -> Self {
        AdminStats {
            total_users: users.len() as u64,
            // earnings are written externally, so the sum saturates instead of overflowing
            total_earnings: users
                .iter()
                .fold(0i64, |acc, u| acc.saturating_add(u.earnings)),
            pending_withdrawals: withdrawals
                .iter()
                .filter(|w| w.status == WithdrawalStatus::Pending)
                .count() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminDashboardView {
    pub user: UserView,
    pub stats: AdminStats,
    pub users: Vec<AdminUserRow>,
    pub withdrawals: Vec<WithdrawalView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", content = "data", rename_all = "snake_case")]
pub enum DashboardView {
    Admin(AdminDashboardView),
    User(UserDashboardView),
}
