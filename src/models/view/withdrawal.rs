use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::withdrawal_request::{WithdrawalRequest, WithdrawalStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalView {
    pub id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub amount: i64,
    pub status: WithdrawalStatus,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
    pub processed_by: Option<String>,
}

impl From<WithdrawalRequest> for WithdrawalView {
    fn from(value: WithdrawalRequest) -> Self {
        WithdrawalView {
            id: value.id.id.to_raw(),
            user_id: value.user.id.to_raw(),
            username: value.username,
            email: value.email,
            amount: value.amount,
            status: value.status,
            created_at: value.created_at,
            processed_at: value.processed_at,
            processed_by: value.processed_by.map(|t| t.id.to_raw()),
        }
    }
}
