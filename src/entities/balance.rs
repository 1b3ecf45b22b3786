use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

/// Per-account counters. Owned by an external process; amounts are minor units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balance {
    pub id: Thing,
    pub user: Thing,
    #[serde(default)]
    pub earnings: i64,
    #[serde(default)]
    pub completed_tasks: i64,
    #[serde(default)]
    pub tokens: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceAmounts {
    pub earnings: i64,
    pub completed_tasks: i64,
    pub tokens: i64,
}

impl From<&Balance> for BalanceAmounts {
    fn from(value: &Balance) -> Self {
        BalanceAmounts {
            earnings: value.earnings,
            completed_tasks: value.completed_tasks,
            tokens: value.tokens,
        }
    }
}

impl BalanceAmounts {
    pub fn of(balance: Option<&Balance>) -> Self {
        balance.map(BalanceAmounts::from).unwrap_or_default()
    }
}
