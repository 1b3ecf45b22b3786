use async_trait::async_trait;
use surrealdb::sql::Thing;

use crate::database::repository::{Repository, RepositoryCore};
use crate::database::table_names::{BALANCE_TABLE_NAME, PROFILE_TABLE_NAME};
use crate::{
    entities::balance::{Balance, BalanceAmounts},
    interfaces::repositories::balance_ifce::BalanceRepositoryInterface,
    middleware::error::{AppError, AppResult},
};

impl Repository<Balance> {
    pub async fn mutate_db(&self) -> Result<(), AppError> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {BALANCE_TABLE_NAME} SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS user ON TABLE {BALANCE_TABLE_NAME} TYPE record<{PROFILE_TABLE_NAME}>;
    DEFINE FIELD IF NOT EXISTS earnings ON TABLE {BALANCE_TABLE_NAME} TYPE int DEFAULT 0;
    DEFINE FIELD IF NOT EXISTS completed_tasks ON TABLE {BALANCE_TABLE_NAME} TYPE int DEFAULT 0;
    DEFINE FIELD IF NOT EXISTS tokens ON TABLE {BALANCE_TABLE_NAME} TYPE int DEFAULT 0;
    DEFINE INDEX IF NOT EXISTS balance_user_idx ON TABLE {BALANCE_TABLE_NAME} COLUMNS user UNIQUE;
");
        self.client.query(sql).await?.check()?;
        Ok(())
    }
}

#[async_trait]
impl BalanceRepositoryInterface for Repository<Balance> {
    async fn get_by_user(&self, user_key: &str) -> AppResult<Option<Balance>> {
        Ok(self.select_by_key(user_key).await?)
    }

    async fn list(&self) -> AppResult<Vec<Balance>> {
        let qry = format!("SELECT * FROM {BALANCE_TABLE_NAME};");
        Ok(self.query(&qry).await?)
    }

    async fn set_amounts(&self, user_key: &str, amounts: BalanceAmounts) -> AppResult<Balance> {
        let id = self.get_thing(user_key);
        let user = Thing::from((PROFILE_TABLE_NAME, user_key));
        let mut res = self
            .client
            .query(
                "UPSERT $id SET
                    user = $user,
                    earnings = $earnings,
                    completed_tasks = $completed_tasks,
                    tokens = $tokens
                RETURN AFTER;",
            )
            .bind(("id", id.clone()))
            .bind(("user", user))
            .bind(("earnings", amounts.earnings))
            .bind(("completed_tasks", amounts.completed_tasks))
            .bind(("tokens", amounts.tokens))
            .await?;
        let balance: Option<Balance> = res.take(0)?;
        balance.ok_or(AppError::EntityFailIdNotFound { ident: id.to_raw() })
    }
}
