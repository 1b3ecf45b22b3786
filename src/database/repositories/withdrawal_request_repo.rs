use async_trait::async_trait;
use surrealdb::sql::{Id, Thing};

use crate::database::repository::{Repository, RepositoryCore};
use crate::database::table_names::{PROFILE_TABLE_NAME, WITHDRAWAL_REQUEST_TABLE_NAME};
use crate::{
    entities::withdrawal_request::{WithdrawalRequest, WithdrawalStatus},
    interfaces::repositories::withdrawal_request_ifce::WithdrawalRequestRepositoryInterface,
    middleware::error::{AppError, AppResult},
};

const TABLE_NAME: &str = WITHDRAWAL_REQUEST_TABLE_NAME;

impl Repository<WithdrawalRequest> {
    pub async fn mutate_db(&self) -> Result<(), AppError> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {TABLE_NAME} SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS user ON TABLE {TABLE_NAME} TYPE record<{PROFILE_TABLE_NAME}>;
    DEFINE FIELD IF NOT EXISTS amount ON TABLE {TABLE_NAME} TYPE int ASSERT $value > 0;
    DEFINE FIELD IF NOT EXISTS status ON TABLE {TABLE_NAME} TYPE string ASSERT $value IN ['pending', 'approved', 'denied'];
    DEFINE FIELD IF NOT EXISTS created_at ON TABLE {TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE $before OR time::now();
    DEFINE FIELD IF NOT EXISTS processed_at ON TABLE {TABLE_NAME} TYPE option<datetime>;
    DEFINE FIELD IF NOT EXISTS processed_by ON TABLE {TABLE_NAME} TYPE option<record<{PROFILE_TABLE_NAME}>>;

    DEFINE INDEX IF NOT EXISTS withdrawal_request_user_idx ON TABLE {TABLE_NAME} COLUMNS user;
    DEFINE INDEX IF NOT EXISTS withdrawal_request_status_idx ON TABLE {TABLE_NAME} COLUMNS status;
");
        self.client.query(sql).await?.check()?;
        Ok(())
    }
}

#[async_trait]
impl WithdrawalRequestRepositoryInterface for Repository<WithdrawalRequest> {
    async fn create(&self, user_key: &str, amount: i64) -> AppResult<WithdrawalRequest> {
        let id = Thing::from((TABLE_NAME, Id::ulid()));
        let user = Thing::from((PROFILE_TABLE_NAME, user_key));
        let mut res = self
            .client
            .query("CREATE $id CONTENT { user: $user, amount: $amount, status: $status };")
            .bind(("id", id.clone()))
            .bind(("user", user))
            .bind(("amount", amount))
            .bind(("status", WithdrawalStatus::Pending))
            .await?;
        let data: Option<WithdrawalRequest> = res.take(0)?;
        data.ok_or(AppError::EntityFailIdNotFound { ident: id.to_raw() })
    }

    async fn get(&self, withdrawal_key: &str) -> AppResult<Option<WithdrawalRequest>> {
        Ok(self.select_by_key(withdrawal_key).await?)
    }

    async fn list_with_users(
        &self,
        status: Option<WithdrawalStatus>,
    ) -> AppResult<Vec<WithdrawalRequest>> {
        let filter = match status {
            Some(_) => "WHERE status = $status",
            None => "",
        };
        let qry = format!(
            "SELECT *, user.username AS username, user.email AS email
             FROM {TABLE_NAME} {filter} ORDER BY created_at DESC;"
        );
        let mut res = self.client.query(qry).bind(("status", status)).await?;
        let data: Vec<WithdrawalRequest> = res.take(0)?;
        Ok(data)
    }

    async fn list_by_user(&self, user_key: &str) -> AppResult<Vec<WithdrawalRequest>> {
        let user = Thing::from((PROFILE_TABLE_NAME, user_key));
        let qry = format!("SELECT * FROM {TABLE_NAME} WHERE user = $user ORDER BY created_at DESC;");
        let mut res = self.client.query(qry).bind(("user", user)).await?;
        let data: Vec<WithdrawalRequest> = res.take(0)?;
        Ok(data)
    }

    async fn process(
        &self,
        withdrawal_key: &str,
        status: WithdrawalStatus,
        processed_by: &str,
    ) -> AppResult<Option<WithdrawalRequest>> {
        let id = self.get_thing(withdrawal_key);
        let admin = Thing::from((PROFILE_TABLE_NAME, processed_by));
        // single conditional write, a request that already left pending is never touched
        let mut res = self
            .client
            .query(
                "UPDATE $id SET
                    status = $status,
                    processed_at = time::now(),
                    processed_by = $admin
                WHERE status = $pending
                RETURN AFTER;",
            )
            .bind(("id", id))
            .bind(("status", status))
            .bind(("admin", admin))
            .bind(("pending", WithdrawalStatus::Pending))
            .await?;
        let data: Option<WithdrawalRequest> = res.take(0)?;
        Ok(data)
    }
}
