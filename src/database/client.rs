use std::sync::Arc;

use surrealdb::engine::any::{connect, Any};
use surrealdb::opt::auth::Root;
use surrealdb::Surreal;
use tracing::info;

use crate::database::repository::{Repository, RepositoryCore};
use crate::database::table_names::{
    BALANCE_TABLE_NAME, IDENTITY_TABLE_NAME, PROFILE_TABLE_NAME, WITHDRAWAL_REQUEST_TABLE_NAME,
};
use crate::entities::{
    balance::Balance, identity::Identity, profile::Profile,
    withdrawal_request::WithdrawalRequest,
};
use crate::middleware::error::AppResult;

pub type Db = Surreal<Any>;

#[derive(Debug)]
pub struct DbConfig<'a> {
    pub url: &'a str,
    pub database: &'a str,
    pub namespace: &'a str,
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
}

#[derive(Debug)]
pub struct Database {
    pub client: Arc<Db>,
    pub identities: Repository<Identity>,
    pub profiles: Repository<Profile>,
    pub balances: Repository<Balance>,
    pub withdrawals: Repository<WithdrawalRequest>,
}

impl Database {
    pub async fn connect(config: DbConfig<'_>) -> AppResult<Self> {
        info!(url = config.url, ns = config.namespace, db = config.database, "connecting DB");
        let conn = connect(config.url).await?;

        if let (Some(password), Some(username)) = (config.password, config.username) {
            conn.signin(Root { username, password }).await?;
        }

        conn.use_ns(config.namespace)
            .use_db(config.database)
            .await?;

        let version = conn.version().await?;
        info!("connected DB version: {version}");

        let client = Arc::new(conn);
        Ok(Self {
            identities: Repository::new(client.clone(), IDENTITY_TABLE_NAME.to_string()),
            profiles: Repository::new(client.clone(), PROFILE_TABLE_NAME.to_string()),
            balances: Repository::new(client.clone(), BALANCE_TABLE_NAME.to_string()),
            withdrawals: Repository::new(client.clone(), WITHDRAWAL_REQUEST_TABLE_NAME.to_string()),
            client,
        })
    }

    pub async fn run_migrations(&self) -> AppResult<()> {
        self.identities.mutate_db().await?;
        self.profiles.mutate_db().await?;
        self.balances.mutate_db().await?;
        self.withdrawals.mutate_db().await?;
        Ok(())
    }
}
