use async_trait::async_trait;
use surrealdb::sql::{Id, Thing};
use tracing::info;

use crate::database::repository::{Repository, RepositoryCore};
use crate::database::table_names::IDENTITY_TABLE_NAME;
use crate::{
    entities::identity::Identity,
    interfaces::identity_provider::IdentityProviderInterface,
    middleware::error::{AppError, AppResult},
    utils::hash::{hash_password, verify_password},
};

impl Repository<Identity> {
    pub async fn mutate_db(&self) -> Result<(), AppError> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {IDENTITY_TABLE_NAME} SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS email ON TABLE {IDENTITY_TABLE_NAME} TYPE string VALUE string::lowercase($value) ASSERT string::is::email($value);
    DEFINE FIELD IF NOT EXISTS password_hash ON TABLE {IDENTITY_TABLE_NAME} TYPE string;
    DEFINE FIELD IF NOT EXISTS created_at ON TABLE {IDENTITY_TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE $before OR time::now();
    DEFINE INDEX IF NOT EXISTS identity_email_idx ON TABLE {IDENTITY_TABLE_NAME} COLUMNS email UNIQUE;
");
        self.client.query(sql).await?.check()?;
        Ok(())
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<Identity>> {
        let qry = format!("SELECT * FROM {IDENTITY_TABLE_NAME} WHERE email = $email LIMIT 1;");
        let mut res = self
            .client
            .query(qry)
            .bind(("email", email.trim().to_lowercase()))
            .await?;
        let data: Option<Identity> = res.take(0)?;
        Ok(data)
    }
}

#[async_trait]
impl IdentityProviderInterface for Repository<Identity> {
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<String> {
        let password_hash = hash_password(password)?;
        let id = Thing::from((IDENTITY_TABLE_NAME, Id::ulid()));
        let res = self
            .client
            .query("CREATE $id CONTENT { email: $email, password_hash: $password_hash };")
            .bind(("id", id.clone()))
            .bind(("email", email.trim().to_lowercase()))
            .bind(("password_hash", password_hash))
            .await?
            .check();

        match res {
            Ok(_) => Ok(id.id.to_raw()),
            Err(err) if err.to_string().contains("identity_email_idx") => Err(AppError::EmailTaken),
            Err(err) => Err(err.into()),
        }
    }

    async fn sign_in_password(&self, email: &str, password: &str) -> AppResult<String> {
        let identity = self
            .get_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(&identity.password_hash, password) {
            return Err(AppError::InvalidCredentials);
        }
        Ok(identity.id.id.to_raw())
    }

    async fn remove(&self, user_key: &str) -> AppResult<()> {
        let _ = self
            .client
            .query("DELETE $id;")
            .bind(("id", self.get_thing(user_key)))
            .await?
            .check()?;
        info!(user_key, "identity removed");
        Ok(())
    }
}
