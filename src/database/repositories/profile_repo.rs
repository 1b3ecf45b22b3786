use std::collections::HashMap;

use async_trait::async_trait;
use surrealdb::sql::Thing;

use crate::database::repository::{Repository, RepositoryCore};
use crate::database::table_names::{BALANCE_TABLE_NAME, PROFILE_TABLE_NAME};
use crate::{
    entities::profile::Profile,
    interfaces::repositories::profile_ifce::ProfileRepositoryInterface,
    middleware::error::{AppError, AppResult},
};

impl Repository<Profile> {
    pub async fn mutate_db(&self) -> Result<(), AppError> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {PROFILE_TABLE_NAME} SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS username ON TABLE {PROFILE_TABLE_NAME} TYPE string VALUE string::lowercase($value);
    DEFINE FIELD IF NOT EXISTS email ON TABLE {PROFILE_TABLE_NAME} TYPE string VALUE string::lowercase($value);
    DEFINE FIELD IF NOT EXISTS is_banned ON TABLE {PROFILE_TABLE_NAME} TYPE bool DEFAULT false;
    DEFINE FIELD IF NOT EXISTS is_admin ON TABLE {PROFILE_TABLE_NAME} TYPE bool DEFAULT false;
    DEFINE FIELD IF NOT EXISTS created_at ON TABLE {PROFILE_TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE $before OR time::now();
    DEFINE INDEX IF NOT EXISTS profile_username_idx ON TABLE {PROFILE_TABLE_NAME} COLUMNS username UNIQUE;
    DEFINE INDEX IF NOT EXISTS profile_email_idx ON TABLE {PROFILE_TABLE_NAME} COLUMNS email UNIQUE;
");
        self.client.query(sql).await?.check()?;
        Ok(())
    }

    async fn set_flag(&self, user_key: &str, flag: &str, value: bool) -> AppResult<Profile> {
        let id = self.get_thing(user_key);
        let mut res = self
            .client
            .query(format!("UPDATE $id SET {flag} = $value RETURN AFTER;"))
            .bind(("id", id.clone()))
            .bind(("value", value))
            .await?;
        let profile: Option<Profile> = res.take(0)?;
        profile.ok_or(AppError::EntityFailIdNotFound { ident: id.to_raw() })
    }
}

fn map_create_errors(errors: HashMap<usize, surrealdb::Error>) -> AppError {
    let messages: Vec<String> = errors.values().map(|e| e.to_string()).collect();
    if messages.iter().any(|m| m.contains("profile_username_idx")) {
        return AppError::UsernameTaken;
    }
    if messages.iter().any(|m| m.contains("profile_email_idx")) {
        return AppError::EmailTaken;
    }
    AppError::SurrealDb {
        source: messages.join("; "),
    }
}

#[async_trait]
impl ProfileRepositoryInterface for Repository<Profile> {
    async fn get_by_key(&self, user_key: &str) -> AppResult<Option<Profile>> {
        Ok(self.select_by_key(user_key).await?)
    }

    async fn get_by_username(&self, username: &str) -> AppResult<Option<Profile>> {
        let qry = format!("SELECT * FROM {PROFILE_TABLE_NAME} WHERE username = $username LIMIT 1;");
        let mut res = self
            .client
            .query(qry)
            .bind(("username", username.trim().to_lowercase()))
            .await?;
        let data: Option<Profile> = res.take(0)?;
        Ok(data)
    }

    async fn exists_by_username(&self, username: &str) -> AppResult<bool> {
        let qry = format!("SELECT id FROM {PROFILE_TABLE_NAME} WHERE username = $username LIMIT 1;");
        let mut res = self
            .client
            .query(qry)
            .bind(("username", username.trim().to_lowercase()))
            .await?;
        let id: Option<Thing> = res.take((0, "id"))?;
        Ok(id.is_some())
    }

    async fn create_with_balance(
        &self,
        user_key: &str,
        username: &str,
        email: &str,
    ) -> AppResult<Profile> {
        let profile_id = self.get_thing(user_key);
        let balance_id = Thing::from((BALANCE_TABLE_NAME, user_key));
        let qry = "
            BEGIN TRANSACTION;
                CREATE $profile_id CONTENT {
                    username: $username,
                    email: $email,
                    is_banned: false,
                    is_admin: false
                };
                CREATE $balance_id CONTENT {
                    user: $profile_id,
                    earnings: 0,
                    completed_tasks: 0,
                    tokens: 0
                };
            COMMIT TRANSACTION;
        ";
        let mut res = self
            .client
            .query(qry)
            .bind(("profile_id", profile_id.clone()))
            .bind(("balance_id", balance_id))
            .bind(("username", username.trim().to_lowercase()))
            .bind(("email", email.trim().to_lowercase()))
            .await?;

        let errors = res.take_errors();
        if !errors.is_empty() {
            return Err(map_create_errors(errors));
        }

        let profile: Option<Profile> = res.take(0)?;
        profile.ok_or(AppError::EntityFailIdNotFound {
            ident: profile_id.to_raw(),
        })
    }

    async fn set_banned(&self, user_key: &str, banned: bool) -> AppResult<Profile> {
        self.set_flag(user_key, "is_banned", banned).await
    }

    async fn set_admin(&self, user_key: &str, admin: bool) -> AppResult<Profile> {
        self.set_flag(user_key, "is_admin", admin).await
    }

    async fn list(&self) -> AppResult<Vec<Profile>> {
        let qry = format!("SELECT * FROM {PROFILE_TABLE_NAME} ORDER BY created_at ASC;");
        Ok(self.query(&qry).await?)
    }
}
