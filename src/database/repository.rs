use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::{marker::PhantomData, string::String};
use surrealdb::sql::Thing;

use crate::database::client::Db;

#[async_trait]
pub trait RepositoryCore {
    type Connection;
    type Error: std::error::Error + Send;
    type QueryResultItem;
    type QueryResultList; // = Vec<Self::QueryResultItem>; (not stable yet)

    fn new(conn: Self::Connection, table_name: String) -> Self
    where
        Self: Sized;

    async fn query(&self, query: &str) -> Result<Self::QueryResultList, Self::Error>;
    async fn select_by_key(&self, key: &str)
        -> Result<Option<Self::QueryResultItem>, Self::Error>;
    async fn count(&self) -> Result<u64, Self::Error>;
    fn get_thing(&self, key: &str) -> Thing;
}

#[derive(Debug)]
pub struct Repository<E> {
    pub client: Arc<Db>,
    pub table_name: String,
    _phantom: PhantomData<E>,
}

#[async_trait]
impl<E: for<'de> Deserialize<'de> + Send + Sync + 'static> RepositoryCore for Repository<E> {
    type Connection = Arc<Db>;
    type Error = surrealdb::Error;
    type QueryResultItem = E;
    type QueryResultList = Vec<Self::QueryResultItem>;

    fn new(client: Self::Connection, table_name: String) -> Self {
        Repository {
            client,
            table_name,
            _phantom: PhantomData,
        }
    }

    async fn query(&self, query: &str) -> Result<Self::QueryResultList, Self::Error> {
        let mut result = self.client.query(query).await?;
        let values: Self::QueryResultList = result.take(0)?;
        Ok(values)
    }

    async fn select_by_key(
        &self,
        key: &str,
    ) -> Result<Option<Self::QueryResultItem>, Self::Error> {
        let res: Option<Self::QueryResultItem> = self
            .client
            .select((self.table_name.as_str(), key))
            .await?;
        Ok(res)
    }

    async fn count(&self) -> Result<u64, Self::Error> {
        let query = format!("SELECT count() AS count FROM {} GROUP ALL;", self.table_name);
        let mut res = self.client.query(&query).await?;
        let count: Option<u64> = res.take((0, "count"))?;
        Ok(count.unwrap_or(0))
    }

    fn get_thing(&self, key: &str) -> Thing {
        Thing::from((self.table_name.as_str(), key))
    }
}
