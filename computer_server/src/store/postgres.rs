//! PostgreSQL repositories over the shared connection pool.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use diesel::QueryResult;

use super::{CompanyRepository, ComputerRepository, StoreError};
use crate::db::{DbConnection, DbPool};
use crate::models::company::Company;
use crate::models::computer::{Computer, ComputerData, ComputerListing};
use crate::paging::{Page, PageRequest};
use crate::services::{company_service, computer_service};

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
    query_timeout: Duration,
}

impl PgStore {
    pub fn new(pool: DbPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    async fn conn(&self) -> Result<DbConnection, StoreError> {
        self.pool
            .get()
            .await
            .map_err(|e| StoreError::Pool(e.to_string()))
    }

    async fn bounded<T>(
        &self,
        query: impl Future<Output = QueryResult<T>>,
    ) -> Result<T, StoreError> {
        tokio::time::timeout(self.query_timeout, query)
            .await
            .map_err(|_| StoreError::Timeout(self.query_timeout))?
            .map_err(StoreError::from)
    }
}

#[async_trait]
impl ComputerRepository for PgStore {
    async fn page(&self, request: &PageRequest) -> Result<Page<ComputerListing>, StoreError> {
        let started = std::time::Instant::now();
        let mut conn = self.conn().await?;
        let page = self
            .bounded(computer_service::page(&mut conn, request))
            .await?;
        crate::metrics::list_query_duration(started.elapsed().as_millis() as u64);
        Ok(page)
    }

    async fn lookup(&self, id: i64) -> Result<Option<Computer>, StoreError> {
        let mut conn = self.conn().await?;
        self.bounded(computer_service::find(&mut conn, id)).await
    }

    async fn insert(&self, data: &ComputerData) -> Result<Computer, StoreError> {
        let mut conn = self.conn().await?;
        self.bounded(computer_service::insert(&mut conn, data)).await
    }

    async fn update(&self, id: i64, data: &ComputerData) -> Result<bool, StoreError> {
        let mut conn = self.conn().await?;
        self.bounded(computer_service::update(&mut conn, id, data))
            .await
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut conn = self.conn().await?;
        self.bounded(computer_service::delete(&mut conn, id)).await
    }
}

#[async_trait]
impl CompanyRepository for PgStore {
    async fn options(&self) -> Result<Vec<Company>, StoreError> {
        let mut conn = self.conn().await?;
        self.bounded(company_service::options(&mut conn)).await
    }
}
