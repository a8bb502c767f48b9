//! Repository interfaces the HTTP layer talks to.
//!
//! `postgres` is the production implementation; `memory` backs the handler
//! tests.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::models::company::Company;
use crate::models::computer::{Computer, ComputerData, ComputerListing};
use crate::paging::{Page, PageRequest};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("connection pool: {0}")]
    Pool(String),
    #[error("query timed out after {0:?}")]
    Timeout(Duration),
    /// The database refused the write (foreign key, not-null, ...).
    #[error("constraint violation: {0}")]
    Constraint(String),
    #[error(transparent)]
    Query(DieselError),
}

impl From<DieselError> for StoreError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(
                kind @ (DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation),
                info,
            ) => StoreError::Constraint(format!("{kind:?}: {}", info.message())),
            other => StoreError::Query(other),
        }
    }
}

#[async_trait]
pub trait ComputerRepository: Send + Sync {
    async fn page(&self, request: &PageRequest) -> Result<Page<ComputerListing>, StoreError>;

    async fn lookup(&self, id: i64) -> Result<Option<Computer>, StoreError>;

    async fn insert(&self, data: &ComputerData) -> Result<Computer, StoreError>;

    /// Overwrite the computer's fields. `Ok(false)` when the id is unknown.
    async fn update(&self, id: i64, data: &ComputerData) -> Result<bool, StoreError>;

    /// `Ok(false)` when the id is unknown.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Companies ordered by name.
    async fn options(&self) -> Result<Vec<Company>, StoreError>;
}
