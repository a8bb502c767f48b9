//! Catalog queries and mutations over a single PostgreSQL connection.

pub mod company_service;
pub mod computer_service;
