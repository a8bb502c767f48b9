//! Catalog data models — plain rows, no persistence behavior.

pub mod company;
pub mod computer;
