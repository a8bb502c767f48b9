//! computer — A catalog entry with optional dates and company.

use chrono::NaiveDate;
use diesel::prelude::*;
use serde::Serialize;

use crate::schema::computer;

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Serialize)]
#[diesel(table_name = computer)]
pub struct Computer {
    pub id: i64,
    pub name: String,
    pub introduced: Option<NaiveDate>,
    pub discontinued: Option<NaiveDate>,
    pub company_id: Option<i64>,
}

/// Validated field values for an insert or a full overwrite.
///
/// `None` clears the column on update.
#[derive(Debug, Clone, PartialEq, Eq, Insertable, AsChangeset)]
#[diesel(table_name = computer)]
#[diesel(treat_none_as_null = true)]
pub struct ComputerData {
    pub name: String,
    pub introduced: Option<NaiveDate>,
    pub discontinued: Option<NaiveDate>,
    pub company_id: Option<i64>,
}

/// A list row: the computer joined with its company name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComputerListing {
    pub computer: Computer,
    pub company_name: Option<String>,
}
