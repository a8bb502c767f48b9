//! Company lookups for the computer form.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::models::company::Company;
use crate::schema::company;

/// All companies ordered by name, for the company select control.
pub async fn options(conn: &mut AsyncPgConnection) -> QueryResult<Vec<Company>> {
    company::table
        .order((company::name.asc(), company::id.asc()))
        .select(Company::as_select())
        .load(conn)
        .await
}

/// Number of companies on file.
pub async fn count(conn: &mut AsyncPgConnection) -> QueryResult<i64> {
    company::table.count().get_result(conn).await
}
