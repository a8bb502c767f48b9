//! company — Manufacturer a computer may belong to. Read-only here.

use diesel::prelude::*;
use serde::Serialize;

use crate::schema::company;

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Serialize)]
#[diesel(table_name = company)]
pub struct Company {
    pub id: i64,
    pub name: String,
}
