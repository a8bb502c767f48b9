//! Diesel table definitions for the computer catalog.
//!
//! Tables: company, computer.

diesel::table! {
    company (id) {
        id -> Int8,
        name -> Varchar,
    }
}

diesel::table! {
    computer (id) {
        id -> Int8,
        name -> Varchar,
        introduced -> Nullable<Date>,
        discontinued -> Nullable<Date>,
        company_id -> Nullable<Int8>,
    }
}

diesel::joinable!(computer -> company (company_id));

diesel::allow_tables_to_appear_in_same_query!(company, computer);
