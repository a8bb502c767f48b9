//! Computer listing and CRUD.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::models::computer::{Computer, ComputerData, ComputerListing};
use crate::paging::{Page, PageRequest, SortColumn, SortOrder};
use crate::schema::{company, computer};

/// Build an ILIKE pattern matching `filter` anywhere, with LIKE wildcards
/// in the filter taken literally.
pub fn like_pattern(filter: &str) -> String {
    let mut pattern = String::with_capacity(filter.len() + 2);
    pattern.push('%');
    for c in filter.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// One page of computers joined with their company name.
pub async fn page(
    conn: &mut AsyncPgConnection,
    request: &PageRequest,
) -> QueryResult<Page<ComputerListing>> {
    let pattern = like_pattern(&request.filter);

    let total: i64 = computer::table
        .filter(computer::name.ilike(pattern.as_str()))
        .count()
        .get_result(conn)
        .await?;

    let mut query = computer::table
        .left_join(company::table)
        .filter(computer::name.ilike(pattern.as_str()))
        .select((Computer::as_select(), company::name.nullable()))
        .into_boxed();

    query = match (request.sort, request.order) {
        (SortColumn::Name, SortOrder::Asc) => query.order(computer::name.asc()),
        (SortColumn::Name, SortOrder::Desc) => query.order(computer::name.desc()),
        (SortColumn::Introduced, SortOrder::Asc) => query.order(computer::introduced.asc()),
        (SortColumn::Introduced, SortOrder::Desc) => query.order(computer::introduced.desc()),
        (SortColumn::Discontinued, SortOrder::Asc) => query.order(computer::discontinued.asc()),
        (SortColumn::Discontinued, SortOrder::Desc) => {
            query.order(computer::discontinued.desc())
        }
        (SortColumn::Company, SortOrder::Asc) => query.order(company::name.asc()),
        (SortColumn::Company, SortOrder::Desc) => query.order(company::name.desc()),
    };

    let rows: Vec<(Computer, Option<String>)> = query
        .then_order_by(computer::id.asc())
        .limit(request.page_size)
        .offset(request.offset())
        .load(conn)
        .await?;

    Ok(Page {
        items: rows
            .into_iter()
            .map(|(computer, company_name)| ComputerListing {
                computer,
                company_name,
            })
            .collect(),
        page: request.page,
        page_size: request.page_size,
        total,
    })
}

/// Find a computer by id.
pub async fn find(conn: &mut AsyncPgConnection, id: i64) -> QueryResult<Option<Computer>> {
    computer::table
        .find(id)
        .select(Computer::as_select())
        .first(conn)
        .await
        .optional()
}

/// Insert a computer; the id comes from the table sequence.
pub async fn insert(conn: &mut AsyncPgConnection, data: &ComputerData) -> QueryResult<Computer> {
    diesel::insert_into(computer::table)
        .values(data)
        .returning(Computer::as_returning())
        .get_result(conn)
        .await
}

/// Overwrite every editable field of an existing computer in one statement.
///
/// Returns `false` when no row has this id; nothing is written then.
pub async fn update(
    conn: &mut AsyncPgConnection,
    id: i64,
    data: &ComputerData,
) -> QueryResult<bool> {
    let affected = diesel::update(computer::table.find(id))
        .set(data)
        .execute(conn)
        .await?;
    Ok(affected > 0)
}

/// Delete a computer. Returns `false` when the id did not exist.
pub async fn delete(conn: &mut AsyncPgConnection, id: i64) -> QueryResult<bool> {
    let affected = diesel::delete(computer::table.find(id))
        .execute(conn)
        .await?;
    Ok(affected > 0)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use diesel_async::{AsyncConnection, SimpleAsyncConnection};

    use super::*;
    use crate::services::company_service;

    #[test]
    fn like_pattern_wraps_and_escapes() {
        assert_eq!(like_pattern(""), "%%");
        assert_eq!(like_pattern("mac"), "%mac%");
        assert_eq!(like_pattern("100%_\\"), "%100\\%\\_\\\\%");
    }

    /// Connection to a scratch database, inside a transaction that is never
    /// committed. `None` when `TEST_DATABASE_URL` is unset.
    async fn test_connection() -> Option<AsyncPgConnection> {
        let url = std::env::var("TEST_DATABASE_URL").ok()?;
        let mut conn = AsyncPgConnection::establish(&url)
            .await
            .expect("connect to TEST_DATABASE_URL");
        crate::migration::run_migration(&mut conn)
            .await
            .expect("migration");
        conn.begin_test_transaction()
            .await
            .expect("test transaction");
        conn.batch_execute("DELETE FROM computer; DELETE FROM company;")
            .await
            .expect("clear tables");
        Some(conn)
    }

    async fn insert_company(conn: &mut AsyncPgConnection, name: &str) -> i64 {
        diesel::insert_into(company::table)
            .values(company::name.eq(name))
            .returning(company::id)
            .get_result(conn)
            .await
            .expect("insert company")
    }

    fn data(name: &str, company_id: Option<i64>) -> ComputerData {
        ComputerData {
            name: name.to_string(),
            introduced: None,
            discontinued: None,
            company_id,
        }
    }

    #[tokio::test]
    async fn seeded_macintosh_lists_with_company_name() {
        let Some(mut conn) = test_connection().await else {
            eprintln!("TEST_DATABASE_URL not set, skipping");
            return;
        };

        let apple = insert_company(&mut conn, "Apple").await;
        let introduced = NaiveDate::from_ymd_opt(1984, 1, 24).unwrap();
        let mac = insert(
            &mut conn,
            &ComputerData {
                introduced: Some(introduced),
                ..data("Macintosh", Some(apple))
            },
        )
        .await
        .unwrap();

        let page = page(&mut conn, &PageRequest::default()).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].company_name.as_deref(), Some("Apple"));

        let found = find(&mut conn, mac.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Macintosh");
        assert_eq!(found.introduced, Some(introduced));

        let options = company_service::options(&mut conn).await.unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].name, "Apple");
    }

    #[tokio::test]
    async fn filter_sort_and_out_of_range_page() {
        let Some(mut conn) = test_connection().await else {
            eprintln!("TEST_DATABASE_URL not set, skipping");
            return;
        };

        for name in ["MacBook Pro", "iMac", "Commodore 64", "Amiga 500"] {
            insert(&mut conn, &data(name, None)).await.unwrap();
        }

        let macs = page(
            &mut conn,
            &PageRequest {
                filter: "MAC".to_string(),
                order: SortOrder::Desc,
                ..PageRequest::default()
            },
        )
        .await
        .unwrap();
        let names: Vec<_> = macs.items.iter().map(|r| r.computer.name.as_str()).collect();
        assert_eq!(macs.total, 2);
        assert!(names.contains(&"MacBook Pro"));
        assert!(names.contains(&"iMac"));

        let ascending = page(&mut conn, &PageRequest::default()).await.unwrap();
        assert_eq!(ascending.items[0].computer.name, "Amiga 500");

        let beyond = page(
            &mut conn,
            &PageRequest {
                page: 5,
                ..PageRequest::default()
            },
        )
        .await
        .unwrap();
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total, 4);
        assert_eq!(beyond.total_pages(), 1);
    }

    #[tokio::test]
    async fn update_and_delete_missing_ids_are_no_ops() {
        let Some(mut conn) = test_connection().await else {
            eprintln!("TEST_DATABASE_URL not set, skipping");
            return;
        };

        let kept = insert(&mut conn, &data("PDP-1", None)).await.unwrap();

        assert!(!update(&mut conn, kept.id + 1000, &data("Ghost", None))
            .await
            .unwrap());
        assert!(!delete(&mut conn, kept.id + 1000).await.unwrap());

        let unchanged = find(&mut conn, kept.id).await.unwrap().unwrap();
        assert_eq!(unchanged.name, "PDP-1");

        assert!(update(&mut conn, kept.id, &data("PDP-8", None)).await.unwrap());
        assert_eq!(find(&mut conn, kept.id).await.unwrap().unwrap().name, "PDP-8");

        assert!(delete(&mut conn, kept.id).await.unwrap());
        assert!(find(&mut conn, kept.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_company_is_a_foreign_key_violation() {
        let Some(mut conn) = test_connection().await else {
            eprintln!("TEST_DATABASE_URL not set, skipping");
            return;
        };

        let err = insert(&mut conn, &data("Orphan", Some(-1)))
            .await
            .unwrap_err();
        assert!(matches!(
            crate::store::StoreError::from(err),
            crate::store::StoreError::Constraint(_)
        ));
    }
}
