//! In-memory repositories mirroring the PostgreSQL behavior, for tests.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CompanyRepository, ComputerRepository, StoreError};
use crate::models::company::Company;
use crate::models::computer::{Computer, ComputerData, ComputerListing};
use crate::paging::{Page, PageRequest, SortColumn, SortOrder};

#[derive(Default)]
struct Inner {
    companies: Vec<Company>,
    computers: BTreeMap<i64, Computer>,
    next_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_company(&self, name: &str) -> i64 {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.companies.len() as i64 + 1;
        inner.companies.push(Company {
            id,
            name: name.to_string(),
        });
        id
    }

    pub fn computer_count(&self) -> usize {
        self.inner.lock().unwrap().computers.len()
    }

    pub fn get(&self, id: i64) -> Option<Computer> {
        self.inner.lock().unwrap().computers.get(&id).cloned()
    }

    fn check_company(inner: &Inner, data: &ComputerData) -> Result<(), StoreError> {
        match data.company_id {
            Some(id) if !inner.companies.iter().any(|c| c.id == id) => Err(
                StoreError::Constraint(format!("company {id} does not exist")),
            ),
            _ => Ok(()),
        }
    }
}

fn stored(id: i64, data: &ComputerData) -> Computer {
    Computer {
        id,
        name: data.name.clone(),
        introduced: data.introduced,
        discontinued: data.discontinued,
        company_id: data.company_id,
    }
}

/// NULLs sort last ascending and first descending, as PostgreSQL does.
fn compare_nullable<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[async_trait]
impl ComputerRepository for MemoryStore {
    async fn page(&self, request: &PageRequest) -> Result<Page<ComputerListing>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let needle = request.filter.to_lowercase();

        let mut rows: Vec<ComputerListing> = inner
            .computers
            .values()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .map(|c| ComputerListing {
                computer: c.clone(),
                company_name: c.company_id.and_then(|id| {
                    inner
                        .companies
                        .iter()
                        .find(|co| co.id == id)
                        .map(|co| co.name.clone())
                }),
            })
            .collect();

        rows.sort_by(|a, b| {
            let ordering = match request.sort {
                SortColumn::Name => a.computer.name.cmp(&b.computer.name),
                SortColumn::Introduced => {
                    compare_nullable(&a.computer.introduced, &b.computer.introduced)
                }
                SortColumn::Discontinued => {
                    compare_nullable(&a.computer.discontinued, &b.computer.discontinued)
                }
                SortColumn::Company => compare_nullable(&a.company_name, &b.company_name),
            };
            match request.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let total = rows.len() as i64;
        let items = rows
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.page_size as usize)
            .collect();

        Ok(Page {
            items,
            page: request.page,
            page_size: request.page_size,
            total,
        })
    }

    async fn lookup(&self, id: i64) -> Result<Option<Computer>, StoreError> {
        Ok(self.get(id))
    }

    async fn insert(&self, data: &ComputerData) -> Result<Computer, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_company(&inner, data)?;
        inner.next_id += 1;
        let computer = stored(inner.next_id, data);
        inner.computers.insert(computer.id, computer.clone());
        Ok(computer)
    }

    async fn update(&self, id: i64, data: &ComputerData) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_company(&inner, data)?;
        match inner.computers.get_mut(&id) {
            Some(existing) => {
                *existing = stored(id, data);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.inner.lock().unwrap().computers.remove(&id).is_some())
    }
}

#[async_trait]
impl CompanyRepository for MemoryStore {
    async fn options(&self) -> Result<Vec<Company>, StoreError> {
        let mut companies = self.inner.lock().unwrap().companies.clone();
        companies.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(companies)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn named(name: &str) -> ComputerData {
        ComputerData {
            name: name.to_string(),
            introduced: None,
            discontinued: None,
            company_id: None,
        }
    }

    async fn catalog() -> MemoryStore {
        let store = MemoryStore::new();
        for name in ["MacBook Pro", "iMac", "Commodore 64", "Amiga 500", "macintosh"] {
            store.insert(&named(name)).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn filter_is_case_insensitive_substring() {
        let store = catalog().await;
        let page = store
            .page(&PageRequest {
                filter: "mac".to_string(),
                ..PageRequest::default()
            })
            .await
            .unwrap();

        let mut names: Vec<_> = page.items.iter().map(|r| r.computer.name.clone()).collect();
        names.sort();
        assert_eq!(names, vec!["MacBook Pro", "iMac", "macintosh"]);
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn sort_order_is_honored() {
        let store = catalog().await;
        let desc = store
            .page(&PageRequest {
                order: SortOrder::Desc,
                ..PageRequest::default()
            })
            .await
            .unwrap();
        let names: Vec<_> = desc.items.iter().map(|r| r.computer.name.as_str()).collect();
        let mut expected = names.clone();
        expected.sort();
        expected.reverse();
        assert_eq!(names, expected);
    }

    #[tokio::test]
    async fn null_dates_sort_last_ascending() {
        let store = MemoryStore::new();
        store.insert(&named("Undated")).await.unwrap();
        store
            .insert(&ComputerData {
                introduced: NaiveDate::from_ymd_opt(1977, 4, 1),
                ..named("Apple II")
            })
            .await
            .unwrap();

        let page = store
            .page(&PageRequest {
                sort: SortColumn::Introduced,
                ..PageRequest::default()
            })
            .await
            .unwrap();
        assert_eq!(page.items[0].computer.name, "Apple II");
        assert_eq!(page.items[1].computer.name, "Undated");
    }

    #[tokio::test]
    async fn out_of_range_page_is_empty() {
        let store = catalog().await;
        let page = store
            .page(&PageRequest {
                page: 9,
                ..PageRequest::default()
            })
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages(), 1);
    }

    #[tokio::test]
    async fn unknown_company_is_rejected() {
        let store = MemoryStore::new();
        let err = store
            .insert(&ComputerData {
                company_id: Some(42),
                ..named("Orphan")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
        assert_eq!(store.computer_count(), 0);
    }
}
