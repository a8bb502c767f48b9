//! Paged list requests and results for the computer list.

use std::fmt;
use std::str::FromStr;

/// Rows per list page.
pub const PAGE_SIZE: i64 = 10;

/// Columns the list may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    Name,
    Introduced,
    Discontinued,
    Company,
}

impl SortColumn {
    pub const ALL: [SortColumn; 4] = [
        SortColumn::Name,
        SortColumn::Introduced,
        SortColumn::Discontinued,
        SortColumn::Company,
    ];

    /// Value used in the `sortBy` query parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            SortColumn::Name => "name",
            SortColumn::Introduced => "introduced",
            SortColumn::Discontinued => "discontinued",
            SortColumn::Company => "company.name",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortColumn::Name => "Computer name",
            SortColumn::Introduced => "Introduced",
            SortColumn::Discontinued => "Discontinued",
            SortColumn::Company => "Company",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort column: {0}")]
pub struct UnknownSortColumn(pub String);

impl FromStr for SortColumn {
    type Err = UnknownSortColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortColumn::ALL
            .into_iter()
            .find(|c| c.as_param() == s)
            .ok_or_else(|| UnknownSortColumn(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_param(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort order: {0}")]
pub struct UnknownSortOrder(pub String);

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortOrder::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortOrder::Desc)
        } else {
            Err(UnknownSortOrder(s.to_string()))
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// What the list page asks the repository for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page: u32,
    pub page_size: i64,
    pub sort: SortColumn,
    pub order: SortOrder,
    /// Case-insensitive substring matched against the computer name.
    pub filter: String,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: PAGE_SIZE,
            sort: SortColumn::Name,
            order: SortOrder::Asc,
            filter: String::new(),
        }
    }
}

impl PageRequest {
    pub fn offset(&self) -> i64 {
        i64::from(self.page) * self.page_size
    }
}

/// One page of results plus the total number of matching rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: i64,
    pub total: i64,
}

impl<T> Page<T> {
    /// `ceil(total / page_size)`.
    pub fn total_pages(&self) -> i64 {
        if self.page_size <= 0 {
            return 0;
        }
        (self.total + self.page_size - 1) / self.page_size
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        i64::from(self.page) + 1 < self.total_pages()
    }

    /// One-based index of the first displayed row (0 when the page is empty).
    pub fn first_row(&self) -> i64 {
        if self.items.is_empty() {
            0
        } else {
            i64::from(self.page) * self.page_size + 1
        }
    }

    /// One-based index of the last displayed row.
    pub fn last_row(&self) -> i64 {
        if self.items.is_empty() {
            0
        } else {
            i64::from(self.page) * self.page_size + self.items.len() as i64
        }
    }
}
