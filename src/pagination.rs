//! Generic pagination, sorting and resource shaping
//!
//! Inbound page parameters are parsed once, with defaults applied, into an
//! immutable [`PageParams`] value before they reach any handler. Entities opt
//! into sorting through the [`Sortable`] trait; unknown sort fields never
//! fail, they simply leave the store's natural order in place.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;

/// Sentinel used when no per_page is given: effectively unbounded
pub const DEFAULT_PER_PAGE: i64 = 999_999;

/// Sort fields are restricted to this pattern at the boundary, so a resolved
/// field can never smuggle a raw ordering expression into a query.
static SORT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z_-]*$").unwrap());

/// Raw pagination query string, everything optional
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Sort direction: asc or desc
    pub order: Option<String>,
    /// Records per page
    pub per_page: Option<i64>,
    /// Field to sort by (letters, underscore, hyphen only)
    pub sort: Option<String>,
    /// Page number, 1-based
    pub page: Option<i64>,
    /// Free-text filter
    pub q: Option<String>,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Fully-defaulted, validated pagination parameters
#[derive(Debug, Clone)]
pub struct PageParams {
    pub order: SortOrder,
    pub per_page: i64,
    pub sort: Option<String>,
    pub page: i64,
    pub q: Option<String>,
}

impl PageParams {
    /// Parse a raw query into concrete parameters, applying defaults.
    ///
    /// Invalid values are validation failures naming the offending field;
    /// absent values never reach the pagination engine as `None` (except
    /// `sort`/`q`, whose absence is meaningful).
    pub fn from_query(query: PageQuery) -> Result<Self, AppError> {
        let order = match query.order.as_deref() {
            None => SortOrder::Asc,
            Some("asc") => SortOrder::Asc,
            Some("desc") => SortOrder::Desc,
            Some(_) => {
                return Err(AppError::Validation {
                    field: "order".to_string(),
                    message: "Order must be asc or desc".to_string(),
                })
            }
        };

        let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE);
        if per_page < 1 {
            return Err(AppError::Validation {
                field: "per_page".to_string(),
                message: "Per page must be a positive integer".to_string(),
            });
        }

        let page = query.page.unwrap_or(1);
        if page < 1 {
            return Err(AppError::Validation {
                field: "page".to_string(),
                message: "Page must be a positive integer".to_string(),
            });
        }

        if let Some(ref sort) = query.sort {
            if !SORT_PATTERN.is_match(sort) {
                return Err(AppError::Validation {
                    field: "sort".to_string(),
                    message: "Sort field contains invalid characters".to_string(),
                });
            }
        }

        Ok(Self {
            order,
            per_page,
            sort: query.sort,
            page,
            q: query.q.filter(|q| !q.is_empty()),
        })
    }

    /// Number of rows to skip for the requested page.
    ///
    /// Saturates rather than overflowing on hostile page numbers; a
    /// saturated offset lands past the last page and yields an empty
    /// records sequence with accurate totals.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

/// Entities that declare which of their fields may be sorted on
pub trait Sortable {
    /// Directly sortable columns (the entity's mutable attributes)
    const SORTABLE_COLUMNS: &'static [&'static str];

    /// Alias map from logical sort name to physical expression
    fn sort_alias(_name: &str) -> Option<&'static str> {
        None
    }

    /// Resolve a requested sort field to a physical column.
    ///
    /// Direct columns take priority over aliases; first match wins. Unknown
    /// fields resolve to `None` and are silently ignored.
    fn resolve_sort(sort: Option<&str>) -> Option<&'static str> {
        let sort = sort?;
        if let Some(column) = Self::SORTABLE_COLUMNS.iter().find(|c| **c == sort) {
            return Some(column);
        }
        Self::sort_alias(sort)
    }
}

/// One page of records plus page metadata
#[derive(Debug, Serialize, ToSchema)]
pub struct Page<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// Records on this page, in page-local order
    pub records: Vec<T>,
    /// Total number of pages, at least 1
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
    /// Total matching records across all pages
    #[serde(rename = "totalRecords")]
    pub total_records: i64,
}

impl<T> Page<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// Build a page from the fetched records and the pre-paging row count.
    pub fn new(records: Vec<T>, total_records: i64, per_page: i64) -> Self {
        Self {
            records,
            total_pages: total_pages(total_records, per_page),
            total_records,
        }
    }

    /// Shape every record on the page; the envelope stays identical.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        U: for<'a> ToSchema<'a>,
        F: FnMut(T) -> U,
    {
        Page {
            records: self.records.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            total_records: self.total_records,
        }
    }
}

/// `ceil(total_records / per_page)`, never below 1
pub fn total_pages(total_records: i64, per_page: i64) -> i64 {
    let pages = (total_records + per_page - 1) / per_page;
    pages.max(1)
}
