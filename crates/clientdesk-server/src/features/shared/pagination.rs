//! Shared pagination utilities
//!
//! ```rust,ignore
//! use clientdesk_server::features::shared::pagination::{Page, PaginationParams};
//!
//! let params = PaginationParams::new(Some(2), Some(20));
//! params.validate()?;
//! let page = Page::new(rows, total, &params);
//! ```

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Page number (1-indexed) and page size, both optional in the request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PaginationParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl PaginationParams {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self { page, limit }
    }

    pub fn page(&self) -> i64 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    /// Calculate the offset for SQL OFFSET clause. Saturates, so a page beyond
    /// `i64` range yields an empty result instead of overflowing.
    pub fn offset(&self) -> i64 {
        self.page().saturating_sub(1).saturating_mul(self.limit())
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.page() < 1 {
            return Err("Page must be greater than 0");
        }
        if !(1..=MAX_LIMIT).contains(&self.limit()) {
            return Err("Limit must be between 1 and 100");
        }
        Ok(())
    }
}

/// One page of results: `{ data, total, page, limit, totalPages }`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total: i64, params: &PaginationParams) -> Self {
        let limit = params.limit();
        Self {
            data,
            total,
            page: params.page(),
            limit,
            total_pages: total_pages(total, limit),
        }
    }
}

fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        0
    } else {
        (total + limit - 1) / limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PaginationParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_offset() {
        assert_eq!(PaginationParams::new(Some(3), Some(20)).offset(), 40);
    }

    #[test]
    fn test_offset_saturates_for_huge_page() {
        let params = PaginationParams::new(Some(i64::MAX), Some(10));
        assert!(params.validate().is_ok());
        assert_eq!(params.offset(), i64::MAX);
    }

    #[test]
    fn test_validate_bounds() {
        assert!(PaginationParams::new(Some(0), None).validate().is_err());
        assert!(PaginationParams::new(None, Some(0)).validate().is_err());
        assert!(PaginationParams::new(None, Some(101)).validate().is_err());
        assert!(PaginationParams::new(Some(5), Some(100)).validate().is_ok());
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(25, 10), 3);
    }

    #[test]
    fn test_page_serializes_camel_case() {
        let page = Page::new(vec![1, 2], 12, &PaginationParams::new(Some(2), Some(2)));
        let value = serde_json::to_value(page).unwrap();
        assert_eq!(value["totalPages"], 6);
        assert_eq!(value["page"], 2);
    }
}
