// Offset/limit paging over sorted rows

use crate::errors::TableError;
use serde::Serialize;

/// Largest page a client may request
pub const MAX_PAGE_LIMIT: i64 = 500;

/// Validated paging request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: i64,
    pub limit: i64,
}

/// Paging metadata for a rendered page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSlice {
    pub offset: i64,
    pub limit: i64,
    pub page: i64,
    pub total_pages: i64,
    pub total_count: i64,
    pub has_prev: bool,
    pub has_more: bool,
    pub prev_offset: i64,
    pub next_offset: i64,
}

impl PageRequest {
    pub fn new(
        offset: Option<i64>,
        limit: Option<i64>,
        default_limit: i64,
    ) -> Result<Self, TableError> {
        let offset = offset.unwrap_or(0);
        let limit = limit.unwrap_or(default_limit);

        if offset < 0 {
            return Err(TableError::InvalidOffset(offset));
        }
        if limit <= 0 || limit > MAX_PAGE_LIMIT {
            return Err(TableError::InvalidLimit {
                limit,
                max: MAX_PAGE_LIMIT,
            });
        }

        Ok(Self { offset, limit })
    }

    /// Borrow this page out of `items`
    pub fn slice<'a, T>(&self, items: &'a [T]) -> (&'a [T], PageSlice) {
        let total_count = items.len() as i64;
        let start = self.offset.min(total_count) as usize;
        let end = (self.offset.saturating_add(self.limit)).min(total_count) as usize;
        let (page, total_pages) = calculate_pagination(self.offset, self.limit, total_count);

        let meta = PageSlice {
            offset: self.offset,
            limit: self.limit,
            page,
            total_pages,
            total_count,
            has_prev: self.offset > 0,
            has_more: (end as i64) < total_count,
            prev_offset: (self.offset - self.limit).max(0),
            next_offset: self.offset.saturating_add(self.limit),
        };
        (&items[start..end], meta)
    }
}

/// Calculate pagination metadata
/// Returns (page, total_pages)
pub fn calculate_pagination(offset: i64, limit: i64, total_count: i64) -> (i64, i64) {
    let page = (offset / limit) + 1;
    let total_pages = ((total_count as f64) / (limit as f64)).ceil() as i64;
    (page, total_pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_calculation() {
        assert_eq!(calculate_pagination(0, 20, 100), (1, 5));
        assert_eq!(calculate_pagination(20, 20, 100), (2, 5));
        assert_eq!(calculate_pagination(0, 20, 95), (1, 5));
        assert_eq!(calculate_pagination(0, 20, 0), (1, 0));
    }

    #[test]
    fn test_page_request_defaults() {
        let page = PageRequest::new(None, None, 20).unwrap();
        assert_eq!(page, PageRequest { offset: 0, limit: 20 });
    }

    #[test]
    fn test_page_request_rejects_bad_values() {
        assert_eq!(
            PageRequest::new(Some(-1), None, 20),
            Err(TableError::InvalidOffset(-1))
        );
        assert!(PageRequest::new(None, Some(0), 20).is_err());
        assert!(PageRequest::new(None, Some(MAX_PAGE_LIMIT + 1), 20).is_err());
    }

    #[test]
    fn test_slice_middle_page() {
        let items: Vec<u32> = (0..45).collect();
        let page = PageRequest::new(Some(20), Some(20), 20).unwrap();
        let (rows, meta) = page.slice(&items);
        assert_eq!(rows.first(), Some(&20));
        assert_eq!(rows.len(), 20);
        assert_eq!(meta.page, 2);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_prev);
        assert!(meta.has_more);
        assert_eq!(meta.prev_offset, 0);
        assert_eq!(meta.next_offset, 40);
    }

    #[test]
    fn test_slice_past_end_is_empty() {
        let items: Vec<u32> = (0..5).collect();
        let page = PageRequest::new(Some(40), Some(20), 20).unwrap();
        let (rows, meta) = page.slice(&items);
        assert!(rows.is_empty());
        assert!(!meta.has_more);
        assert_eq!(meta.total_count, 5);
    }
}
