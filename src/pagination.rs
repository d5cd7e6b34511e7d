//! Page-number pagination with next/previous links.

use crate::error::AppError;
use serde::Serialize;
use utoipa::ToSchema;

/// Hard cap on `page_size`, whatever the caller asks for.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Envelope for list responses: total row count, relative links to the
/// neighbouring pages (null at the edges), and the rows of this page.
#[derive(Debug, Serialize, ToSchema)]
pub struct Paginated<T> {
    #[schema(example = 42)]
    pub count: u64,
    #[schema(example = "/products/?page=2")]
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Requested page, 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub size: u32,
}

impl Page {
    /// Build from raw `page` / `page_size` params. A malformed or zero `page`
    /// is 404 (the convention of the original framework's paginator); a
    /// malformed `page_size` falls back to the default and is capped.
    pub fn from_params(
        page: Option<&str>,
        page_size: Option<&str>,
        default_size: u32,
    ) -> Result<Self, AppError> {
        let number = match page {
            None => 1,
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => return Err(AppError::NotFound("invalid page".into())),
            },
        };
        let size = match page_size.and_then(|s| s.parse::<u32>().ok()) {
            Some(n) if n >= 1 => n.min(MAX_PAGE_SIZE),
            _ => default_size.min(MAX_PAGE_SIZE),
        };
        Ok(Page { number, size })
    }

    pub fn offset(&self) -> u64 {
        (self.number as u64 - 1) * self.size as u64
    }

    /// 404 when the page starts past the end of the result set. Page 1 is
    /// always in range so an empty collection still lists as 200.
    pub fn ensure_in_range(&self, count: u64) -> Result<(), AppError> {
        if self.number > 1 && self.offset() >= count {
            return Err(AppError::NotFound("invalid page".into()));
        }
        Ok(())
    }
}

/// Assemble the envelope for one page of results.
pub fn paginate<T>(page: &Page, count: u64, path: &str, query: &str, results: Vec<T>) -> Paginated<T> {
    let next = if page.offset() + (page.size as u64) < count {
        Some(page_url(path, query, page.number + 1))
    } else {
        None
    };
    let previous = if page.number > 1 {
        Some(page_url(path, query, page.number - 1))
    } else {
        None
    };
    Paginated {
        count,
        next,
        previous,
        results,
    }
}

/// Relative URL for `page`, preserving every other query parameter in caller
/// order. `page=1` is the unmarked form, so the param is dropped there.
fn page_url(path: &str, query: &str, page: u32) -> String {
    let mut pairs: Vec<String> = query
        .split('&')
        .filter(|p| !p.is_empty() && p.split('=').next() != Some("page"))
        .map(|p| p.to_string())
        .collect();
    if page > 1 {
        pairs.push(format!("page={}", page));
    }
    if pairs.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, pairs.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page() {
        let p = Page::from_params(None, None, 10).unwrap();
        assert_eq!(p, Page { number: 1, size: 10 });
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn malformed_page_is_not_found() {
        assert!(Page::from_params(Some("0"), None, 10).is_err());
        assert!(Page::from_params(Some("abc"), None, 10).is_err());
        assert!(Page::from_params(Some("-1"), None, 10).is_err());
    }

    #[test]
    fn page_size_is_capped_and_forgiving() {
        let p = Page::from_params(None, Some("5"), 10).unwrap();
        assert_eq!(p.size, 5);
        let p = Page::from_params(None, Some("100000"), 10).unwrap();
        assert_eq!(p.size, MAX_PAGE_SIZE);
        let p = Page::from_params(None, Some("zero"), 10).unwrap();
        assert_eq!(p.size, 10);
    }

    #[test]
    fn out_of_range_page_is_not_found() {
        let p = Page { number: 3, size: 10 };
        assert!(p.ensure_in_range(20).is_err());
        assert!(p.ensure_in_range(21).is_ok());
        // first page of an empty collection is fine
        let p = Page { number: 1, size: 10 };
        assert!(p.ensure_in_range(0).is_ok());
    }

    #[test]
    fn links_preserve_other_params() {
        let page = Page { number: 2, size: 2 };
        let out = paginate(&page, 5, "/products/", "ordering=price&page=2", vec![1, 2]);
        assert_eq!(out.count, 5);
        assert_eq!(out.next.as_deref(), Some("/products/?ordering=price&page=3"));
        assert_eq!(out.previous.as_deref(), Some("/products/?ordering=price"));
    }

    #[test]
    fn edge_pages_have_null_links() {
        let page = Page { number: 1, size: 10 };
        let out = paginate(&page, 3, "/products/", "", vec![1, 2, 3]);
        assert!(out.next.is_none());
        assert!(out.previous.is_none());
    }

    #[test]
    fn next_link_stops_at_the_exact_end() {
        // 20 rows, size 10: page 2 is the last page
        let page = Page { number: 2, size: 10 };
        let out = paginate(&page, 20, "/products/", "page=2", vec![0; 10]);
        assert!(out.next.is_none());
        let out = paginate(&page, 21, "/products/", "page=2", vec![0; 10]);
        assert_eq!(out.next.as_deref(), Some("/products/?page=3"));
    }

    #[test]
    fn previous_link_to_first_page_drops_page_param() {
        let page = Page { number: 2, size: 1 };
        let out = paginate(&page, 3, "/products/", "page=2", vec![1]);
        assert_eq!(out.previous.as_deref(), Some("/products/"));
        assert_eq!(out.next.as_deref(), Some("/products/?page=3"));
    }
}
