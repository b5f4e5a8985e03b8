//! Page-number pagination shared by every paginated list endpoint.

use serde::{Deserialize, Serialize};

/// Default number of items per page when `limit` is absent.
pub const DEFAULT_LIMIT: u32 = 6;

/// Upper bound enforced on `limit` regardless of what the client asks for.
pub const MAX_LIMIT: u32 = 15;

/// Pagination parameters shared across all list endpoints.
///
/// - `limit`: 1–15, default 6
/// - `page`: ≥ 1, default 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

fn default_page() -> u32 {
    1
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            page: default_page(),
        }
    }
}

impl PageRequest {
    /// Build a request from optional query values, falling back to defaults.
    pub fn from_query(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            limit: limit.unwrap_or_else(default_limit),
            page: page.unwrap_or_else(default_page),
        }
        .clamped()
    }

    /// Clamp `limit` to the valid range 1–15 and `page` to ≥ 1.
    ///
    /// Call after deserializing from query params to enforce bounds.
    pub fn clamped(self) -> Self {
        Self {
            limit: self.limit.clamp(1, MAX_LIMIT),
            page: self.page.max(1),
        }
    }

    /// Number of rows to skip for this page.
    pub fn offset(&self) -> u64 {
        let PageRequest { limit, page } = self.clamped();
        u64::from(page - 1) * u64::from(limit)
    }
}

/// One page of results plus the total count and neighbouring page numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<u32>,
    pub previous: Option<u32>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(results: Vec<T>, count: u64, request: PageRequest) -> Self {
        let PageRequest { limit, page } = request.clamped();
        let shown = u64::from(page) * u64::from(limit);
        Self {
            count,
            next: (shown < count).then_some(page + 1),
            previous: (page > 1).then(|| page - 1),
            results,
        }
    }

    /// Convert every item while keeping the page markers.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}
