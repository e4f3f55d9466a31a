//! Pagination utilities for API responses.
//!
//! List endpoints use page-based pagination:
//!
//! - `page`: Page number (1-indexed, default: 1)
//! - `limit`: Items per page (1-100, default: 10)
//!
//! # Example
//!
//! ```ignore
//! use jobboard_core::pagination::{PaginationParams, PaginationMeta};
//!
//! let params = PaginationParams { page: Some(2), limit: Some(5) };
//! let posts = store.find(params.offset(), params.limit()).await?;
//! let total = store.count().await?;
//!
//! let meta = PaginationMeta::new(params.page(), params.limit(), total);
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Deserializes an optional string into an optional i64.
///
/// Query parameters may arrive as empty strings (`?page=`), which are
/// treated as `None`.
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s.trim().parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Metadata about a paginated response.
///
/// ```json
/// { "page": 2, "limit": 5, "total": 12, "pages": 3, "hasMore": true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page number
    pub page: i64,
    /// Items per page (the limit that was applied)
    pub limit: i64,
    /// Total number of items matching the query
    pub total: i64,
    /// Number of pages, `ceil(total / limit)`
    pub pages: i64,
    /// Whether there are more items after this page
    pub has_more: bool,
}

impl PaginationMeta {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let limit = limit.max(1);
        let pages = (total + limit - 1) / limit;

        Self {
            page,
            limit,
            total,
            pages,
            has_more: page * limit < total,
        }
    }
}

/// Query parameters for page-based pagination.
///
/// - `limit` is clamped to the range [1, 100]
/// - `page` is clamped to a minimum of 1
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PaginationParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

impl PaginationParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Bounded above so that `offset()` cannot overflow.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).clamp(1, i64::MAX / MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}
