use serde::{Deserialize, Serialize};

use super::error::ResourceError;
use super::{ListFilters, Validate};

/// Largest page a single list call may request.
pub const MAX_LIMIT: i64 = 100;

/// Pagination, ordering and per-resource filters for a list call.
///
/// `skip` and `limit` of 0 mean "not set". An empty `order_by` leaves the
/// order to the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListOptions<F> {
    #[serde(flatten)]
    pub filters: F,
    #[serde(default)]
    pub skip: i64,
    #[serde(default)]
    pub limit: i64,
    #[serde(default)]
    pub order_by: String,
    #[serde(default)]
    pub order_direction: String,
}

impl<F: ListFilters> Validate for ListOptions<F> {
    fn validate(&self) -> Result<(), ResourceError> {
        if self.skip < 0 {
            return Err(ResourceError::InvalidFilters(format!("skip must be >= 0, got {}", self.skip)));
        }
        if self.limit < 0 || self.limit > MAX_LIMIT {
            return Err(ResourceError::InvalidFilters(format!(
                "limit must be between 0 and {}, got {}",
                MAX_LIMIT, self.limit
            )));
        }
        Ok(())
    }
}

/// Query-string half of [`ListOptions`]. Kept separate from the filters since
/// flattened structs lose number parsing under url-encoding.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default)]
    pub limit: i64,
    #[serde(default)]
    pub order_by: String,
    #[serde(default)]
    pub order_direction: String,
}

impl Pagination {
    pub fn with_filters<F>(self, filters: F) -> ListOptions<F> {
        ListOptions {
            filters,
            skip: self.skip,
            limit: self.limit,
            order_by: self.order_by,
            order_direction: self.order_direction,
        }
    }
}

pub(crate) fn require_title(title: &str) -> Result<(), ResourceError> {
    if title.is_empty() {
        return Err(ResourceError::InvalidTitle);
    }
    Ok(())
}
