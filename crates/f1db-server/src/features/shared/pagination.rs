//! Shared pagination utilities
//!
//! Limit/offset pagination for list queries. Absent values fall back to
//! defaults; explicit out-of-range values are rejected with a validation
//! error rather than silently adjusted.

use serde::{Deserialize, Serialize};

/// Default number of items returned by list queries.
pub const DEFAULT_LIMIT: i64 = 50;

/// Maximum number of items one page may request.
pub const MAX_LIMIT: i64 = 200;

/// Common pagination request parameters
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PageParams {
    /// Items per page. Defaults to 50, must be within 1-200.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,

    /// Number of items to skip. Defaults to 0, must not be negative.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

impl PageParams {
    /// Create new pagination parameters
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self { limit, offset }
    }

    /// Effective limit, defaulting to 50
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    /// Effective offset, defaulting to 0
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }

    /// Validate pagination parameters
    ///
    /// Only explicit values are checked; absent values take the defaults.
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(limit) = self.limit {
            if !(1..=MAX_LIMIT).contains(&limit) {
                return Err("limit must be between 1 and 200");
            }
        }
        if let Some(offset) = self.offset {
            if offset < 0 {
                return Err("offset must not be negative");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_params_defaults() {
        let params = PageParams::default();
        assert_eq!(params.limit(), 50);
        assert_eq!(params.offset(), 0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_page_params_custom() {
        let params = PageParams::new(Some(25), Some(100));
        assert_eq!(params.limit(), 25);
        assert_eq!(params.offset(), 100);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_page_params_bounds_are_inclusive() {
        assert!(PageParams::new(Some(1), Some(0)).validate().is_ok());
        assert!(PageParams::new(Some(200), None).validate().is_ok());
    }

    #[test]
    fn test_out_of_range_values_are_rejected_not_adjusted() {
        let params = PageParams::new(Some(1000), None);
        assert_eq!(
            params.validate(),
            Err("limit must be between 1 and 200")
        );

        let params = PageParams::new(Some(0), None);
        assert_eq!(
            params.validate(),
            Err("limit must be between 1 and 200")
        );

        let params = PageParams::new(None, Some(-5));
        assert_eq!(params.validate(), Err("offset must not be negative"));
    }
}
