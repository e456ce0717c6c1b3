//! Driver row model shared by the driver queries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One driver row as returned by every driver endpoint
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Driver {
    pub driver_id: i32,
    pub code: Option<String>,
    pub forename: String,
    pub surname: String,
    pub dob: Option<NaiveDate>,
    pub nationality: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_serializes_null_fields() {
        let driver = Driver {
            driver_id: 1,
            code: None,
            forename: "Lewis".to_string(),
            surname: "Hamilton".to_string(),
            dob: None,
            nationality: Some("British".to_string()),
        };

        let json = serde_json::to_value(&driver).unwrap();
        assert_eq!(json["driver_id"], 1);
        assert!(json["code"].is_null());
        assert!(json["dob"].is_null());
    }
}
