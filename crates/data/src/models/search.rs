//! Request and result models for single and bulk live status searches.

use std::sync::LazyLock;

use phonelive_core::types::{DbId, Timestamp};
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Indonesian mobile numbers: `08…`, `628…` or `+628…`.
pub const PHONE_NUMBER_PATTERN: &str = r"^(\+?62|0)8[0-9]{6,13}$";

/// Upper bound on numbers accepted by one bulk request.
pub const MAX_BULK_NUMBERS: usize = 1000;

pub static PHONE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_NUMBER_PATTERN).expect("valid regex"));

/// Body of `POST /single-request`.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct SingleSearchRequest {
    #[validate(
        length(min = 8, max = 16, message = "phone_number must be 8 to 16 characters"),
        regex(path = *PHONE_NUMBER_RE, message = "phone_number is not a valid mobile number")
    )]
    pub phone_number: String,
    /// Optional reference to the caller's loan application.
    #[validate(length(max = 64))]
    pub loan_no: Option<String>,
}

/// Body of `POST /bulk-request`.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkSearchRequest {
    pub phone_numbers: Vec<String>,
    /// Display name for the resulting job. Defaults to a timestamped name.
    pub file_name: Option<String>,
}

/// Live status of one phone number as reported by the upstream service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneLiveStatusResult {
    pub phone_number: String,
    pub subscriber_status: String,
    pub operator: Option<String>,
    pub device_status: Option<String>,
    pub checked_at: Timestamp,
}

/// Upstream payload for a single search, scoped to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct SingleSearchCommand {
    pub company_id: DbId,
    pub member_id: DbId,
    pub phone_number: String,
    pub loan_no: Option<String>,
}

/// Upstream payload creating a bulk job.
#[derive(Debug, Clone, Serialize)]
pub struct NewBulkJob {
    pub company_id: DbId,
    pub member_id: DbId,
    pub name: String,
    pub phone_numbers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(phone: &str) -> SingleSearchRequest {
        SingleSearchRequest {
            phone_number: phone.to_string(),
            loan_no: None,
        }
    }

    #[test]
    fn accepts_local_and_international_prefixes() {
        for phone in ["081234567890", "6281234567890", "+6281234567890"] {
            assert!(request(phone).validate().is_ok(), "{phone} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_numbers() {
        for phone in ["", "12345", "0212345678", "08abc4567890", "+62812345678901234"] {
            assert!(request(phone).validate().is_err(), "{phone} should be invalid");
        }
    }

    #[test]
    fn rejects_overlong_loan_reference() {
        let mut req = request("081234567890");
        req.loan_no = Some("x".repeat(65));
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("loan_no"));
    }
}
