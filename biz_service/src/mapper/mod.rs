//! Pure conversions between entities and request/response DTOs.

pub mod application_mapper;
pub mod attendance_mapper;
pub mod banner_mapper;
pub mod coupon_mapper;
pub mod memo_mapper;
pub mod mission_mapper;
pub mod program_mapper;
pub mod review_mapper;
pub mod user_mapper;

use common::errors::AppError;
use common::util::date_util::parse_date;

pub fn parse_date_field(field: &str, value: &str) -> Result<i64, AppError> {
    parse_date(value).ok_or_else(|| AppError::Validation(format!("{} must be formatted as YYYY-MM-DD HH:MM, got '{}'", field, value)))
}

pub fn parse_opt_date_field(field: &str, value: Option<&str>) -> Result<Option<i64>, AppError> {
    value.map(|v| parse_date_field(field, v)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_date_is_a_validation_error() {
        let err = parse_date_field("dueDate", "tomorrow").unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("dueDate")));
        assert_eq!(parse_opt_date_field("endDate", None).unwrap(), None);
    }
}
