use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

/// Wire format of every date input and output.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn now() -> i64 {
    Local::now().timestamp()
}

/// Parses `YYYY-MM-DD HH:MM` in local time into Unix seconds.
pub fn parse_date(value: &str) -> Option<i64> {
    let naive = NaiveDateTime::parse_from_str(value.trim(), DATE_FORMAT).ok()?;
    Local.from_local_datetime(&naive).earliest().map(|t| t.timestamp())
}

pub fn time_to_str(time: i64) -> String {
    DateTime::from_timestamp(time, 0)
        .map(|t| t.with_timezone(&Local).format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}
