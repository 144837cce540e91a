// src/utils/date.rs
use chrono::{DateTime, Utc};

/// Layout of `users.date_created`.
pub const DB_DATE_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn now_db_format() -> String {
    now().format(DB_DATE_LAYOUT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn db_format_parses_back_with_layout() {
        let stamp = now_db_format();
        assert_eq!(stamp.len(), "2024-01-31 12:00:00".len());
        assert!(NaiveDateTime::parse_from_str(&stamp, DB_DATE_LAYOUT).is_ok());
    }
}
