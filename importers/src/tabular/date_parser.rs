use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];

/// Parse a deadline cell. ISO dates are expected; a couple of common
/// spreadsheet layouts are accepted too. Anything else yields `None`.
pub fn parse_deadline(date_str: &str) -> Option<NaiveDate> {
    let trimmed = date_str.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    // Spreadsheet exports sometimes carry a time of day
    if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(datetime.date());
    }

    if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(datetime.date());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_iso_date() {
        let date = parse_deadline("2024-02-15").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 2);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_parse_french_layout() {
        assert_eq!(
            parse_deadline("15/02/2024"),
            NaiveDate::from_ymd_opt(2024, 2, 15)
        );
    }

    #[test]
    fn test_parse_with_time() {
        assert_eq!(
            parse_deadline("2024-02-15T09:30:00"),
            NaiveDate::from_ymd_opt(2024, 2, 15)
        );
    }

    #[test]
    fn test_invalid_dates() {
        assert!(parse_deadline("").is_none());
        assert!(parse_deadline("   ").is_none());
        assert!(parse_deadline("bientôt").is_none());
        assert!(parse_deadline("2024-02-30").is_none());
    }
}
