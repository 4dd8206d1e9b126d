//! Formatting utilities for file sizes and upload dates.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

/// Format a size in kilobytes with two decimals (e.g., "1.50 KB").
pub fn format_size_kb(kb: f64) -> String {
    format!("{kb:.2} KB")
}

/// Format an upload instant in the browser's time zone (e.g., "2024-03-05 19:15").
pub fn format_uploaded_at(at: &DateTime<Utc>) -> String {
    format_uploaded_at_in(at, &Local)
}

fn format_uploaded_at_in<Tz>(at: &DateTime<Utc>, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.with_timezone(zone).format("%Y-%m-%d %H:%M").to_string()
}

/// Short MIME label for the type column ("png" for "image/png").
pub fn format_file_type(mime: &str) -> String {
    match mime.split_once('/') {
        Some((_, sub)) if !sub.is_empty() => sub.to_string(),
        _ => mime.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    #[test]
    fn test_format_size_kb() {
        assert_eq!(format_size_kb(0.0), "0.00 KB");
        assert_eq!(format_size_kb(1.5), "1.50 KB");
        assert_eq!(format_size_kb(1024.0), "1024.00 KB");
    }

    #[test]
    fn test_format_uploaded_at_converts_zone() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 22, 15, 30).unwrap();
        let seoul = FixedOffset::east_opt(9 * 3600).unwrap();
        let new_york = FixedOffset::west_opt(5 * 3600).unwrap();

        assert_eq!(format_uploaded_at_in(&at, &Utc), "2024-03-05 22:15");
        assert_eq!(format_uploaded_at_in(&at, &seoul), "2024-03-06 07:15");
        assert_eq!(format_uploaded_at_in(&at, &new_york), "2024-03-05 17:15");
    }

    #[test]
    fn test_format_uploaded_at_uses_local_zone() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 10, 15, 30).unwrap();
        assert_eq!(format_uploaded_at(&at), format_uploaded_at_in(&at, &Local));
    }

    #[test]
    fn test_format_file_type() {
        assert_eq!(format_file_type("image/png"), "png");
        assert_eq!(format_file_type("application/pdf"), "pdf");
        assert_eq!(format_file_type("unknown"), "unknown");
        assert_eq!(format_file_type("text/"), "text/");
    }
}
