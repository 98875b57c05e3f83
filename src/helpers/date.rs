//! Date helper functions

use chrono::NaiveDate;

/// Format of the `date` key in a post's metadata block (e.g. `25-12-2023`)
pub const METADATA_DATE_FORMAT: &str = "dd-MM-yyyy";

/// Format of the human-readable publish date (e.g. `Dec 25, 2023`)
pub const DISPLAY_DATE_FORMAT: &str = "MMM dd, yyyy";

/// Parse a metadata date string
pub fn parse_metadata_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), &pattern_to_chrono_format(METADATA_DATE_FORMAT)).ok()
}

/// Format a date for display
pub fn display_date(date: &NaiveDate) -> String {
    format_date(date, DISPLAY_DATE_FORMAT)
}

/// Format a date using a `yyyy`/`MM`/`dd` style pattern
///
/// # Examples
/// ```ignore
/// format_date(&date, "dd-MM-yyyy") // -> "25-12-2023"
/// ```
pub fn format_date(date: &NaiveDate, pattern: &str) -> String {
    date.format(&pattern_to_chrono_format(pattern)).to_string()
}

/// Convert a date pattern (`yyyy`, `MMM`, `dd`, ...) to a chrono format string
fn pattern_to_chrono_format(pattern: &str) -> String {
    // Longest tokens first within each field
    let replacements = [
        ("yyyy", "%Y"),
        ("yy", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("dd", "%d"),
        ("EEEE", "%A"),
        ("EEE", "%a"),
    ];

    let mut result = String::with_capacity(pattern.len());
    let mut rest = pattern;

    'outer: while !rest.is_empty() {
        for (from, to) in replacements {
            if let Some(tail) = rest.strip_prefix(from) {
                result.push_str(to);
                rest = tail;
                continue 'outer;
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            if c == '%' {
                result.push_str("%%");
            } else {
                result.push(c);
            }
        }
        rest = chars.as_str();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metadata_date() {
        let date = parse_metadata_date("25-12-2023").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 12, 25).unwrap());
    }

    #[test]
    fn test_parse_metadata_date_rejects_other_formats() {
        assert!(parse_metadata_date("2023-12-25").is_none());
        assert!(parse_metadata_date("12/25/2023").is_none());
        assert!(parse_metadata_date("31-02-2023").is_none());
        assert!(parse_metadata_date("yesterday").is_none());
        assert!(parse_metadata_date("").is_none());
    }

    #[test]
    fn test_display_date() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 25).unwrap();
        assert_eq!(display_date(&date), "Dec 25, 2023");

        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(display_date(&date), "Mar 05, 2024");
    }

    #[test]
    fn test_pattern_to_chrono() {
        assert_eq!(pattern_to_chrono_format("dd-MM-yyyy"), "%d-%m-%Y");
        assert_eq!(pattern_to_chrono_format("MMM dd, yyyy"), "%b %d, %Y");
        assert_eq!(pattern_to_chrono_format("MMMM yy"), "%B %y");
        assert_eq!(pattern_to_chrono_format("100%"), "100%%");
    }
}
