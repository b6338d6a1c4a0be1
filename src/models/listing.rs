use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Pagination block returned with every list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(page: i64, page_size: i64, total: i64) -> Self {
        Self {
            page,
            page_size,
            total,
            // saturating: pageSize may be any positive i64 per the contract
            total_pages: total.saturating_add(page_size - 1) / page_size,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Paged<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Case-insensitive "desc"; everything else falls back to ascending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.eq_ignore_ascii_case("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Coerce a raw query-string value to a positive integer, falling back to the
/// default instead of rejecting the request.
pub fn positive_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

/// OFFSET for a one-based page; saturates instead of overflowing so extreme
/// page numbers degrade to an empty page rather than a panic.
pub fn offset(page: i64, page_size: i64) -> i64 {
    (page - 1).saturating_mul(page_size)
}

/// Non-empty filter value, or no predicate at all.
pub fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.filter(|value| !value.is_empty())
}

pub fn parse_i32(raw: Option<&str>) -> Option<i32> {
    non_empty(raw).and_then(|value| value.trim().parse().ok())
}

/// Only the literal strings "true"/"false" apply the boolean filter.
pub fn parse_bool_literal(raw: Option<&str>) -> Option<bool> {
    match raw {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    }
}

/// Accepts an RFC 3339 timestamp or a bare YYYY-MM-DD date (midnight UTC).
/// Unparseable bounds are ignored rather than rejected.
pub fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = non_empty(raw)?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// `%term%` pattern for LIKE, with LIKE metacharacters escaped so the filter
/// stays a plain substring match.
pub fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_rounds_total_pages_up() {
        assert_eq!(Pagination::new(1, 10, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 10, 10).total_pages, 1);
        assert_eq!(Pagination::new(1, 10, 11).total_pages, 2);
        assert_eq!(Pagination::new(2, 3, 7).total_pages, 3);
    }

    #[test]
    fn extreme_page_and_page_size_do_not_overflow() {
        let page_size = positive_or(Some("9223372036854775807"), DEFAULT_PAGE_SIZE);
        assert_eq!(page_size, i64::MAX);
        assert_eq!(Pagination::new(1, page_size, 2).total_pages, 1);

        let page = positive_or(Some("9223372036854775807"), DEFAULT_PAGE);
        assert_eq!(offset(page, 10), i64::MAX);
        assert_eq!(offset(page, page_size), i64::MAX);
    }

    #[test]
    fn offset_is_zero_based_pages_times_page_size() {
        assert_eq!(offset(1, 10), 0);
        assert_eq!(offset(3, 10), 20);
    }

    #[test]
    fn positive_or_falls_back_on_garbage() {
        assert_eq!(positive_or(Some("3"), 1), 3);
        assert_eq!(positive_or(Some("0"), 1), 1);
        assert_eq!(positive_or(Some("-2"), 1), 1);
        assert_eq!(positive_or(Some("abc"), 10), 10);
        assert_eq!(positive_or(None, 10), 10);
    }

    #[test]
    fn sort_order_defaults_to_asc() {
        assert_eq!(SortOrder::parse(Some("desc")), SortOrder::Desc);
        assert_eq!(SortOrder::parse(Some("DESC")), SortOrder::Desc);
        assert_eq!(SortOrder::parse(Some("asc")), SortOrder::Asc);
        assert_eq!(SortOrder::parse(Some("sideways")), SortOrder::Asc);
        assert_eq!(SortOrder::parse(None), SortOrder::Asc);
    }

    #[test]
    fn bool_filter_only_accepts_literals() {
        assert_eq!(parse_bool_literal(Some("true")), Some(true));
        assert_eq!(parse_bool_literal(Some("false")), Some(false));
        assert_eq!(parse_bool_literal(Some("TRUE")), None);
        assert_eq!(parse_bool_literal(Some("1")), None);
        assert_eq!(parse_bool_literal(None), None);
    }

    #[test]
    fn timestamp_accepts_rfc3339_and_bare_dates() {
        let full = parse_timestamp(Some("2024-05-01T12:30:00Z")).unwrap();
        assert_eq!(full.to_rfc3339(), "2024-05-01T12:30:00+00:00");

        let date_only = parse_timestamp(Some("2024-05-01")).unwrap();
        assert_eq!(date_only.to_rfc3339(), "2024-05-01T00:00:00+00:00");

        assert_eq!(parse_timestamp(Some("next tuesday")), None);
        assert_eq!(parse_timestamp(Some("")), None);
    }

    #[test]
    fn contains_pattern_escapes_like_metacharacters() {
        assert_eq!(contains_pattern("App"), "%App%");
        assert_eq!(contains_pattern("50%"), "%50\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
    }
}
