//! Result-count patterns
//!
//! Job boards phrase the count as "Page 1 of 1,234 jobs" or just
//! "1,234 jobs". The "of" form is tried first because the bare form would
//! otherwise pick up the page number in the paginated phrasing.

use regex::Regex;
use std::sync::LazyLock;

/// Digits with optional grouping separators (comma, period, no-break spaces)
///
/// A leading `-` is captured so that negatives and the tail of a range
/// such as "1-15 jobs" can be told apart from a standalone count.
const NUMBER: &str = r"-?\d[\d,.\x{00A0}\x{202F}]*";

static OF_N_JOBS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\bof\s+({})\+?\s+jobs?\b", NUMBER))
        .expect("Failed to compile 'of N jobs' regex")
});

static N_JOBS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)({})\+?\s+jobs?\b", NUMBER))
        .expect("Failed to compile 'N jobs' regex")
});

/// Parses a job count out of a text fragment
///
/// Every candidate of a phrasing is tried in order, so a rejected one (a
/// range, a decimal, a negative) does not hide a later valid count.
/// Returns `None` when no candidate parses or the number does not fit in a
/// `u64`.
///
/// # Example
///
/// ```
/// use jobwatch::extract::parse_count;
///
/// assert_eq!(parse_count("Page 1 of 1,234 jobs"), Some(1234));
/// assert_eq!(parse_count("1,234 jobs"), Some(1234));
/// assert_eq!(parse_count("no results"), None);
/// ```
pub fn parse_count(fragment: &str) -> Option<u64> {
    [&*OF_N_JOBS_RE, &*N_JOBS_RE].into_iter().find_map(|re| {
        re.captures_iter(fragment)
            .filter_map(|caps| caps.get(1))
            .find_map(|m| parse_grouped_number(m.as_str()))
    })
}

/// Strips grouping separators and parses the remaining digits
///
/// A period only groups when exactly three digits follow it; "1.5" is a
/// decimal and is rejected rather than read as 15.
fn parse_grouped_number(raw: &str) -> Option<u64> {
    if raw.starts_with('-') {
        return None;
    }

    let decimal = raw.match_indices('.').any(|(i, _)| {
        raw[i + 1..].chars().take_while(char::is_ascii_digit).count() != 3
    });
    if decimal {
        return None;
    }

    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    digits.parse().ok()
}
