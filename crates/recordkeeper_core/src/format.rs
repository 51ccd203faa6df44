//! Display formatting helpers shared by every projector.
//!
//! All functions are pure so view-model output is reproducible in tests.

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

static WORD_START_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w").expect("valid word regex"));

/// Formats money with two decimals and thousands separators: `$1,299.99`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let digits = format!("{:.2}", rounded.abs());
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${}.{fraction}", group_thousands(whole))
}

/// Formats money without forced decimals: `$4,350`, `$1,299.99`.
pub fn format_compact_currency(amount: Decimal) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${}", format_compact_number(amount.abs()))
}

/// Formats a signed ledger amount: `+$1,500` for credits, `-$150` for debits.
pub fn format_signed_amount(amount: Decimal, credit: bool) -> String {
    let sign = if credit { "+" } else { "-" };
    format!("{sign}${}", format_compact_number(amount.abs()))
}

/// Formats a plain number with thousands separators and at most two decimals.
pub fn format_compact_number(value: Decimal) -> String {
    let normalized = value.round_dp(2).normalize().to_string();
    let (negative, unsigned) = match normalized.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, normalized.as_str()),
    };
    let grouped = match unsigned.split_once('.') {
        Some((whole, fraction)) => format!("{}.{fraction}", group_thousands(whole)),
        None => group_thousands(unsigned),
    };
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// `Dec 12, 2025`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `Dec 12, 2025, 10:30 AM`
pub fn format_date_time(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y, %I:%M %p").to_string()
}

/// `10:30 AM`
pub fn format_time(at: DateTime<Utc>) -> String {
    at.format("%I:%M %p").to_string()
}

/// Turns a kebab-case tag into a title: `customer-info` -> `Customer Info`.
pub fn title_case_tag(tag: &str) -> String {
    let spaced = tag.replace('-', " ");
    WORD_START_RE
        .replace_all(&spaced, |caps: &regex::Captures<'_>| caps[0].to_uppercase())
        .into_owned()
}

/// Keeps the first `max_chars` characters and appends an ellipsis.
pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    let mut preview = text.chars().take(max_chars).collect::<String>();
    preview.push_str("...");
    preview
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::{
        format_compact_currency, format_currency, format_date, format_date_time,
        format_signed_amount, format_time, title_case_tag, truncate_preview,
    };
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;

    #[test]
    fn currency_uses_two_decimals_and_grouping() {
        assert_eq!(format_currency(Decimal::new(129999, 2)), "$1,299.99");
        assert_eq!(format_currency(Decimal::new(25, 0)), "$25.00");
        assert_eq!(format_currency(Decimal::new(-15000, 2)), "-$150.00");
        assert_eq!(format_currency(Decimal::new(123456789, 0)), "$123,456,789.00");
    }

    #[test]
    fn compact_currency_drops_trailing_zeros() {
        assert_eq!(format_compact_currency(Decimal::new(4350, 0)), "$4,350");
        assert_eq!(format_compact_currency(Decimal::new(129999, 2)), "$1,299.99");
        assert_eq!(format_signed_amount(Decimal::new(1500, 0), true), "+$1,500");
        assert_eq!(format_signed_amount(Decimal::new(150, 0), false), "-$150");
    }

    #[test]
    fn dates_use_short_month_names() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 5).unwrap();
        assert_eq!(format_date(date), "Dec 5, 2025");

        let at = Utc.with_ymd_and_hms(2025, 12, 12, 14, 5, 0).unwrap();
        assert_eq!(format_date_time(at), "Dec 12, 2025, 02:05 PM");
        assert_eq!(format_time(at), "02:05 PM");
    }

    #[test]
    fn tags_become_titles() {
        assert_eq!(title_case_tag("customer-info"), "Customer Info");
        assert_eq!(title_case_tag("in-progress"), "In Progress");
        assert_eq!(title_case_tag("sales"), "Sales");
    }

    #[test]
    fn preview_truncates_by_characters() {
        assert_eq!(truncate_preview("abcdef", 3), "abc...");
        assert_eq!(truncate_preview("ab", 3), "ab...");
    }
}
