//! Field formatting shared by the document blocks.
//!
//! These strings are the compatibility surface of the rendered document;
//! downstream systems scrape and reconcile against them, so the exact forms
//! matter more than typographic taste.

use chrono::{DateTime, Utc};

/// `MMM dd, yyyy`, e.g. `Jan 05, 2024`.
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%b %d, %Y").to_string()
}

/// Line-item currency: exactly two decimals with a `$` prefix (`$1.00`,
/// `$1234.50`). No thousands separators.
pub fn format_money(value: f64) -> String {
    format!("${value:.2}")
}

/// Grand-total currency: `$` prefixed onto the number's native string form
/// (`$100`, `$1234.5`), so the issued total passes through verbatim.
pub fn format_total(value: f64) -> String {
    format!("${value}")
}

/// Quantity in its native string form: integer-like for whole values (`2`),
/// fractional values as-is (`2.5`).
pub fn format_quantity(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn dates_use_month_abbreviation_and_padded_day() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
        assert_eq!(format_date(date), "Jan 05, 2024");

        let end_of_year = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(format_date(end_of_year), "Dec 31, 2023");
    }

    #[test]
    fn money_always_carries_two_decimals() {
        assert_eq!(format_money(1.0), "$1.00");
        assert_eq!(format_money(50.0), "$50.00");
        assert_eq!(format_money(1234.5), "$1234.50");
        assert_eq!(format_money(0.0), "$0.00");
    }

    #[test]
    fn total_uses_the_native_number_form() {
        assert_eq!(format_total(100.0), "$100");
        assert_eq!(format_total(1234.5), "$1234.5");
        assert_eq!(format_total(0.0), "$0");
    }

    #[test]
    fn quantity_is_integer_like_for_whole_values() {
        assert_eq!(format_quantity(2.0), "2");
        assert_eq!(format_quantity(10.0), "10");
        assert_eq!(format_quantity(2.5), "2.5");
    }
}
