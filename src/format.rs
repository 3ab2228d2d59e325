//! Formatting amounts and times for display.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use time::PrimitiveDateTime;

/// Format `number` as yuan with thousands separators and two decimals, e.g.
/// "¥1,234.50" or "-¥35.00".
pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("¥")
            .ok()
            .map(|formatter| formatter.precision(Precision::Decimals(2)))
    });

    static NEGATIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-¥")
            .ok()
            .map(|formatter| formatter.precision(Precision::Decimals(2)))
    });

    let (Some(positive_fmt), Some(negative_fmt)) = (positive_fmt, negative_fmt) else {
        return plain_currency(number);
    };

    let mut formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        return "¥0.00".to_owned();
    };

    // numfmt omits trailing zeros, so we must add them ourselves.
    // For example, "12.30" is rendered as "12.3" so we append "0".
    match formatted_string.rfind('.') {
        None => formatted_string.push_str(".00"),
        Some(dot) => {
            for _ in formatted_string.len() - dot - 1..2 {
                formatted_string.push('0');
            }
        }
    }

    formatted_string
}

fn plain_currency(number: f64) -> String {
    if number < 0.0 {
        format!("-¥{:.2}", number.abs())
    } else {
        format!("¥{number:.2}")
    }
}

/// The time of day shown next to a transaction, e.g. "09:05".
pub fn format_time(date: PrimitiveDateTime) -> String {
    format!("{:02}:{:02}", date.hour(), date.minute())
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::{format_currency, format_time, plain_currency};

    #[test]
    fn zero_has_two_decimals() {
        assert_eq!(format_currency(0.0), "¥0.00");
    }

    #[test]
    fn negative_amounts_have_leading_minus() {
        let got = format_currency(-35.5);

        assert!(got.starts_with("-¥"), "got {got}");
        assert!(got.ends_with("35.50"), "got {got}");
    }

    #[test]
    fn large_amounts_have_separators() {
        let got = format_currency(35300.45);

        assert!(got.starts_with('¥'), "got {got}");
        assert!(got.contains("35,300"), "got {got}");
    }

    #[test]
    fn always_has_two_decimals() {
        for (number, want_suffix) in [(12.3, "12.30"), (8750.0, ".00"), (0.5, "0.50")] {
            let got = format_currency(number);
            assert!(got.ends_with(want_suffix), "got {got} for {number}");
        }
    }

    #[test]
    fn plain_fallback_matches_app_format() {
        assert_eq!(plain_currency(8750.0), "¥8750.00");
        assert_eq!(plain_currency(-45.5), "-¥45.50");
    }

    #[test]
    fn formats_time_of_day() {
        assert_eq!(format_time(datetime!(2025-03-06 9:05)), "09:05");
    }
}
