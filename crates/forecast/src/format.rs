//! Number rendering shared by on-screen display and export.
//!
//! Two decimals, comma thousands separator: `1234.5` → `1,234.50`.

use crate::executor::SegmentOutcome;

/// Cell text for segments without a predicted value.
pub const SENTINEL: &str = "N/A";

pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let fixed = format!("{value:.2}");
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}.{frac_part}")
}

pub fn format_outcome(outcome: &SegmentOutcome) -> String {
    match outcome.value() {
        Some(v) => format_value(v),
        None => SENTINEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn groups_thousands_with_two_decimals() {
        assert_eq!(format_value(1234.5), "1,234.50");
        assert_eq!(format_value(0.0), "0.00");
        assert_eq!(format_value(999.999), "1,000.00");
        assert_eq!(format_value(1_234_567.891), "1,234,567.89");
        assert_eq!(format_value(100.0), "100.00");
        assert_eq!(format_value(100_000.0), "100,000.00");
    }

    #[test]
    fn negatives_keep_sign_before_grouping() {
        assert_eq!(format_value(-1234.5), "-1,234.50");
        assert_eq!(format_value(-12.0), "-12.00");
    }

    #[test]
    fn non_finite_render_as_is() {
        assert_eq!(format_value(f64::NAN), "NaN");
        assert_eq!(format_value(f64::INFINITY), "inf");
        assert_eq!(format_value(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn outcomes_without_value_use_sentinel() {
        assert_eq!(format_outcome(&SegmentOutcome::Unavailable), SENTINEL);
        assert_eq!(
            format_outcome(&SegmentOutcome::Failed {
                reason: "x".to_string()
            }),
            SENTINEL
        );
        assert_eq!(
            format_outcome(&SegmentOutcome::Predicted { value: 5.0 }),
            "5.00"
        );
    }

    proptest! {
        #[test]
        fn stripping_commas_gives_plain_fixed_point(v in -1.0e12f64..1.0e12f64) {
            let rendered = format_value(v);
            prop_assert_eq!(rendered.replace(',', ""), format!("{v:.2}"));
        }

        #[test]
        fn integer_groups_are_three_digits(v in 0.0f64..1.0e15f64) {
            let rendered = format_value(v);
            let int_part = rendered.split('.').next().unwrap();
            let groups: Vec<&str> = int_part.split(',').collect();
            prop_assert!(!groups[0].is_empty() && groups[0].len() <= 3);
            for g in &groups[1..] {
                prop_assert_eq!(g.len(), 3);
            }
        }
    }
}
