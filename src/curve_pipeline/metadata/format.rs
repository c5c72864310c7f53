/// Formats `value` with at most `digits` significant digits in the shortest
/// `%g` style: fixed notation for moderate exponents, trailing zeros dropped.
///
/// `2.8 -> "2.8"`, `4.0 -> "4"`, `11.0 -> "11"`, `0.95 -> "0.95"`, `160.0 -> "1.6e+02"`.
pub fn format_significant(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let digits = digits.max(1);

    // Rounding to `digits` first decides the exponent (9.96 -> 1.0e1).
    let scientific = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_f_numbers() {
        let cases = [
            (1.4, "1.4"),
            (2.0, "2"),
            (2.8, "2.8"),
            (4.0, "4"),
            (5.6, "5.6"),
            (8.0, "8"),
            (11.0, "11"),
            (16.0, "16"),
            (22.0, "22"),
        ];
        for (value, expected) in cases {
            assert_eq!(format_significant(value, 2), expected, "f/{}", value);
        }
    }

    #[test]
    fn test_rounding_carries_into_exponent() {
        assert_eq!(format_significant(9.96, 2), "10");
        assert_eq!(format_significant(3.14159, 2), "3.1");
        assert_eq!(format_significant(0.95, 2), "0.95");
    }

    #[test]
    fn test_exponent_form() {
        assert_eq!(format_significant(160.0, 2), "1.6e+02");
        assert_eq!(format_significant(100.0, 2), "1e+02");
        assert_eq!(format_significant(0.00001234, 2), "1.2e-05");
    }

    #[test]
    fn test_degenerate_values() {
        assert_eq!(format_significant(0.0, 2), "0");
        assert_eq!(format_significant(f64::INFINITY, 2), "inf");
        assert_eq!(format_significant(-2.8, 2), "-2.8");
    }
}
