/// Lenient decimal parsing for spreadsheet-style cells.
///
/// Leading whitespace is skipped and the longest numeric prefix is read, so
/// `"12.5%"` gives `12.5`. Anything without a leading number (`"N/A"`, `""`,
/// `"-"`) gives `None`, as do values that overflow to infinity. The decimal
/// separator is always `.`.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_digits = end - int_start;

    let mut frac_digits = 0;
    if end < len && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < len && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        frac_digits = frac_end - end - 1;
        if frac_digits > 0 {
            end = frac_end;
        }
    }

    if int_digits + frac_digits == 0 {
        return None;
    }

    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < len && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < len && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::parse_decimal;

    #[test]
    fn plain_numbers() {
        assert_eq!(parse_decimal("27.0"), Some(27.0));
        assert_eq!(parse_decimal("0.0"), Some(0.0));
        assert_eq!(parse_decimal("19.25"), Some(19.25));
        assert_eq!(parse_decimal("-3"), Some(-3.0));
        assert_eq!(parse_decimal(".5"), Some(0.5));
        assert_eq!(parse_decimal("1e2"), Some(100.0));
    }

    #[test]
    fn numeric_prefix_wins() {
        assert_eq!(parse_decimal("  12.5%"), Some(12.5));
        assert_eq!(parse_decimal("7."), Some(7.0));
        assert_eq!(parse_decimal("3e"), Some(3.0));
        assert_eq!(parse_decimal("4.5 (approx)"), Some(4.5));
    }

    #[test]
    fn placeholders_are_absent() {
        assert_eq!(parse_decimal("N/A"), None);
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("   "), None);
        assert_eq!(parse_decimal("-"), None);
        assert_eq!(parse_decimal("."), None);
        assert_eq!(parse_decimal("1e999"), None);
    }
}
