use chrono::NaiveDate;

/// Min and max value assigned to players who are not for sale.
pub const NOT_FOR_SALE_VALUE: f64 = 500_000_000.0;

pub const EXPIRES_FORMAT: &str = "%m/%d/%Y";

const CURRENCY_SYMBOLS: [char; 3] = ['£', '€', '$'];

pub fn parse_value_range(raw: Option<&str>) -> (f64, f64) {
    let Some(raw) = raw else {
        return (f64::NAN, f64::NAN);
    };
    let s = raw.trim();
    if s.is_empty() {
        return (f64::NAN, f64::NAN);
    }
    if s.eq_ignore_ascii_case("not for sale") {
        return (NOT_FOR_SALE_VALUE, NOT_FOR_SALE_VALUE);
    }
    if s.eq_ignore_ascii_case("unknown") {
        return (f64::NAN, f64::NAN);
    }

    if s.contains('-') {
        let values: Vec<f64> = s
            .split('-')
            .map(|part| parse_value_range(Some(part.trim())).0)
            .collect();
        return match values.as_slice() {
            [a, b] => (a.min(*b), a.max(*b)),
            [first, ..] => (*first, *first),
            [] => (f64::NAN, f64::NAN),
        };
    }

    match currency_amount(s) {
        Some(value) => (value, value),
        None => (f64::NAN, f64::NAN),
    }
}

fn currency_amount(s: &str) -> Option<f64> {
    for (idx, ch) in s.char_indices() {
        if !CURRENCY_SYMBOLS.contains(&ch) {
            continue;
        }
        let rest = &s[idx + ch.len_utf8()..];
        let digits_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if digits_len == 0 {
            continue;
        }
        let number = rest[..digits_len].parse::<f64>().ok()?;
        let multiplier = match rest[digits_len..].chars().next() {
            Some('K') => 1_000.0,
            Some('M') => 1_000_000.0,
            Some('B') => 1_000_000_000.0,
            _ => 1.0,
        };
        return Some(number * multiplier);
    }
    None
}

pub fn leading_number(raw: Option<&str>) -> Option<u32> {
    let s = raw?;
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let rest = &s[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

pub fn parse_wages(raw: Option<&str>) -> Option<f64> {
    let s = raw?;
    let cleaned: String = s
        .chars()
        .filter(|c| !(CURRENCY_SYMBOLS.contains(c) || matches!(c, ',' | ' ' | 'p' | '/' | 'w')))
        .collect();
    parse_number(&cleaned).filter(|v| *v >= 0.0)
}

pub fn parse_expires(raw: Option<&str>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw?.trim(), EXPIRES_FORMAT).ok()
}

pub fn parse_attribute(raw: Option<&str>) -> Option<f64> {
    let s = raw?.trim();
    if s.contains('-') {
        let mut parts = s.split('-');
        let (Some(low), Some(high), None) = (parts.next(), parts.next(), parts.next()) else {
            return None;
        };
        let low = parse_number(low)?;
        let high = parse_number(high)?;
        return Some((low + high) / 2.0);
    }
    parse_number(s)
}

pub fn parse_age(raw: Option<&str>) -> Option<u32> {
    let value = parse_number(raw?)?;
    if value < 0.0 || value.fract() != 0.0 {
        return None;
    }
    Some(value as u32)
}

fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn same(a: (f64, f64), b: (f64, f64)) -> bool {
        let eq = |x: f64, y: f64| (x.is_nan() && y.is_nan()) || x == y;
        eq(a.0, b.0) && eq(a.1, b.1)
    }

    #[test]
    fn point_values_apply_magnitude() {
        assert_eq!(parse_value_range(Some("£45M")), (45_000_000.0, 45_000_000.0));
        assert_eq!(parse_value_range(Some("£950K")), (950_000.0, 950_000.0));
        assert_eq!(parse_value_range(Some("£1.2B")), (1_200_000_000.0, 1_200_000_000.0));
        assert_eq!(parse_value_range(Some("£500")), (500.0, 500.0));
        assert_eq!(parse_value_range(Some("€3.5M")), (3_500_000.0, 3_500_000.0));
    }

    #[test]
    fn ranges_are_ordered() {
        assert_eq!(
            parse_value_range(Some("£54M - £67M")),
            (54_000_000.0, 67_000_000.0)
        );
        assert_eq!(
            parse_value_range(Some("£67M - £54M")),
            (54_000_000.0, 67_000_000.0)
        );
        assert_eq!(
            parse_value_range(Some("£500K - £1.1M")),
            (500_000.0, 1_100_000.0)
        );
    }

    #[test]
    fn sentinel_and_unknown_labels() {
        assert_eq!(
            parse_value_range(Some("Not for Sale")),
            (NOT_FOR_SALE_VALUE, NOT_FOR_SALE_VALUE)
        );
        assert_eq!(
            parse_value_range(Some("  NOT FOR SALE ")),
            (NOT_FOR_SALE_VALUE, NOT_FOR_SALE_VALUE)
        );
        assert!(same(parse_value_range(Some("Unknown")), (f64::NAN, f64::NAN)));
        assert!(same(parse_value_range(Some("")), (f64::NAN, f64::NAN)));
        assert!(same(parse_value_range(None), (f64::NAN, f64::NAN)));
        assert!(same(parse_value_range(Some("Free Transfer")), (f64::NAN, f64::NAN)));
    }

    #[test]
    fn half_open_and_long_ranges_degrade() {
        assert_eq!(parse_value_range(Some("£5M - ")), (5_000_000.0, 5_000_000.0));
        assert_eq!(
            parse_value_range(Some("£1M - £2M - £3M")),
            (1_000_000.0, 1_000_000.0)
        );
        assert!(same(parse_value_range(Some(" - ")), (f64::NAN, f64::NAN)));
    }

    #[test]
    fn malformed_numerals_are_missing() {
        assert!(same(parse_value_range(Some("£1.2.3M")), (f64::NAN, f64::NAN)));
        assert!(same(parse_value_range(Some("£M")), (f64::NAN, f64::NAN)));
    }

    #[test]
    fn units_and_wages() {
        assert_eq!(leading_number(Some("180 cm")), Some(180));
        assert_eq!(leading_number(Some("75kg")), Some(75));
        assert_eq!(leading_number(Some("cm")), None);
        assert_eq!(parse_wages(Some("£12,500 p/w")), Some(12_500.0));
        assert_eq!(parse_wages(Some("£950 p/w")), Some(950.0));
        assert_eq!(parse_wages(Some("N/A")), None);
    }

    #[test]
    fn expiry_dates_use_month_first() {
        assert_eq!(
            parse_expires(Some("6/30/2027")),
            NaiveDate::from_ymd_opt(2027, 6, 30)
        );
        assert_eq!(parse_expires(Some("30/6/2027")), None);
        assert_eq!(parse_expires(None), None);
    }

    #[test]
    fn attribute_ranges_read_as_midpoint() {
        assert_eq!(parse_attribute(Some("12-14")), Some(13.0));
        assert_eq!(parse_attribute(Some("15")), Some(15.0));
        assert_eq!(parse_attribute(Some("7-8")), Some(7.5));
        assert_eq!(parse_attribute(Some("1-2-3")), None);
        assert_eq!(parse_attribute(Some("abc")), None);
    }

    #[test]
    fn ages_must_be_whole() {
        assert_eq!(parse_age(Some("24")), Some(24));
        assert_eq!(parse_age(Some("24.0")), Some(24));
        assert_eq!(parse_age(Some("-3")), None);
        assert_eq!(parse_age(Some("twenty")), None);
    }
}
