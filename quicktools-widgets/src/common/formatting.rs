// quicktools-widgets/src/common/formatting.rs
use std::time::Duration;

/// Parse a numeric field, coercing anything unparseable to 0.
/// This is the only handling invalid numeric input gets anywhere.
pub fn parse_or_zero(value: &str) -> f64 {
    value.trim().parse::<f64>().unwrap_or(0.0)
}

/// Parse a denominator-style field (person count, tenure months):
/// coerce to 0 like everything else, then clamp to a minimum of 1.
pub fn parse_min_1(value: &str) -> f64 {
    parse_or_zero(value).max(1.0)
}

/// Format large whole numbers with comma separators
pub fn format_number(value: u64) -> String {
    let mut result = String::new();
    let s = value.to_string();
    let chars: Vec<char> = s.chars().collect();

    for (i, ch) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*ch);
    }

    result
}

/// Monetary/ratio display: fixed 2 decimal places
pub fn format_money(value: f64) -> String {
    format!("{:.2}", value)
}

/// Round to `places` decimals and trim trailing zeros (and a bare point),
/// the way the unit converter shows "3.28084" rather than "3.280840"
pub fn format_trimmed(value: f64, places: u32) -> String {
    let s = format!("{:.*}", places as usize, value);
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

/// Stopwatch display: `H:MM:SS.CC`, hours unbounded, the rest zero-padded
pub fn format_clock(elapsed: Duration) -> String {
    let total_ms = elapsed.as_millis();
    let total_secs = total_ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs / 60) % 60;
    let seconds = total_secs % 60;
    let centis = (total_ms % 1000) / 10;
    format!("{}:{:02}:{:02}.{:02}", hours, minutes, seconds, centis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_zero() {
        assert_eq!(parse_or_zero("42.5"), 42.5);
        assert_eq!(parse_or_zero(" 7 "), 7.0);
        assert_eq!(parse_or_zero(""), 0.0);
        assert_eq!(parse_or_zero("abc"), 0.0);
        assert_eq!(parse_or_zero("1e3"), 1000.0);
    }

    #[test]
    fn test_parse_min_1() {
        assert_eq!(parse_min_1("4"), 4.0);
        assert_eq!(parse_min_1("0"), 1.0);
        assert_eq!(parse_min_1("-3"), 1.0);
        assert_eq!(parse_min_1("junk"), 1.0);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(123), "123");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1100.0), "1100.00");
        assert_eq!(format_money(0.125), "0.13");
    }

    #[test]
    fn test_format_trimmed() {
        assert_eq!(format_trimmed(3.280840, 6), "3.28084");
        assert_eq!(format_trimmed(15.0, 2), "15");
        assert_eq!(format_trimmed(0.5, 2), "0.5");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(Duration::ZERO), "0:00:00.00");
        assert_eq!(format_clock(Duration::from_millis(62_350)), "0:01:02.35");
        assert_eq!(
            format_clock(Duration::from_secs(3600 * 25 + 61)),
            "25:01:01.00"
        );
    }
}
