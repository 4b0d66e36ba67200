//! Formatting helpers for presenting metrics.

/// Whole percent, rounded half away from zero
pub fn format_percentage(ratio: f64) -> String {
    format!("{:.0}%", (ratio * 100.0).round())
}

/// Number of WRs with the unit attached
pub fn format_count(count: u64) -> String {
    if count == 1 {
        format!("{} WR", count)
    } else {
        format!("{} WRs", count)
    }
}

/// Days with one decimal place
pub fn format_delay(days: f64) -> String {
    let rounded = (days * 10.0).round() / 10.0;
    if rounded == 1.0 {
        format!("{:.1} day", rounded)
    } else {
        format!("{:.1} days", rounded)
    }
}

/// Hour tick label, 24 wraps to midnight
pub fn format_hour(hour: u32) -> String {
    format!("{}:00", hour % 24)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.5), "50%");
        assert_eq!(format_percentage(0.004), "0%");
        assert_eq!(format_percentage(1.0), "100%");
        assert_eq!(format_percentage(0.0), "0%");
        assert_eq!(format_percentage(0.7631578947368421), "76%");
        assert_eq!(format_percentage(0.125), "13%");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0 WRs");
        assert_eq!(format_count(1), "1 WR");
        assert_eq!(format_count(38), "38 WRs");
    }

    #[test]
    fn test_format_delay() {
        assert_eq!(format_delay(2.34), "2.3 days");
        assert_eq!(format_delay(2.36), "2.4 days");
        assert_eq!(format_delay(0.0), "0.0 days");
        assert_eq!(format_delay(1.04), "1.0 day");
    }

    #[test]
    fn test_format_hour_wraps() {
        assert_eq!(format_hour(0), "0:00");
        assert_eq!(format_hour(21), "21:00");
        assert_eq!(format_hour(24), "0:00");
    }
}
