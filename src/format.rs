use chrono::NaiveDate;

/// Format seconds as "1h 02m 05s" or "02m 05s"
pub fn format_duration(secs: i64) -> String {
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    if h > 0 {
        format!("{}h {:02}m {:02}s", h, m, s)
    } else {
        format!("{:02}m {:02}s", m, s)
    }
}

/// Format minutes as "Xh Ym" or "Ym"
pub fn format_minutes(minutes: i64) -> String {
    let hours = minutes / 60;
    let remaining = minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, remaining)
    } else {
        format!("{}m", remaining)
    }
}

/// Stopwatch display, always "HH:MM:SS"
pub fn format_timer_display(secs: i64) -> String {
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Short weekday label such as "Mon"
pub fn day_label(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// Long date such as "Wednesday, October 14, 2026"
pub fn format_date_display(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "00m 00s");
        assert_eq!(format_duration(125), "02m 05s");
        assert_eq!(format_duration(3725), "1h 02m 05s");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(45), "45m");
        assert_eq!(format_minutes(60), "1h 0m");
        assert_eq!(format_minutes(125), "2h 5m");
    }

    #[test]
    fn test_format_timer_display() {
        assert_eq!(format_timer_display(0), "00:00:00");
        assert_eq!(format_timer_display(3725), "01:02:05");
        assert_eq!(format_timer_display(36_000), "10:00:00");
    }

    #[test]
    fn test_date_labels() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 12).unwrap();
        assert_eq!(day_label(date), "Mon");
        assert_eq!(format_date_display(date), "Monday, October 12, 2026");
    }
}
