//! Time utilities: parsing and formatting HH:MM values.

use chrono::NaiveTime;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

pub fn format_time(t: &NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    let duration = end - start;
    duration.num_minutes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_hh_mm() {
        let t = parse_time("08:30").unwrap();
        assert_eq!(format_time(&t), "08:30");
        assert!(parse_time("8.30").is_none());
    }

    #[test]
    fn minutes_between_is_signed() {
        let a = parse_time("09:00").unwrap();
        let b = parse_time("10:30").unwrap();
        assert_eq!(minutes_between(a, b), 90);
        assert_eq!(minutes_between(b, a), -90);
    }
}
