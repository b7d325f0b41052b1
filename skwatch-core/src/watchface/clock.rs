//! Time and date text

use core::fmt::Write;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use heapless::String;

/// `HH:MM`
pub type TimeText = String<8>;
/// `AM`, `PM` or empty
pub type MeridiemText = String<2>;
/// `Www MM/DD`
pub type DateText = String<12>;

/// Time text plus meridiem for `now`
///
/// 24-hour mode renders `13:05` with an empty meridiem; 12-hour mode
/// renders `01:05` and `PM`.
pub fn format_time(now: &NaiveDateTime, twenty_four_hour: bool) -> (TimeText, MeridiemText) {
    let mut time = TimeText::new();
    let mut meridiem = MeridiemText::new();

    if twenty_four_hour {
        let _ = write!(time, "{:02}:{:02}", now.hour(), now.minute());
    } else {
        let (pm, hour) = now.hour12();
        let _ = write!(time, "{:02}:{:02}", hour, now.minute());
        let _ = meridiem.push_str(if pm { "PM" } else { "AM" });
    }

    (time, meridiem)
}

/// Date text such as `Tue 03/05`
pub fn format_date(now: &NaiveDateTime) -> DateText {
    let mut date = DateText::new();
    let _ = write!(
        date,
        "{} {:02}/{:02}",
        weekday_abbrev(now.weekday()),
        now.month(),
        now.day()
    );
    date
}

fn weekday_abbrev(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_twenty_four_hour() {
        let (time, meridiem) = format_time(&at(13, 5), true);
        assert_eq!(time.as_str(), "13:05");
        assert!(meridiem.is_empty());
    }

    #[test]
    fn test_twelve_hour() {
        let (time, meridiem) = format_time(&at(13, 5), false);
        assert_eq!(time.as_str(), "01:05");
        assert_eq!(meridiem.as_str(), "PM");
    }

    #[test]
    fn test_midnight_and_noon() {
        assert_eq!(format_time(&at(0, 0), false).0.as_str(), "12:00");
        assert_eq!(format_time(&at(0, 0), false).1.as_str(), "AM");
        assert_eq!(format_time(&at(12, 30), false).1.as_str(), "PM");
        assert_eq!(format_time(&at(0, 0), true).0.as_str(), "00:00");
    }

    #[test]
    fn test_date() {
        assert_eq!(format_date(&at(9, 0)).as_str(), "Tue 03/05");
    }

    proptest! {
        #[test]
        fn time_text_is_five_chars(hour in 0u32..24, minute in 0u32..60, h24 in any::<bool>()) {
            let (time, _) = format_time(&at(hour, minute), h24);
            prop_assert_eq!(time.len(), 5);
        }
    }
}
