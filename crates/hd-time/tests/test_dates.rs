//! Property tests for `Date` and the Easter computus.

use hd_time::{easter_sunday, orthodox_easter, Date, LunarCalendar, Weekday, WeekendSet};
use proptest::prelude::*;

proptest! {
    #[test]
    fn serial_roundtrip(serial in Date::MIN.serial()..=Date::MAX.serial()) {
        let d = Date::from_serial(serial).unwrap();
        let (y, m, day) = d.ymd();
        prop_assert_eq!(Date::from_ymd(y, m, day).unwrap(), d);
    }

    #[test]
    fn consecutive_days_advance_weekday(serial in 1i32..3_652_000) {
        let d = Date::from_serial(serial).unwrap();
        let next = d.succ().unwrap();
        prop_assert_eq!(d.weekday().days_until(next.weekday()), 1);
    }

    #[test]
    fn easter_is_a_sunday(year in 1583i32..=9999) {
        let e = easter_sunday(year).unwrap();
        prop_assert_eq!(e.weekday(), Weekday::Sunday);
        prop_assert_eq!(e.year(), year);
        // Gregorian Easter lies between March 22 and April 25.
        prop_assert!((e.month(), e.day_of_month()) >= (3, 22));
        prop_assert!((e.month(), e.day_of_month()) <= (4, 25));
    }

    #[test]
    fn orthodox_easter_never_precedes_western(year in 1583i32..=4099) {
        prop_assert!(orthodox_easter(year).unwrap() >= easter_sunday(year).unwrap());
        prop_assert_eq!(orthodox_easter(year).unwrap().weekday(), Weekday::Sunday);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn islamic_occurrences_match_full_scan(
        year in 1i32..=9999,
        (month, day) in prop_oneof![Just((1u8, 1u8)), Just((10, 1)), Just((12, 10)), Just((12, 30))],
    ) {
        let cal = LunarCalendar::Islamic;
        let scanned: Vec<Date> = (1..=9700)
            .filter_map(|ah| cal.to_gregorian(ah, month, day).ok())
            .filter(|d| d.year() == year)
            .collect();
        prop_assert_eq!(cal.occurrences_in(year, month, day), scanned);
    }
}

#[test]
fn easter_before_the_reform_is_still_sunday() {
    for year in 100..1583 {
        assert_eq!(easter_sunday(year).unwrap().weekday(), Weekday::Sunday, "{year}");
    }
}

#[test]
fn date_serde_is_iso_string() {
    let d = Date::from_ymd(2024, 7, 4).unwrap();
    let json = serde_json::to_string(&d).unwrap();
    assert_eq!(json, "\"2024-07-04\"");
    let back: Date = serde_json::from_str(&json).unwrap();
    assert_eq!(back, d);
    assert!(serde_json::from_str::<Date>("\"2024-02-30\"").is_err());
}

#[test]
fn weekend_set_serde_is_index_list() {
    let set = WeekendSet::FRIDAY_SATURDAY;
    assert_eq!(serde_json::to_string(&set).unwrap(), "[5,6]");
    let back: WeekendSet = serde_json::from_str("[6, 0]").unwrap();
    assert_eq!(back, WeekendSet::default());
    assert!(serde_json::from_str::<WeekendSet>("[0,1,2,3,4,5,6]").is_err());
}
