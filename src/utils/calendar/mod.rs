pub mod additions;
pub mod errors;
pub mod formats;

use serde::{Deserialize, Serialize};
use time::{ext::NumericalDuration, Date, Weekday};

use self::additions::CyclicTimeTo;
use self::errors::CalendarError;
use self::formats::parse_weekday;

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

/// Set of weekdays as a 7-bit map, Monday on the highest bit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<String>", try_from = "Vec<String>")]
pub struct WeekMap(u8);

impl WeekMap {
    pub const EMPTY: WeekMap = WeekMap(0);

    fn bit(day: Weekday) -> u8 {
        1 << (6 - day.number_days_from_monday())
    }

    pub fn from_bits(bits: u8) -> Self {
        Self(bits % 128)
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= Self::bit(day);
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEKDAYS.into_iter().filter(|day| self.contains(*day))
    }
}

impl FromIterator<Weekday> for WeekMap {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut map = WeekMap::EMPTY;
        iter.into_iter().for_each(|day| map.insert(day));
        map
    }
}

impl From<WeekMap> for Vec<String> {
    fn from(map: WeekMap) -> Self {
        map.iter().map(|day| day.to_string()).collect()
    }
}

impl TryFrom<Vec<String>> for WeekMap {
    type Error = CalendarError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        names.iter().map(|name| parse_weekday(name)).collect()
    }
}

/// First date in `[reference, reference + 6]` whose weekday is in `days`.
///
/// The reference date itself is eligible, so asking for Friday on a Friday
/// yields the same day. Returns `None` when `days` is empty.
pub fn next_occurrence(reference: Date, days: WeekMap) -> Option<Date> {
    if days.is_empty() {
        return None;
    }

    (0..7)
        .filter_map(|offset: i64| reference.checked_add(offset.days()))
        .find(|date| days.contains(date.weekday()))
}

/// Single-day variant of [`next_occurrence`] with the same "today counts" rule.
pub fn date_for_weekday(reference: Date, weekday: Weekday) -> Option<Date> {
    let offset = reference.weekday().cyclic_time_to(weekday) as i64;
    reference.checked_add(offset.days())
}

/// The first `count` dates on or after `reference` falling on one of `days`.
pub fn upcoming_occurrences(reference: Date, days: WeekMap, count: usize) -> Vec<Date> {
    let mut res = vec![];
    let mut cursor = Some(reference);

    while res.len() < count {
        let Some(date) = cursor.and_then(|from| next_occurrence(from, days)) else {
            break;
        };
        res.push(date);
        cursor = date.next_day();
    }

    res
}

#[cfg(test)]
mod calendar_tests {
    use time::macros::date;

    use super::*;

    fn map(days: &[Weekday]) -> WeekMap {
        days.iter().copied().collect()
    }

    #[test]
    fn next_occurrence_includes_reference_day() {
        // 2025-06-13 is a Friday
        let friday = date!(2025-06-13);
        assert_eq!(
            next_occurrence(friday, map(&[Weekday::Friday])),
            Some(friday)
        );
    }

    #[test]
    fn next_occurrence_picks_nearest_day() {
        let friday = date!(2025-06-13);
        assert_eq!(
            next_occurrence(friday, map(&[Weekday::Thursday, Weekday::Sunday])),
            Some(date!(2025-06-15))
        );
        assert_eq!(
            next_occurrence(friday, map(&[Weekday::Thursday])),
            Some(date!(2025-06-19))
        );
    }

    #[test]
    fn next_occurrence_empty_set() {
        assert_eq!(next_occurrence(date!(2025-06-13), WeekMap::EMPTY), None);
    }

    #[test]
    fn next_occurrence_is_minimal_for_every_set() {
        let reference = date!(2024-02-27);
        for bits in 1..128u8 {
            let days = WeekMap::from_bits(bits);
            let found = next_occurrence(reference, days).unwrap();
            assert!(days.contains(found.weekday()));
            assert!(found - reference < 7.days());

            let mut earlier = reference;
            while earlier < found {
                assert!(!days.contains(earlier.weekday()));
                earlier = earlier.next_day().unwrap();
            }
        }
    }

    #[test]
    fn date_for_weekday_test() {
        let friday = date!(2025-06-13);
        assert_eq!(date_for_weekday(friday, Weekday::Friday), Some(friday));
        assert_eq!(
            date_for_weekday(friday, Weekday::Saturday),
            Some(date!(2025-06-14))
        );
        assert_eq!(
            date_for_weekday(friday, Weekday::Thursday),
            Some(date!(2025-06-19))
        );
    }

    #[test]
    fn upcoming_occurrences_test() {
        let days = map(&[Weekday::Friday, Weekday::Saturday]);
        assert_eq!(
            upcoming_occurrences(date!(2025-06-13), days, 3),
            vec![date!(2025-06-13), date!(2025-06-14), date!(2025-06-20)]
        );
        assert!(upcoming_occurrences(date!(2025-06-13), WeekMap::EMPTY, 3).is_empty());
    }

    #[test]
    fn upcoming_occurrences_with_huge_count() {
        assert!(upcoming_occurrences(date!(2025-06-13), WeekMap::EMPTY, usize::MAX).is_empty());

        let near_end = upcoming_occurrences(date!(9999-12-20), map(&[Weekday::Friday]), usize::MAX);
        assert_eq!(near_end, vec![date!(9999-12-24), date!(9999-12-31)]);
    }

    #[test]
    fn week_map_bits() {
        let days = map(&[Weekday::Monday, Weekday::Sunday]);
        assert_eq!(days.bits(), 0b1000001);
        assert_eq!(days.len(), 2);
        assert_eq!(
            days.iter().collect::<Vec<_>>(),
            vec![Weekday::Monday, Weekday::Sunday]
        );
        assert_eq!(WeekMap::from_bits(0b11111111).len(), 7);
    }

    #[test]
    fn week_map_serde() {
        let days: WeekMap = serde_json::from_str(r#"["Fri", "saturday"]"#).unwrap();
        assert_eq!(days, map(&[Weekday::Friday, Weekday::Saturday]));
        assert_eq!(
            serde_json::to_string(&days).unwrap(),
            r#"["Friday","Saturday"]"#
        );
        assert!(serde_json::from_str::<WeekMap>(r#"["Blursday"]"#).is_err());
    }
}
