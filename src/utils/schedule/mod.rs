pub mod models;

use time::{Date, Weekday};

use crate::utils::calendar::{next_occurrence, WeekMap, WEEKDAYS};
use crate::utils::ids::{EventId, VenueId};

use self::models::{PromoterSchedule, ScheduleEntry};

impl PromoterSchedule {
    pub fn days(&self) -> WeekMap {
        self.entries.iter().map(|entry| entry.day).collect()
    }

    pub fn days_at_venue(&self, venue_id: VenueId) -> WeekMap {
        self.entries
            .iter()
            .filter(|entry| entry.venue_id == Some(venue_id))
            .map(|entry| entry.day)
            .collect()
    }

    pub fn days_for_event(&self, event_id: EventId) -> WeekMap {
        self.entries
            .iter()
            .filter(|entry| entry.event_id == Some(event_id))
            .map(|entry| entry.day)
            .collect()
    }

    /// Next date on or after `reference` the promoter works `venue_id`.
    pub fn next_open_day(&self, reference: Date, venue_id: VenueId) -> Option<Date> {
        next_occurrence(reference, self.days_at_venue(venue_id))
    }

    /// Next date on or after `reference` the promoter works any venue or event.
    pub fn next_working_day(&self, reference: Date) -> Option<Date> {
        next_occurrence(reference, self.days())
    }

    /// Entries grouped Monday to Sunday, keeping insertion order within a day.
    /// Days without entries are omitted.
    pub fn entries_by_day(&self) -> Vec<(Weekday, Vec<&ScheduleEntry>)> {
        WEEKDAYS
            .into_iter()
            .map(|day| {
                let entries: Vec<&ScheduleEntry> =
                    self.entries.iter().filter(|e| e.day == day).collect();
                (day, entries)
            })
            .filter(|(_, entries)| !entries.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod schedule_tests {
    use time::macros::date;

    use super::*;

    fn schedule() -> PromoterSchedule {
        PromoterSchedule::new(vec![
            ScheduleEntry::at_venue(Weekday::Saturday, 1),
            ScheduleEntry::at_venue(Weekday::Friday, 2),
            ScheduleEntry::for_event(Weekday::Friday, 202),
            ScheduleEntry::at_venue(Weekday::Thursday, 1),
        ])
    }

    #[test]
    fn next_open_day_per_venue() {
        // Friday
        let reference = date!(2025-06-13);
        let schedule = schedule();
        assert_eq!(schedule.next_open_day(reference, 1), Some(date!(2025-06-14)));
        assert_eq!(schedule.next_open_day(reference, 2), Some(reference));
        assert_eq!(schedule.next_open_day(reference, 3), None);
        assert_eq!(schedule.next_working_day(reference), Some(reference));
    }

    #[test]
    fn event_days() {
        let schedule = schedule();
        assert!(schedule.days_for_event(202).contains(Weekday::Friday));
        assert_eq!(schedule.days_for_event(202).len(), 1);
    }

    #[test]
    fn grouping_keeps_duplicate_days() {
        let schedule = schedule();
        let grouped = schedule.entries_by_day();
        let days: Vec<Weekday> = grouped.iter().map(|(day, _)| *day).collect();
        assert_eq!(
            days,
            vec![Weekday::Thursday, Weekday::Friday, Weekday::Saturday]
        );
        assert_eq!(grouped[1].1.len(), 2);
        assert_eq!(grouped[1].1[0].venue_id, Some(2));
    }

    #[test]
    fn schedule_serde() {
        let schedule: PromoterSchedule =
            serde_json::from_str(r#"[{"day": "Friday", "venue_id": 1}, {"day": "sat", "event_id": 9}]"#)
                .unwrap();
        assert_eq!(
            schedule,
            PromoterSchedule::new(vec![
                ScheduleEntry::at_venue(Weekday::Friday, 1),
                ScheduleEntry::for_event(Weekday::Saturday, 9),
            ])
        );
    }
}
